// Remote endpoint paths, relative to the configured base URL.

pub const HEALTH: &str = "/health";

pub const RESUME_PARSE: &str = "/api/resume/parse";

pub const MATCH_CALCULATE: &str = "/api/match/calculate";
pub const MATCH_WEIGHTS: &str = "/api/match/weights";

pub const ROADMAP_GENERATE: &str = "/api/roadmap/generate";
pub const ROADMAP_SKILLS: &str = "/api/roadmap/skills";

pub const JOBS: &str = "/api/jobs";

pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_LOGOUT: &str = "/auth/logout";
pub const AUTH_ME: &str = "/auth/me";
pub const AUTH_CHANGE_PASSWORD: &str = "/auth/change-password";
pub const AUTH_PROFILE_PHOTO: &str = "/auth/me/profile-photo";
pub const AUTH_COVER_PHOTO: &str = "/auth/me/cover-photo";

pub fn resume_save(candidate_id: i64) -> String {
    format!("/api/resume/save/{candidate_id}")
}
