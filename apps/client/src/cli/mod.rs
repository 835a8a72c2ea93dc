//! Command tree and dispatch. Each subcommand maps onto one handler; the
//! handler's result is rendered by [`output::emit`].

pub mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::analysis::handlers::{
    collect_skills, handle_gap, handle_generate_roadmap, handle_roles, handle_skill_taxonomy, merge_skills,
};
use crate::errors::AppError;
use crate::jobs::filters::{FilterState, Range, Recency};
use crate::jobs::handlers::{
    handle_calculate_matches, handle_clear_saved, handle_list, handle_match_weights, handle_saved,
    handle_toggle_save, ListOptions,
};
use crate::jobs::ranking::SortKey;
use crate::models::matching::MatchRequest;
use crate::models::roadmap::LearningPace;
use crate::models::user::UserUpdate;
use crate::review::handlers::{handle_correct, handle_parse, handle_review, handle_save, read_resume};
use crate::session::handlers::{
    handle_change_password, handle_delete_account, handle_login, handle_logout, handle_me, handle_register,
    handle_update, handle_upload_photo, PhotoKind,
};
use crate::state::AppState;

use self::output::emit;

#[derive(Parser, Debug)]
#[command(name = "wevolve", version, about = "Résumé review, skill-gap analysis and job matching")]
pub struct Cli {
    /// Backend base URL (overrides WEVOLVE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Print raw JSON instead of the text summary
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the backend is reachable
    Health,
    Auth(AuthCommand),
    Resume(ResumeCommand),
    Match(MatchCommand),
    /// Compare skills against a target role
    Gap(GapArgs),
    /// List built-in target roles
    Roles,
    Roadmap(RoadmapCommand),
    Jobs(JobsCommand),
}

impl Command {
    /// Commands that never reach the backend skip session hydration.
    pub fn is_offline(&self) -> bool {
        match self {
            Command::Roles => true,
            Command::Gap(args) => !args.taxonomy,
            Command::Resume(r) => matches!(
                r.command,
                ResumeSubcommand::Review { .. } | ResumeSubcommand::Correct { save: None, .. }
            ),
            Command::Jobs(j) => !matches!(j.command, JobsSubcommand::List(_)),
            _ => false,
        }
    }
}

// ──── auth ────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "WEVOLVE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "WEVOLVE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    /// Show the logged-in user
    Me,
    /// Update profile fields
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// Delete the account and forget the local session
    Delete {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Upload a profile or cover photo
    Photo(PhotoArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PhotoArgs {
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    pub cover: Option<PathBuf>,
}

impl PhotoArgs {
    pub fn target(self) -> Option<(PhotoKind, PathBuf)> {
        match (self.profile, self.cover) {
            (Some(path), _) => Some((PhotoKind::Profile, path)),
            (None, Some(path)) => Some((PhotoKind::Cover, path)),
            (None, None) => None,
        }
    }
}

// ──── résumé ──────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct ResumeCommand {
    #[command(subcommand)]
    pub command: ResumeSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ResumeSubcommand {
    /// Upload a PDF or DOCX résumé for parsing
    Parse {
        file: PathBuf,
        /// Save the parsed profile under its candidate id
        #[arg(long)]
        save: bool,
        /// Write the parsed résumé JSON here for later review
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List low-confidence fields in a parsed résumé
    Review { file: PathBuf },
    /// Correct one field in a parsed résumé file
    Correct {
        file: PathBuf,
        field: String,
        value: String,
        #[arg(long, value_name = "CANDIDATE_ID")]
        save: Option<i64>,
    },
    Save { candidate_id: i64, file: PathBuf },
}

// ──── matching ────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct MatchCommand {
    #[command(subcommand)]
    pub command: MatchSubcommand,
}

#[derive(Args, Debug, Default)]
pub struct SkillSource {
    /// Comma-separated skill names
    #[arg(long, value_delimiter = ',')]
    pub skills: Vec<String>,
    /// Parsed résumé JSON to take skills from
    #[arg(long)]
    pub resume: Option<PathBuf>,
}

impl SkillSource {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.resume.is_none()
    }
}

/// Builds a matcher request from the skills and, when given, the parsed
/// résumé, which also supplies location, experience, salary and role.
async fn candidate_request(source: SkillSource) -> Result<MatchRequest, AppError> {
    let resume = match &source.resume {
        Some(path) => Some(read_resume(path).await?),
        None => None,
    };
    let skills = merge_skills(source.skills, resume.as_ref());
    let Some(resume) = resume else {
        return Ok(MatchRequest {
            candidate_skills: skills,
            ..Default::default()
        });
    };
    Ok(MatchRequest {
        candidate_skills: skills,
        candidate_location: resume.location.as_ref().map(|l| l.display_value()),
        candidate_experience_years: resume.years_of_experience(),
        expected_salary_min: None,
        expected_salary_max: resume.expected_salary,
        target_role: resume.preferred_roles.first().cloned(),
    })
}

#[derive(Subcommand, Debug)]
pub enum MatchSubcommand {
    /// Score every job against a candidate profile
    Calculate {
        #[command(flatten)]
        source: SkillSource,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        experience: Option<f64>,
        #[arg(long)]
        salary_min: Option<i64>,
        #[arg(long)]
        salary_max: Option<i64>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Show the scoring weights
    Weights,
}

// ──── analysis ────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct GapArgs {
    #[arg(long)]
    pub role: String,
    #[command(flatten)]
    pub source: SkillSource,
    /// Refine difficulty estimates with the backend skill taxonomy
    #[arg(long)]
    pub taxonomy: bool,
}

#[derive(Args, Debug)]
pub struct RoadmapCommand {
    #[command(subcommand)]
    pub command: RoadmapSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum RoadmapSubcommand {
    /// Ask the backend for a learning roadmap towards one job
    Generate {
        #[arg(long = "job")]
        job_id: i64,
        #[command(flatten)]
        source: SkillSource,
        #[arg(long, default_value_t = LearningPace::Moderate)]
        pace: LearningPace,
    },
    /// Show the backend skill taxonomy
    Skills,
}

// ──── jobs ────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct JobsCommand {
    #[command(subcommand)]
    pub command: JobsSubcommand,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Location to include; repeatable. "Remote" matches remote jobs
    #[arg(long = "location")]
    pub locations: Vec<String>,
    #[arg(long)]
    pub min_experience: Option<f64>,
    #[arg(long)]
    pub max_experience: Option<f64>,
    #[arg(long)]
    pub min_salary: Option<i64>,
    #[arg(long)]
    pub max_salary: Option<i64>,
    /// Skill the job must mention; repeatable
    #[arg(long = "skill")]
    pub skill_filter: Vec<String>,
    #[arg(long = "job-type")]
    pub job_types: Vec<String>,
    #[arg(long, default_value = "any")]
    pub posted: Recency,
    #[arg(long, default_value = "match")]
    pub sort: SortKey,
    /// Only saved jobs
    #[arg(long)]
    pub saved: bool,
    #[arg(long)]
    pub limit: Option<usize>,
    /// Candidate skills for scoring the listing with the remote matcher
    #[command(flatten)]
    pub profile: SkillSource,
}

fn check_range<T: PartialOrd + std::fmt::Display>(what: &str, min: Option<T>, max: Option<T>) -> Result<(), AppError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => Err(AppError::Validation(format!(
            "{what} minimum {min} exceeds maximum {max}"
        ))),
        _ => Ok(()),
    }
}

impl ListArgs {
    pub fn into_options(self) -> Result<ListOptions, AppError> {
        check_range("experience", self.min_experience, self.max_experience)?;
        check_range("salary", self.min_salary, self.max_salary)?;
        Ok(ListOptions {
            filters: FilterState {
                locations: self.locations,
                experience: Range {
                    min: self.min_experience,
                    max: self.max_experience,
                },
                salary: Range {
                    min: self.min_salary,
                    max: self.max_salary,
                },
                skills: self.skill_filter,
                job_types: self.job_types,
                posted_within: self.posted,
            },
            sort: self.sort,
            saved_only: self.saved,
            limit: self.limit,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum JobsSubcommand {
    List(ListArgs),
    /// Save a job, or unsave it if already saved
    Save { job_id: i64 },
    /// Show saved job ids
    Saved,
    ClearSaved,
}

// ──── dispatch ────────────────────────────────────────────────────────────

pub async fn run(command: Command, state: &mut AppState, json: bool) -> Result<(), AppError> {
    match command {
        Command::Health => emit(&state.api.health().await?, json),
        Command::Auth(auth) => run_auth(auth.command, state, json).await,
        Command::Resume(resume) => run_resume(resume.command, state, json).await,
        Command::Match(m) => run_match(m.command, state, json).await,
        Command::Gap(args) => {
            let skills = collect_skills(args.source.skills, args.source.resume.as_deref()).await?;
            emit(&handle_gap(state, &args.role, &skills, args.taxonomy).await?, json)
        }
        Command::Roles => emit(&handle_roles(), json),
        Command::Roadmap(r) => run_roadmap(r.command, state, json).await,
        Command::Jobs(j) => run_jobs(j.command, state, json).await,
    }
}

async fn run_auth(command: AuthSubcommand, state: &mut AppState, json: bool) -> Result<(), AppError> {
    match command {
        AuthSubcommand::Register {
            name,
            email,
            password,
        } => emit(&handle_register(state, &name, &email, &password).await?, json),
        AuthSubcommand::Login { email, password } => {
            emit(&handle_login(state, &email, &password).await?, json)
        }
        AuthSubcommand::Logout => emit(&handle_logout(state).await?, json),
        AuthSubcommand::Me => emit(&handle_me(state)?, json),
        AuthSubcommand::Update {
            name,
            city,
            lat,
            lon,
        } => {
            let update = UserUpdate {
                name,
                city,
                lat,
                lon,
            };
            emit(&handle_update(state, update).await?, json)
        }
        AuthSubcommand::ChangePassword { current, new } => {
            emit(&handle_change_password(state, &current, &new).await?, json)
        }
        AuthSubcommand::Delete { yes } => emit(&handle_delete_account(state, yes).await?, json),
        AuthSubcommand::Photo(args) => {
            let (kind, file) = args
                .target()
                .ok_or_else(|| AppError::Validation("pass --profile or --cover".to_string()))?;
            emit(&handle_upload_photo(state, kind, &file).await?, json)
        }
    }
}

async fn run_resume(command: ResumeSubcommand, state: &mut AppState, json: bool) -> Result<(), AppError> {
    match command {
        ResumeSubcommand::Parse { file, save, out } => {
            emit(&handle_parse(state, &file, save, out.as_deref()).await?, json)
        }
        ResumeSubcommand::Review { file } => emit(&handle_review(&file).await?, json),
        ResumeSubcommand::Correct {
            file,
            field,
            value,
            save,
        } => emit(&handle_correct(state, &file, &field, &value, save).await?, json),
        ResumeSubcommand::Save { candidate_id, file } => {
            emit(&handle_save(state, candidate_id, &file).await?, json)
        }
    }
}

async fn run_match(command: MatchSubcommand, state: &mut AppState, json: bool) -> Result<(), AppError> {
    match command {
        MatchSubcommand::Calculate {
            source,
            location,
            experience,
            salary_min,
            salary_max,
            role,
        } => {
            let mut request = candidate_request(source).await?;
            // Explicit flags win over values taken from the résumé.
            if location.is_some() {
                request.candidate_location = location;
            }
            if let Some(years) = experience {
                request.candidate_experience_years = years;
            }
            request.expected_salary_min = salary_min;
            if salary_max.is_some() {
                request.expected_salary_max = salary_max;
            }
            if role.is_some() {
                request.target_role = role;
            }
            emit(&handle_calculate_matches(state, request).await?, json)
        }
        MatchSubcommand::Weights => emit(&handle_match_weights(state).await?, json),
    }
}

async fn run_roadmap(command: RoadmapSubcommand, state: &mut AppState, json: bool) -> Result<(), AppError> {
    match command {
        RoadmapSubcommand::Generate {
            job_id,
            source,
            pace,
        } => {
            let skills = collect_skills(source.skills, source.resume.as_deref()).await?;
            emit(&handle_generate_roadmap(state, job_id, skills, pace).await?, json)
        }
        RoadmapSubcommand::Skills => emit(&handle_skill_taxonomy(state).await?, json),
    }
}

async fn run_jobs(command: JobsSubcommand, state: &mut AppState, json: bool) -> Result<(), AppError> {
    match command {
        JobsSubcommand::List(mut args) => {
            let source = std::mem::take(&mut args.profile);
            let options = args.into_options()?;
            let profile = if source.is_empty() {
                None
            } else {
                Some(candidate_request(source).await?)
            };
            emit(&handle_list(state, &options, profile).await?, json)
        }
        JobsSubcommand::Save { job_id } => emit(&handle_toggle_save(state, job_id)?, json),
        JobsSubcommand::Saved => emit(&handle_saved(state), json),
        JobsSubcommand::ClearSaved => emit(&handle_clear_saved(state)?, json),
    }
}
