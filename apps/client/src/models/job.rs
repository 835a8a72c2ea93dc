use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_job_type() -> String {
    "Full-time".to_string()
}

/// A job opportunity from `GET /api/jobs`.
///
/// `match_score` is filled in by the remote matcher when available; callers
/// fall back to a configured default through [`Job::effective_match_score`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub is_remote: bool,
    #[serde(default)]
    pub salary_min: Option<i64>,
    #[serde(default)]
    pub salary_max: Option<i64>,
    #[serde(default)]
    pub min_experience_years: f64,
    #[serde(default)]
    pub max_experience_years: Option<f64>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
    #[serde(default = "default_job_type")]
    pub job_type: String,
    #[serde(default)]
    pub posted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub match_score: Option<f64>,
}

impl Job {
    pub fn effective_match_score(&self, default: f64) -> f64 {
        self.match_score.unwrap_or(default)
    }

    /// Salary band rendered in lakhs, e.g. `₹15L - ₹25L`.
    pub fn salary_range(&self) -> String {
        match (self.salary_min, self.salary_max) {
            (Some(min), Some(max)) if min > 0 && max > 0 => {
                format!("₹{}L - ₹{}L", min / 100_000, max / 100_000)
            }
            _ => "Not disclosed".to_string(),
        }
    }

    pub fn experience_label(&self) -> String {
        match self.max_experience_years {
            Some(max) => format!("{}-{} yrs", self.min_experience_years, max),
            None => format!("{}+ yrs", self.min_experience_years),
        }
    }
}

/// The listing endpoint returns either `{"jobs": [...]}` or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum JobListing {
    Wrapped { jobs: Vec<Job> },
    Bare(Vec<Job>),
}

impl JobListing {
    pub fn into_jobs(self) -> Vec<Job> {
        match self {
            JobListing::Wrapped { jobs } | JobListing::Bare(jobs) => jobs,
        }
    }
}
