//! Listing filters.
//!
//! Every constraint is optional: an empty selection or an unset range never
//! excludes a job. A job must satisfy all active constraints to be kept.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::job::Job;

pub const REMOTE_LOCATION: &str = "Remote";

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Recency {
    #[default]
    Any,
    Day,
    Week,
    Month,
}

impl Recency {
    pub fn window(self) -> Option<Duration> {
        match self {
            Recency::Any => None,
            Recency::Day => Some(Duration::days(1)),
            Recency::Week => Some(Duration::days(7)),
            Recency::Month => Some(Duration::days(30)),
        }
    }
}

impl FromStr for Recency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Recency::Any),
            "day" | "24h" => Ok(Recency::Day),
            "week" | "7d" => Ok(Recency::Week),
            "month" | "30d" => Ok(Recency::Month),
            other => Err(format!("unknown recency '{other}' (expected any, day, week or month)")),
        }
    }
}

/// Inclusive numeric range; either bound may be open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Range<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// True when `[lo, hi]` intersects this range. `hi = None` means no upper end.
    pub fn overlaps(&self, lo: T, hi: Option<T>) -> bool {
        let below_max = self.max.map_or(true, |max| lo <= max);
        let above_min = match (self.min, hi) {
            (Some(min), Some(hi)) => hi >= min,
            _ => true,
        };
        below_max && above_min
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterState {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub experience: Range<f64>,
    #[serde(default)]
    pub salary: Range<i64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub job_types: Vec<String>,
    #[serde(default)]
    pub posted_within: Recency,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
            && self.experience.is_unbounded()
            && self.salary.is_unbounded()
            && self.skills.is_empty()
            && self.job_types.is_empty()
            && self.posted_within == Recency::Any
    }

    pub fn matches(&self, job: &Job, now: DateTime<Utc>) -> bool {
        self.matches_location(job)
            && self.experience.overlaps(job.min_experience_years, job.max_experience_years)
            && self.matches_salary(job)
            && self.matches_skills(job)
            && self.matches_job_type(job)
            && self.matches_recency(job, now)
    }

    /// Keeps matching jobs in their original order.
    pub fn apply(&self, jobs: Vec<Job>, now: DateTime<Utc>) -> Vec<Job> {
        jobs.into_iter().filter(|j| self.matches(j, now)).collect()
    }

    fn matches_location(&self, job: &Job) -> bool {
        if self.locations.is_empty() {
            return true;
        }
        self.locations.iter().any(|wanted| {
            (job.is_remote && wanted.eq_ignore_ascii_case(REMOTE_LOCATION))
                || job.location.eq_ignore_ascii_case(wanted)
        })
    }

    fn matches_salary(&self, job: &Job) -> bool {
        match (job.salary_min, job.salary_max) {
            (None, None) => true,
            (min, max) => {
                let lo = min.or(max).unwrap_or_default();
                self.salary.overlaps(lo, max)
            }
        }
    }

    fn matches_skills(&self, job: &Job) -> bool {
        self.skills.iter().all(|wanted| {
            job.required_skills
                .iter()
                .chain(job.nice_to_have_skills.iter())
                .any(|s| s.eq_ignore_ascii_case(wanted))
        })
    }

    fn matches_job_type(&self, job: &Job) -> bool {
        self.job_types.is_empty()
            || self.job_types.iter().any(|t| t.eq_ignore_ascii_case(&job.job_type))
    }

    fn matches_recency(&self, job: &Job, now: DateTime<Utc>) -> bool {
        let Some(window) = self.posted_within.window() else {
            return true;
        };
        job.posted_at.is_some_and(|posted| now - posted <= window)
    }
}
