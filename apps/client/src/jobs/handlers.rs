use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::jobs::filters::FilterState;
use crate::jobs::ranking::{match_tier, sort_jobs, MatchTier, SortKey};
use crate::models::job::Job;
use crate::models::matching::{MatchBreakdown, MatchRequest, MatchWeights};
use crate::state::AppState;

/// A listing row as shown to the user.
#[derive(Debug, Serialize)]
pub struct JobView {
    #[serde(flatten)]
    pub job: Job,
    pub effective_match_score: f64,
    pub tier: MatchTier,
    pub salary_label: String,
    pub experience_label: String,
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct JobListOutcome {
    pub total: usize,
    pub shown: usize,
    pub jobs: Vec<JobView>,
}

#[derive(Debug, Serialize)]
pub struct ToggleOutcome {
    pub job_id: i64,
    pub saved: bool,
}

#[derive(Debug, Serialize)]
pub struct SavedOutcome {
    pub job_ids: Vec<i64>,
}

#[derive(Debug)]
pub struct ListOptions {
    pub filters: FilterState,
    pub sort: SortKey,
    pub saved_only: bool,
    pub limit: Option<usize>,
}

/// Filters, sorts and decorates a fetched listing. Pure so it can be tested
/// against a fixed clock.
pub fn build_listing(
    jobs: Vec<Job>,
    options: &ListOptions,
    saved_ids: &[i64],
    default_score: f64,
    now: DateTime<Utc>,
) -> JobListOutcome {
    let total = jobs.len();
    let mut kept = options.filters.apply(jobs, now);
    if options.saved_only {
        kept.retain(|j| saved_ids.contains(&j.id));
    }
    sort_jobs(&mut kept, options.sort, default_score);
    if let Some(limit) = options.limit {
        kept.truncate(limit);
    }

    let jobs: Vec<JobView> = kept
        .into_iter()
        .map(|job| {
            let score = job.effective_match_score(default_score);
            JobView {
                effective_match_score: score,
                tier: match_tier(score),
                salary_label: job.salary_range(),
                experience_label: job.experience_label(),
                saved: saved_ids.contains(&job.id),
                job,
            }
        })
        .collect();

    JobListOutcome {
        total,
        shown: jobs.len(),
        jobs,
    }
}

/// Copies matcher scores onto the listing by job id. Jobs the matcher did
/// not score keep the score they arrived with.
pub fn apply_match_scores(jobs: &mut [Job], scores: &[MatchBreakdown]) -> usize {
    let by_id: HashMap<i64, f64> = scores.iter().map(|m| (m.job_id, m.total_score)).collect();
    let mut scored = 0;
    for job in jobs.iter_mut() {
        if let Some(&score) = by_id.get(&job.id) {
            job.match_score = Some(score);
            scored += 1;
        }
    }
    scored
}

/// `jobs list [filters] [--skills S | --resume FILE] [--sort KEY] [--saved] [--limit N]`
///
/// With a candidate profile the listing is scored by the remote matcher first.
pub async fn handle_list(
    state: &AppState,
    options: &ListOptions,
    profile: Option<MatchRequest>,
) -> Result<JobListOutcome, AppError> {
    let mut jobs = state.api.list_jobs().await?;
    if let Some(request) = profile {
        let scores = handle_calculate_matches(state, request).await?;
        let scored = apply_match_scores(&mut jobs, &scores);
        info!(scored, unscored = jobs.len() - scored, "listing scored by matcher");
    }
    let outcome = build_listing(
        jobs,
        options,
        state.saved_jobs.ids(),
        state.config.default_match_score,
        Utc::now(),
    );
    info!(
        total = outcome.total,
        shown = outcome.shown,
        filtered = !options.filters.is_empty(),
        "job listing filtered"
    );
    Ok(outcome)
}

/// `jobs save <id>`: toggles the id in the saved set.
pub fn handle_toggle_save(state: &mut AppState, job_id: i64) -> Result<ToggleOutcome, AppError> {
    if job_id <= 0 {
        return Err(AppError::Validation(format!("invalid job id {job_id}")));
    }
    let saved = state.saved_jobs.toggle(job_id)?;
    Ok(ToggleOutcome { job_id, saved })
}

/// `jobs saved`
pub fn handle_saved(state: &AppState) -> SavedOutcome {
    SavedOutcome {
        job_ids: state.saved_jobs.ids().to_vec(),
    }
}

/// `jobs clear-saved`
pub fn handle_clear_saved(state: &mut AppState) -> Result<SavedOutcome, AppError> {
    let job_ids = state.saved_jobs.ids().to_vec();
    state.saved_jobs.clear()?;
    Ok(SavedOutcome { job_ids })
}

/// `match calculate`
pub async fn handle_calculate_matches(state: &AppState, request: MatchRequest) -> Result<Vec<MatchBreakdown>, AppError> {
    if request.candidate_skills.is_empty() {
        return Err(AppError::Validation(
            "at least one skill is required (use --skills or --resume)".to_string(),
        ));
    }
    if let (Some(min), Some(max)) = (request.expected_salary_min, request.expected_salary_max) {
        if min > max {
            return Err(AppError::Validation(format!(
                "salary minimum {min} exceeds maximum {max}"
            )));
        }
    }
    let mut matches = state.api.calculate_matches(&request).await?;
    matches.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    Ok(matches)
}

/// `match weights`
pub async fn handle_match_weights(state: &AppState) -> Result<MatchWeights, AppError> {
    Ok(state.api.match_weights().await?)
}
