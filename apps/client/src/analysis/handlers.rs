use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::gap::{compute_gap, GapAnalysis};
use crate::analysis::radar::{radar_axes, RadarAxis};
use crate::analysis::roadmap::{build_phases, total_months, RoadmapPhase};
use crate::analysis::roles::{builtin_roles, find_role, TargetRole};
use crate::errors::AppError;
use crate::models::resume::ParsedResume;
use crate::models::roadmap::{LearningPace, RoadmapRequest, RoadmapResponse, SkillTaxonomy};
use crate::review::handlers::read_resume;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GapReport {
    pub role: String,
    pub typical_experience: String,
    #[serde(flatten)]
    pub gap: GapAnalysis,
    pub phases: Vec<RoadmapPhase>,
    pub total_months: u32,
    /// Missing skills with no difficulty entry; their estimates are the fallback.
    pub estimated: Vec<String>,
    pub radar: Vec<RadarAxis>,
}

/// Skills given on the command line, followed by any from the résumé that
/// are not already listed.
pub fn merge_skills(explicit: Vec<String>, resume: Option<&ParsedResume>) -> Vec<String> {
    let mut skills: Vec<String> = explicit
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    for skill in resume.map(ParsedResume::skill_names).unwrap_or_default() {
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    skills
}

pub async fn collect_skills(explicit: Vec<String>, resume: Option<&Path>) -> Result<Vec<String>, AppError> {
    let resume = match resume {
        Some(path) => Some(read_resume(path).await?),
        None => None,
    };
    Ok(merge_skills(explicit, resume.as_ref()))
}

/// `gap --role NAME --skills ... [--taxonomy]`
///
/// With `use_taxonomy`, the remote skill taxonomy refines difficulty and
/// duration. A taxonomy fetch failure falls back to the built-in table.
pub async fn handle_gap(
    state: &AppState,
    role_name: &str,
    skills: &[String],
    use_taxonomy: bool,
) -> Result<GapReport, AppError> {
    let role = find_role(role_name).ok_or_else(|| AppError::NotFound(format!("role '{role_name}'")))?;

    let mut table = state.difficulty.clone();
    if use_taxonomy {
        match state.api.skill_taxonomy().await {
            Ok(taxonomy) => table.merge_taxonomy(&taxonomy),
            Err(e) => warn!("skill taxonomy unavailable, using built-in difficulties: {e}"),
        }
    }

    let gap = compute_gap(skills, &role.required_skills);
    let phases = build_phases(&gap.missing, &table);
    info!(
        role = %role.name,
        missing = gap.missing.len(),
        phases = phases.len(),
        "gap analysis computed"
    );

    let estimated = gap
        .missing
        .iter()
        .filter(|s| !table.is_known(s))
        .cloned()
        .collect();

    Ok(GapReport {
        estimated,
        radar: radar_axes(skills, &role.required_skills, &table),
        total_months: total_months(&phases),
        role: role.name,
        typical_experience: role.typical_experience,
        gap,
        phases,
    })
}

/// `roles`
pub fn handle_roles() -> Vec<TargetRole> {
    builtin_roles()
}

/// `roadmap generate --job ID --skills ... [--pace]`
pub async fn handle_generate_roadmap(
    state: &AppState,
    job_id: i64,
    skills: Vec<String>,
    pace: LearningPace,
) -> Result<RoadmapResponse, AppError> {
    let request = RoadmapRequest {
        current_skills: skills,
        target_job_id: job_id,
        learning_pace: pace,
    };
    Ok(state.api.generate_roadmap(&request).await?)
}

/// `roadmap skills`
pub async fn handle_skill_taxonomy(state: &AppState) -> Result<SkillTaxonomy, AppError> {
    Ok(state.api.skill_taxonomy().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{routing::get, Json, Router};
    use serde_json::json;

    use crate::api_client::stub;
    use crate::config::test_config;
    use crate::models::resume::fixtures::sample_resume;
    use crate::session::store::MemoryStore;

    fn state(base: &str) -> AppState {
        AppState::with_store(test_config(base), Arc::new(MemoryStore::default())).unwrap()
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_gap_report_for_devops() {
        let state = state("http://127.0.0.1:9");
        let report = handle_gap(&state, "devops engineer", &skills(&["Linux", "Docker", "Git"]), false)
            .await
            .unwrap();

        assert_eq!(report.role, "DevOps Engineer");
        assert_eq!(report.gap.matched, vec!["Linux", "Docker", "Git"]);
        assert_eq!(report.gap.missing, vec!["Kubernetes", "AWS", "Terraform", "CI/CD"]);
        assert_eq!(report.gap.gap_percentage, 57);
        let titles: Vec<&str> = report.phases.iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["Core Skills", "Advanced Topics"]);
        assert_eq!(report.phases[1].duration_months, 4);
        assert_eq!(report.total_months, 6);
        assert!(report.estimated.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_role_is_not_found() {
        let state = state("http://127.0.0.1:9");
        let err = handle_gap(&state, "Astronaut", &[], false).await.unwrap_err();
        assert_eq!(err.exit_code(), 5);
    }

    #[tokio::test]
    async fn test_taxonomy_overrides_builtin_difficulty() {
        let router = Router::new().route(
            "/api/roadmap/skills",
            get(|| async {
                Json(json!({
                    "kubernetes": {"category": "DevOps", "difficulty": 2, "prerequisites": ["docker"], "estimated_weeks": 3}
                }))
            }),
        );
        let base = stub::spawn(router).await;
        let state = state(&base);

        let report = handle_gap(
            &state,
            "DevOps Engineer",
            &skills(&["Linux", "Docker", "Git", "AWS", "Terraform", "CI/CD"]),
            true,
        )
        .await
        .unwrap();
        assert_eq!(report.phases.len(), 1);
        assert_eq!(report.phases[0].title, "Quick Wins");
        assert_eq!(report.phases[0].duration_months, 1);
    }

    #[tokio::test]
    async fn test_taxonomy_failure_falls_back() {
        let state = state("http://127.0.0.1:9");
        let report = handle_gap(&state, "Frontend Developer", &skills(&["HTML"]), true)
            .await
            .unwrap();
        assert!(!report.phases.is_empty());
    }

    #[tokio::test]
    async fn test_collect_skills_merges_resume_without_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.json");
        std::fs::write(&path, serde_json::to_string(&sample_resume()).unwrap()).unwrap();

        let collected = collect_skills(skills(&["Docker", " Go "]), Some(path.as_path())).await.unwrap();
        assert_eq!(collected, vec!["Docker", "Go", "React", "GraphQL"]);
    }

    #[test]
    fn test_roles_listed() {
        assert_eq!(handle_roles().len(), 6);
    }
}
