use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/match/calculate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    pub candidate_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_location: Option<String>,
    pub candidate_experience_years: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_salary_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_salary_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
}

/// Per-job match breakdown computed by the remote matcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub job_id: i64,
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub salary_range: String,
    pub total_score: f64,
    pub match_tier: String,
    pub skills_score: f64,
    pub location_score: f64,
    pub salary_score: f64,
    pub experience_score: f64,
    pub role_score: f64,
    #[serde(default)]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub missing_required_skills: Vec<String>,
    #[serde(default)]
    pub missing_optional_skills: Vec<String>,
    pub skill_match_percentage: f64,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub top_reason_for_match: String,
    #[serde(default)]
    pub top_area_to_improve: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightInfo {
    pub percentage: u32,
    pub description: String,
}

/// `GET /api/match/weights`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchWeights {
    pub weights: BTreeMap<String, WeightInfo>,
    #[serde(default)]
    pub tiers: BTreeMap<String, u32>,
}
