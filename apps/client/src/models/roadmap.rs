use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LearningPace {
    Intensive,
    #[default]
    Moderate,
    Relaxed,
}

impl FromStr for LearningPace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "intensive" => Ok(Self::Intensive),
            "moderate" => Ok(Self::Moderate),
            "relaxed" => Ok(Self::Relaxed),
            other => Err(format!(
                "unknown pace '{other}' (expected intensive, moderate or relaxed)"
            )),
        }
    }
}

impl fmt::Display for LearningPace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Intensive => "intensive",
            Self::Moderate => "moderate",
            Self::Relaxed => "relaxed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapRequest {
    pub current_skills: Vec<String>,
    pub target_job_id: i64,
    pub learning_pace: LearningPace,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(default)]
    pub url: Option<String>,
    pub provider: String,
    pub estimated_hours: u32,
    pub is_free: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillNode {
    pub name: String,
    pub category: String,
    pub difficulty: u8,
    pub estimated_weeks: f64,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub resources: Vec<LearningResource>,
    #[serde(default)]
    pub why_needed: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningPhase {
    pub phase_number: u32,
    pub title: String,
    pub description: String,
    pub skills: Vec<SkillNode>,
    pub total_weeks: f64,
    pub milestone: String,
}

/// Remote roadmap from `POST /api/roadmap/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapResponse {
    pub target_job: String,
    pub target_company: String,
    pub current_match_score: f64,
    pub projected_match_score: f64,
    pub missing_skills_count: u32,
    pub phases: Vec<LearningPhase>,
    pub total_estimated_weeks: f64,
    pub total_estimated_hours: u32,
    pub summary: String,
    pub motivation_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub estimated_weeks: Option<f64>,
}

/// `GET /api/roadmap/skills`, keyed by lowercase skill name.
pub type SkillTaxonomy = BTreeMap<String, TaxonomyEntry>;
