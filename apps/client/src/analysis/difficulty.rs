//! Per-skill difficulty and learning-time lookup.
//!
//! The built-in estimates can be overlaid with the remote skill taxonomy.
//! Skills missing from both use a configurable fallback.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::roadmap::SkillTaxonomy;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Maps the taxonomy's 1–5 scale onto three buckets.
    pub fn from_level(level: u8) -> Self {
        match level {
            0..=2 => Self::Easy,
            3 => Self::Medium,
            _ => Self::Hard,
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, medium or hard)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillProfile {
    pub difficulty: Difficulty,
    pub months: u32,
    pub category: String,
}

pub const FALLBACK_DIFFICULTY: Difficulty = Difficulty::Medium;
pub const FALLBACK_MONTHS: u32 = 2;
pub const FALLBACK_CATEGORY: &str = "Other";

const BUILTIN_SKILLS: &[(&str, Difficulty, u32, &str)] = &[
    ("Git", Difficulty::Easy, 1, "Tools"),
    ("HTML", Difficulty::Easy, 1, "Frontend"),
    ("CSS", Difficulty::Easy, 1, "Frontend"),
    ("JavaScript", Difficulty::Medium, 2, "Programming"),
    ("TypeScript", Difficulty::Medium, 2, "Programming"),
    ("Python", Difficulty::Easy, 2, "Programming"),
    ("Java", Difficulty::Medium, 3, "Programming"),
    ("Go", Difficulty::Medium, 3, "Programming"),
    ("React", Difficulty::Medium, 3, "Frontend"),
    ("Vue", Difficulty::Medium, 2, "Frontend"),
    ("Angular", Difficulty::Medium, 3, "Frontend"),
    ("Node.js", Difficulty::Medium, 2, "Backend"),
    ("Express", Difficulty::Easy, 1, "Backend"),
    ("FastAPI", Difficulty::Easy, 1, "Backend"),
    ("REST APIs", Difficulty::Easy, 1, "Backend"),
    ("GraphQL", Difficulty::Medium, 2, "Backend"),
    ("System Design", Difficulty::Hard, 4, "Backend"),
    ("SQL", Difficulty::Easy, 1, "Database"),
    ("PostgreSQL", Difficulty::Medium, 2, "Database"),
    ("MongoDB", Difficulty::Easy, 1, "Database"),
    ("Redis", Difficulty::Easy, 1, "Database"),
    ("Linux", Difficulty::Medium, 2, "DevOps"),
    ("Docker", Difficulty::Medium, 2, "DevOps"),
    ("CI/CD", Difficulty::Medium, 2, "DevOps"),
    ("Kubernetes", Difficulty::Hard, 4, "DevOps"),
    ("Terraform", Difficulty::Hard, 3, "DevOps"),
    ("AWS", Difficulty::Hard, 3, "Cloud"),
    ("Pandas", Difficulty::Easy, 1, "Data"),
    ("Statistics", Difficulty::Medium, 3, "Data"),
    ("Machine Learning", Difficulty::Hard, 6, "Data"),
    ("TensorFlow", Difficulty::Hard, 4, "Data"),
    ("Spark", Difficulty::Hard, 4, "Data"),
    ("Swift", Difficulty::Medium, 3, "Mobile"),
    ("Kotlin", Difficulty::Medium, 3, "Mobile"),
    ("React Native", Difficulty::Medium, 3, "Mobile"),
    ("Flutter", Difficulty::Medium, 3, "Mobile"),
];

/// Skill → profile lookup. Keys are matched exactly first, then ignoring case.
#[derive(Debug, Clone)]
pub struct DifficultyTable {
    entries: HashMap<String, SkillProfile>,
    fallback: SkillProfile,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DifficultyTable {
    pub fn builtin() -> Self {
        let entries = BUILTIN_SKILLS
            .iter()
            .map(|(name, difficulty, months, category)| {
                (
                    (*name).to_string(),
                    SkillProfile {
                        difficulty: *difficulty,
                        months: *months,
                        category: (*category).to_string(),
                    },
                )
            })
            .collect();
        Self {
            entries,
            fallback: SkillProfile {
                difficulty: FALLBACK_DIFFICULTY,
                months: FALLBACK_MONTHS,
                category: FALLBACK_CATEGORY.to_string(),
            },
        }
    }

    pub fn with_fallback(mut self, difficulty: Difficulty, months: u32) -> Self {
        self.fallback.difficulty = difficulty;
        self.fallback.months = months;
        self
    }

    /// Overlays entries from the remote taxonomy. Weeks round up to whole months.
    /// Taxonomy keys are lowercase, so an existing entry with the same name
    /// (ignoring case) is updated in place rather than duplicated.
    pub fn merge_taxonomy(&mut self, taxonomy: &SkillTaxonomy) {
        for (skill, entry) in taxonomy {
            let existing_key = self
                .entries
                .keys()
                .find(|k| k.eq_ignore_ascii_case(skill))
                .cloned();
            let base = existing_key
                .as_ref()
                .and_then(|k| self.entries.get(k))
                .cloned()
                .unwrap_or_else(|| self.fallback.clone());

            let profile = SkillProfile {
                difficulty: entry
                    .difficulty
                    .map(Difficulty::from_level)
                    .unwrap_or(base.difficulty),
                months: entry
                    .estimated_weeks
                    .map(|w| ((w / 4.0).ceil() as u32).max(1))
                    .unwrap_or(base.months),
                category: entry.category.clone().unwrap_or(base.category),
            };
            self.entries
                .insert(existing_key.unwrap_or_else(|| skill.clone()), profile);
        }
    }

    pub fn lookup(&self, skill: &str) -> &SkillProfile {
        self.entries
            .get(skill)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(skill))
                    .map(|(_, v)| v)
            })
            .unwrap_or(&self.fallback)
    }

    pub fn is_known(&self, skill: &str) -> bool {
        !std::ptr::eq(self.lookup(skill), &self.fallback)
    }
}
