//! Skill-gap computation.
//!
//! Exact, case-sensitive set difference between a candidate's skills and a
//! role's required skills. Output order follows `required`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GapAnalysis {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub gap_percentage: u32,
    pub readiness_score: u32,
}

pub fn compute_gap(current: &[String], required: &[String]) -> GapAnalysis {
    let have: HashSet<&str> = current.iter().map(String::as_str).collect();
    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|skill| have.contains(skill.as_str()));

    // An empty requirement list means nothing is missing.
    let gap_percentage = if required.is_empty() {
        0
    } else {
        ((missing.len() as f64 / required.len() as f64) * 100.0).round() as u32
    };

    GapAnalysis {
        matched,
        missing,
        gap_percentage,
        readiness_score: 100 - gap_percentage,
    }
}
