use serde::{Deserialize, Serialize};

use crate::models::resume::{ExtractedField, ParsedResume};

/// Fields scored below this are highlighted for review. 70 itself is acceptable.
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 70;
/// Below this a field is shown as a low-confidence badge rather than medium.
pub const VERY_LOW_CONFIDENCE_THRESHOLD: u8 = 40;
/// An overall parse score below this triggers the "review carefully" warning.
pub const OVERALL_WARNING_THRESHOLD: u8 = 60;

pub fn needs_review(confidence: u8) -> bool {
    confidence < LOW_CONFIDENCE_THRESHOLD
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    pub fn classify(confidence: u8) -> Self {
        match confidence {
            c if c >= LOW_CONFIDENCE_THRESHOLD => Self::High,
            c if c >= VERY_LOW_CONFIDENCE_THRESHOLD => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldReview {
    /// Dotted path such as `email` or `skills[2]`.
    pub path: String,
    pub display: String,
    pub confidence: u8,
    pub tier: ConfidenceTier,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    pub overall_confidence: u8,
    pub overall_warning: bool,
    pub flagged: Vec<FieldReview>,
    pub total_fields: usize,
}

impl ReviewReport {
    pub fn is_clean(&self) -> bool {
        self.flagged.is_empty() && !self.overall_warning
    }
}

/// Walks every confidence-scored field and collects the ones needing review.
pub fn review_resume(resume: &ParsedResume) -> ReviewReport {
    let mut scored: Vec<(String, String, u8)> = Vec::new();

    let mut push_field = |path: &str, field: &ExtractedField| {
        scored.push((path.to_string(), field.display_value(), field.confidence));
    };
    push_field("full_name", &resume.full_name);
    push_field("email", &resume.email);
    push_field("phone", &resume.phone);
    if let Some(location) = &resume.location {
        push_field("location", location);
    }
    if let Some(role) = &resume.current_role {
        push_field("current_role", role);
    }
    push_field("years_of_experience", &resume.years_of_experience);
    for (i, skill) in resume.skills.iter().enumerate() {
        push_field(&format!("skills[{i}]"), skill);
    }

    for (i, edu) in resume.education.iter().enumerate() {
        let display = [edu.degree.as_deref(), edu.institute.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");
        scored.push((format!("education[{i}]"), display, edu.confidence));
    }
    for (i, work) in resume.work_experience.iter().enumerate() {
        scored.push((
            format!("work_experience[{i}]"),
            format!("{} at {}", work.title, work.company),
            work.confidence,
        ));
    }
    for (i, project) in resume.projects.iter().enumerate() {
        scored.push((format!("projects[{i}]"), project.title.clone(), project.confidence));
    }

    let total_fields = scored.len();
    let flagged = scored
        .into_iter()
        .filter(|(_, _, confidence)| needs_review(*confidence))
        .map(|(path, display, confidence)| FieldReview {
            path,
            display,
            confidence,
            tier: ConfidenceTier::classify(confidence),
        })
        .collect();

    ReviewReport {
        overall_confidence: resume.overall_confidence,
        overall_warning: resume.overall_confidence < OVERALL_WARNING_THRESHOLD,
        flagged,
        total_fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::sample_resume;

    #[test]
    fn test_seventy_is_acceptable() {
        assert!(!needs_review(70));
        assert!(needs_review(69));
        assert_eq!(ConfidenceTier::classify(70), ConfidenceTier::High);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(ConfidenceTier::classify(100), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::classify(69), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::classify(40), ConfidenceTier::Medium);
        assert_eq!(ConfidenceTier::classify(39), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::classify(0), ConfidenceTier::Low);
    }

    #[test]
    fn test_review_flags_low_fields_only() {
        let report = review_resume(&sample_resume());
        let paths: Vec<&str> = report.flagged.iter().map(|f| f.path.as_str()).collect();
        // phone 65, years 55, GraphQL 35, work 60; Docker at exactly 70 is not flagged
        assert_eq!(
            paths,
            vec!["phone", "years_of_experience", "skills[2]", "work_experience[0]"]
        );
        assert_eq!(report.flagged[2].tier, ConfidenceTier::Low);
        assert_eq!(report.total_fields, 10);
        assert!(!report.overall_warning);
    }

    #[test]
    fn test_overall_warning_below_sixty() {
        let mut resume = sample_resume();
        resume.overall_confidence = 59;
        assert!(review_resume(&resume).overall_warning);
        resume.overall_confidence = 60;
        assert!(!review_resume(&resume).overall_warning);
    }

    #[test]
    fn test_clean_report() {
        let mut resume = sample_resume();
        resume.phone.confidence = 90;
        resume.years_of_experience.confidence = 90;
        resume.skills.truncate(2);
        resume.work_experience[0].confidence = 75;
        assert!(review_resume(&resume).is_clean());
    }
}
