use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::analysis::handlers::GapReport;
use crate::analysis::roles::TargetRole;
use crate::errors::AppError;
use crate::jobs::handlers::{JobListOutcome, SavedOutcome, ToggleOutcome};
use crate::models::matching::{MatchBreakdown, MatchWeights};
use crate::models::resume::SaveResumeResponse;
use crate::models::roadmap::{RoadmapResponse, SkillTaxonomy};
use crate::models::user::User;
use crate::review::confidence::ReviewReport;
use crate::review::handlers::{CorrectionOutcome, ParseOutcome};
use crate::session::handlers::{DeleteOutcome, LogoutOutcome};

/// Human-readable rendering. Types without a dedicated layout print as JSON.
pub trait Render: Serialize {
    fn render(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Writes `value` to stdout, as pretty JSON when `json` is set.
pub fn emit<T: Render>(value: &T, json: bool) -> Result<(), AppError> {
    let text = if json {
        serde_json::to_string_pretty(value)?
    } else {
        value.render()
    };
    println!("{}", text.trim_end());
    Ok(())
}

impl Render for Value {}
impl Render for MatchWeights {}
impl Render for SkillTaxonomy {}

impl Render for User {
    fn render(&self) -> String {
        let mut out = format!("{} <{}> (id {})", self.name, self.email, self.id);
        if let Some(city) = &self.city {
            let _ = write!(out, ", {city}");
        }
        if let Some(photo) = &self.profile_photo {
            let _ = write!(out, "\nProfile photo: {photo}");
        }
        if let Some(photo) = &self.cover_photo {
            let _ = write!(out, "\nCover photo: {photo}");
        }
        out
    }
}

impl Render for LogoutOutcome {
    fn render(&self) -> String {
        if self.was_logged_in {
            "Logged out.".to_string()
        } else {
            "No active session.".to_string()
        }
    }
}

impl Render for DeleteOutcome {
    fn render(&self) -> String {
        format!("Account {} deleted. Saved jobs were kept.", self.email)
    }
}

impl Render for SaveResumeResponse {
    fn render(&self) -> String {
        format!("{} (candidate {})", self.message, self.candidate_id)
    }
}

impl Render for ReviewReport {
    fn render(&self) -> String {
        let mut out = format!("Overall confidence: {}%\n", self.overall_confidence);
        if self.overall_warning {
            out.push_str("Low overall confidence: review every field carefully.\n");
        }
        if self.is_clean() {
            let _ = writeln!(out, "All {} fields look good.", self.total_fields);
            return out;
        }
        let _ = writeln!(
            out,
            "{} of {} fields need review:",
            self.flagged.len(),
            self.total_fields
        );
        for field in &self.flagged {
            let _ = writeln!(
                out,
                "  {:<24} {:>3}% {:<6}  {}",
                field.path,
                field.confidence,
                field.tier.label(),
                field.display
            );
        }
        out
    }
}

impl Render for ParseOutcome {
    fn render(&self) -> String {
        let mut out = format!(
            "Parsed résumé for {}\n",
            self.resume.full_name.display_value()
        );
        out.push_str(&self.review.render());
        if let Some(saved) = &self.saved {
            let _ = writeln!(out, "{}", saved.render());
        }
        out
    }
}

impl Render for CorrectionOutcome {
    fn render(&self) -> String {
        let mut out = format!("Updated {}.\n", self.field);
        out.push_str(&self.review.render());
        if let Some(saved) = &self.saved {
            let _ = writeln!(out, "{}", saved.render());
        }
        out
    }
}

impl Render for Vec<TargetRole> {
    fn render(&self) -> String {
        let mut out = String::new();
        for role in self {
            let _ = writeln!(
                out,
                "{} ({})\n  {}",
                role.name,
                role.typical_experience,
                role.required_skills.join(", ")
            );
        }
        out
    }
}

impl Render for GapReport {
    fn render(&self) -> String {
        let mut out = format!(
            "{} ({})\nReadiness {}%  gap {}%\n",
            self.role, self.typical_experience, self.gap.readiness_score, self.gap.gap_percentage
        );
        let _ = writeln!(out, "Have:    {}", self.gap.matched.join(", "));
        let _ = writeln!(out, "Missing: {}", self.gap.missing.join(", "));
        if self.phases.is_empty() {
            out.push_str("Nothing left to learn for this role.\n");
        } else {
            let _ = writeln!(out, "\nRoadmap (about {} months):", self.total_months);
            for (i, phase) in self.phases.iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  {}. {} ({} mo): {}",
                    i + 1,
                    phase.title,
                    phase.duration_months,
                    phase.skills.join(", ")
                );
            }
        }
        if !self.estimated.is_empty() {
            let _ = writeln!(out, "  (rough estimate for: {})", self.estimated.join(", "));
        }
        out.push_str("\nCoverage:\n");
        for axis in &self.radar {
            let _ = writeln!(
                out,
                "  {:<14} {:>3}% ({}/{})",
                axis.category, axis.coverage, axis.matched, axis.required
            );
        }
        out
    }
}

impl Render for RoadmapResponse {
    fn render(&self) -> String {
        let mut out = format!(
            "{} at {}: {:.0}% → {:.0}% in about {:.0} weeks\n",
            self.target_job,
            self.target_company,
            self.current_match_score,
            self.projected_match_score,
            self.total_estimated_weeks
        );
        for phase in &self.phases {
            let names: Vec<&str> = phase.skills.iter().map(|s| s.name.as_str()).collect();
            let _ = writeln!(
                out,
                "  Phase {}: {} ({:.0} wk) {}",
                phase.phase_number,
                phase.title,
                phase.total_weeks,
                names.join(", ")
            );
        }
        if !self.summary.is_empty() {
            let _ = writeln!(out, "{}", self.summary);
        }
        out
    }
}

impl Render for Vec<MatchBreakdown> {
    fn render(&self) -> String {
        if self.is_empty() {
            return "No jobs to match against.".to_string();
        }
        let mut out = String::new();
        for m in self {
            let _ = writeln!(
                out,
                "{:>5.1}  {:<9} #{} {} @ {} ({}) {}",
                m.total_score, m.match_tier, m.job_id, m.job_title, m.company, m.location, m.salary_range
            );
            if !m.missing_required_skills.is_empty() {
                let _ = writeln!(out, "       missing: {}", m.missing_required_skills.join(", "));
            }
        }
        out
    }
}

impl Render for JobListOutcome {
    fn render(&self) -> String {
        let mut out = format!("{} of {} jobs\n", self.shown, self.total);
        for view in &self.jobs {
            let job = &view.job;
            let location = if job.is_remote {
                format!("{} / Remote", job.location)
            } else {
                job.location.clone()
            };
            let _ = writeln!(
                out,
                "{} #{:<4} {:>3.0}% {:<9} {} @ {}, {} | {} | {}",
                if view.saved { '*' } else { ' ' },
                job.id,
                view.effective_match_score,
                view.tier.to_string(),
                job.title,
                job.company,
                location,
                view.salary_label,
                view.experience_label
            );
        }
        out
    }
}

impl Render for ToggleOutcome {
    fn render(&self) -> String {
        if self.saved {
            format!("Saved job {}.", self.job_id)
        } else {
            format!("Removed job {} from saved jobs.", self.job_id)
        }
    }
}

impl Render for SavedOutcome {
    fn render(&self) -> String {
        if self.job_ids.is_empty() {
            return "No saved jobs.".to_string();
        }
        let ids: Vec<String> = self.job_ids.iter().map(i64::to_string).collect();
        format!("Saved jobs: {}", ids.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::difficulty::DifficultyTable;
    use crate::analysis::gap::compute_gap;
    use crate::analysis::roadmap::{build_phases, total_months};
    use crate::models::resume::fixtures::sample_resume;
    use crate::review::confidence::review_resume;

    #[test]
    fn test_review_lists_flagged_fields() {
        let text = review_resume(&sample_resume()).render();
        assert!(text.starts_with("Overall confidence: 74%"));
        assert!(text.contains("4 of 10 fields need review"));
        assert!(text.contains("skills[2]"));
        assert!(!text.contains("review every field carefully"));
    }

    #[test]
    fn test_gap_report_text() {
        let required: Vec<String> = ["React", "Node.js", "AWS"].iter().map(|s| s.to_string()).collect();
        let current = vec!["React".to_string()];
        let gap = compute_gap(&current, &required);
        let table = DifficultyTable::builtin();
        let phases = build_phases(&gap.missing, &table);
        let report = GapReport {
            role: "Full Stack Developer".to_string(),
            typical_experience: "3-5 years".to_string(),
            total_months: total_months(&phases),
            estimated: vec![],
            radar: vec![],
            gap,
            phases,
        };
        let text = report.render();
        assert!(text.contains("Readiness 33%  gap 67%"));
        assert!(text.contains("1. Core Skills (2 mo): Node.js"));
        assert!(text.contains("2. Advanced Topics (3 mo): AWS"));
    }

    #[test]
    fn test_saved_outcome_text() {
        assert_eq!(SavedOutcome { job_ids: vec![] }.render(), "No saved jobs.");
        assert_eq!(SavedOutcome { job_ids: vec![3, 9] }.render(), "Saved jobs: 3, 9");
    }

    #[test]
    fn test_default_render_is_json() {
        let value = serde_json::json!({"status": "healthy"});
        assert!(value.render().contains("\"status\": \"healthy\""));
    }
}
