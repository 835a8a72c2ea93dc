//! Difficulty-bucketed learning phases for a set of missing skills.

use serde::Serialize;

use super::difficulty::{Difficulty, DifficultyTable};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoadmapPhase {
    pub title: &'static str,
    pub difficulty: Difficulty,
    pub skills: Vec<String>,
    /// Longest single skill in the bucket; skills in a phase are learned in parallel.
    pub duration_months: u32,
}

pub const PHASES: [(Difficulty, &str); 3] = [
    (Difficulty::Easy, "Quick Wins"),
    (Difficulty::Medium, "Core Skills"),
    (Difficulty::Hard, "Advanced Topics"),
];

/// Buckets `missing` by difficulty. Phases keep the order Easy, Medium, Hard
/// and skills keep their input order; empty phases are dropped.
pub fn build_phases(missing: &[String], table: &DifficultyTable) -> Vec<RoadmapPhase> {
    PHASES
        .iter()
        .filter_map(|&(difficulty, title)| {
            let mut skills = Vec::new();
            let mut duration_months = 0;
            for skill in missing {
                let profile = table.lookup(skill);
                if profile.difficulty == difficulty {
                    skills.push(skill.clone());
                    duration_months = duration_months.max(profile.months);
                }
            }
            (!skills.is_empty()).then(|| RoadmapPhase {
                title,
                difficulty,
                skills,
                duration_months,
            })
        })
        .collect()
}

/// Upper bound when phases are worked through one after another.
pub fn total_months(phases: &[RoadmapPhase]) -> u32 {
    phases.iter().map(|p| p.duration_months).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_missing_skills_yields_no_phases() {
        assert!(build_phases(&[], &DifficultyTable::builtin()).is_empty());
    }

    #[test]
    fn test_git_and_kubernetes() {
        let phases = build_phases(&skills(&["Git", "Kubernetes"]), &DifficultyTable::builtin());
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].title, "Quick Wins");
        assert_eq!(phases[0].skills, vec!["Git"]);
        assert_eq!(phases[0].duration_months, 1);
        assert_eq!(phases[1].title, "Advanced Topics");
        assert_eq!(phases[1].skills, vec!["Kubernetes"]);
        assert_eq!(phases[1].duration_months, 4);
        assert_eq!(total_months(&phases), 5);
    }

    #[test]
    fn test_duration_is_max_not_sum() {
        // Kubernetes 4, AWS 3, Machine Learning 6.
        let phases = build_phases(
            &skills(&["Kubernetes", "AWS", "Machine Learning"]),
            &DifficultyTable::builtin(),
        );
        assert_eq!(phases.len(), 1);
        assert_eq!(phases[0].duration_months, 6);
        assert_eq!(phases[0].skills, vec!["Kubernetes", "AWS", "Machine Learning"]);
    }

    #[test]
    fn test_unknown_skill_lands_in_core_skills() {
        let phases = build_phases(&skills(&["Elixir"]), &DifficultyTable::builtin());
        assert_eq!(phases[0].title, "Core Skills");
        assert_eq!(phases[0].duration_months, 2);
    }

    #[test]
    fn test_fallback_is_configurable() {
        let table = DifficultyTable::builtin().with_fallback(Difficulty::Easy, 1);
        let phases = build_phases(&skills(&["Elixir"]), &table);
        assert_eq!(phases[0].title, "Quick Wins");
    }
}
