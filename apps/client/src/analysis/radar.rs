use std::collections::HashSet;

use serde::Serialize;

use super::difficulty::DifficultyTable;

/// One spoke of the skill-coverage radar chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RadarAxis {
    pub category: String,
    pub required: u32,
    pub matched: u32,
    pub coverage: u32,
}

/// Groups `required` by category, in first-seen order, and counts how many of
/// each group the candidate already has (exact match, like the gap computation).
pub fn radar_axes(current: &[String], required: &[String], table: &DifficultyTable) -> Vec<RadarAxis> {
    let have: HashSet<&str> = current.iter().map(String::as_str).collect();
    let mut axes: Vec<RadarAxis> = Vec::new();

    for skill in required {
        let category = &table.lookup(skill).category;
        let idx = match axes.iter().position(|a| &a.category == category) {
            Some(i) => i,
            None => {
                axes.push(RadarAxis {
                    category: category.clone(),
                    required: 0,
                    matched: 0,
                    coverage: 0,
                });
                axes.len() - 1
            }
        };
        axes[idx].required += 1;
        if have.contains(skill.as_str()) {
            axes[idx].matched += 1;
        }
    }

    for axis in &mut axes {
        axis.coverage = ((axis.matched as f64 / axis.required as f64) * 100.0).round() as u32;
    }
    axes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let axes = radar_axes(
            &skills(&["React", "CSS"]),
            &skills(&["React", "Docker", "CSS", "Kubernetes", "Git"]),
            &DifficultyTable::builtin(),
        );
        let categories: Vec<&str> = axes.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(categories, vec!["Frontend", "DevOps", "Tools"]);
        assert_eq!(axes[0].required, 2);
        assert_eq!(axes[0].matched, 2);
        assert_eq!(axes[0].coverage, 100);
        assert_eq!(axes[1].coverage, 0);
    }

    #[test]
    fn test_unknown_skills_go_to_other() {
        let axes = radar_axes(
            &skills(&["Elixir"]),
            &skills(&["Elixir", "Erlang", "OTP"]),
            &DifficultyTable::builtin(),
        );
        assert_eq!(axes.len(), 1);
        assert_eq!(axes[0].category, "Other");
        assert_eq!(axes[0].coverage, 33);
    }

    #[test]
    fn test_empty_required_has_no_axes() {
        assert!(radar_axes(&skills(&["Rust"]), &[], &DifficultyTable::builtin()).is_empty());
    }
}
