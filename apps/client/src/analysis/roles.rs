use serde::{Deserialize, Serialize};

/// A comparison baseline for gap analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetRole {
    pub name: String,
    pub required_skills: Vec<String>,
    pub typical_experience: String,
}

const BUILTIN_ROLES: &[(&str, &[&str], &str)] = &[
    (
        "Frontend Developer",
        &["HTML", "CSS", "JavaScript", "TypeScript", "React", "Git"],
        "1-3 years",
    ),
    (
        "Backend Developer",
        &["Python", "Node.js", "SQL", "PostgreSQL", "REST APIs", "Docker", "Git"],
        "2-4 years",
    ),
    (
        "Full Stack Developer",
        &["JavaScript", "React", "Node.js", "SQL", "REST APIs", "Docker", "AWS", "Git"],
        "3-5 years",
    ),
    (
        "Data Scientist",
        &["Python", "SQL", "Pandas", "Statistics", "Machine Learning", "TensorFlow"],
        "2-4 years",
    ),
    (
        "DevOps Engineer",
        &["Linux", "Docker", "Kubernetes", "AWS", "Terraform", "CI/CD", "Git"],
        "3-5 years",
    ),
    (
        "Mobile Developer",
        &["Swift", "Kotlin", "React Native", "Flutter", "REST APIs", "Git"],
        "2-4 years",
    ),
];

pub fn builtin_roles() -> Vec<TargetRole> {
    BUILTIN_ROLES
        .iter()
        .map(|(name, skills, experience)| TargetRole {
            name: (*name).to_string(),
            required_skills: skills.iter().map(|s| (*s).to_string()).collect(),
            typical_experience: (*experience).to_string(),
        })
        .collect()
}

/// Looks a role up by name, ignoring case and surrounding whitespace.
pub fn find_role(name: &str) -> Option<TargetRole> {
    let wanted = name.trim();
    builtin_roles()
        .into_iter()
        .find(|r| r.name.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_role_case_insensitive() {
        let role = find_role("  devops engineer ").unwrap();
        assert_eq!(role.name, "DevOps Engineer");
        assert!(role.required_skills.contains(&"Kubernetes".to_string()));
    }

    #[test]
    fn test_unknown_role() {
        assert!(find_role("Astronaut").is_none());
    }

    #[test]
    fn test_every_role_has_skills() {
        assert!(builtin_roles().iter().all(|r| !r.required_skills.is_empty()));
    }

    #[test]
    fn test_role_skills_have_difficulty_entries() {
        let table = crate::analysis::difficulty::DifficultyTable::builtin();
        for role in builtin_roles() {
            for skill in &role.required_skills {
                assert!(table.is_known(skill), "{} lists unknown skill {skill}", role.name);
            }
        }
    }
}
