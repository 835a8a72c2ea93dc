use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single extracted value paired with the parser's confidence (0–100).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedField {
    pub value: Value,
    pub confidence: u8,
}

impl ExtractedField {
    pub fn new(value: impl Into<Value>, confidence: u8) -> Self {
        Self {
            value: value.into(),
            confidence,
        }
    }

    /// Renders the value for display. Strings are shown without quotes; null is empty.
    pub fn display_value(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub institute: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub cgpa: Option<f64>,
    #[serde(default)]
    pub confidence: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub confidence: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEntry {
    pub title: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub confidence: u8,
}

/// Résumé as returned by `POST /api/resume/parse` and accepted by the save endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParsedResume {
    #[serde(default)]
    pub id: Option<i64>,
    pub full_name: ExtractedField,
    pub email: ExtractedField,
    pub phone: ExtractedField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ExtractedField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_role: Option<ExtractedField>,
    pub years_of_experience: ExtractedField,
    #[serde(default)]
    pub skills: Vec<ExtractedField>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub work_experience: Vec<WorkExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub preferred_roles: Vec<String>,
    #[serde(default)]
    pub expected_salary: Option<i64>,
    pub overall_confidence: u8,
    #[serde(default)]
    pub raw_text: String,
}

impl ParsedResume {
    /// Skill names in extraction order. Non-string values are skipped.
    pub fn skill_names(&self) -> Vec<String> {
        self.skills
            .iter()
            .filter_map(|s| s.value.as_str().map(str::to_string))
            .collect()
    }

    pub fn years_of_experience(&self) -> f64 {
        match &self.years_of_experience.value {
            Value::Number(n) => n.as_f64().unwrap_or(0.0),
            Value::String(s) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// A user correction for one parsed field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub field_name: String,
    pub corrected_value: Value,
}

/// `POST /api/resume/save/{id}` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResumeResponse {
    pub message: String,
    pub candidate_id: i64,
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_resume;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_skill_names_preserve_order() {
        assert_eq!(sample_resume().skill_names(), vec!["React", "Docker", "GraphQL"]);
    }

    #[test]
    fn test_years_of_experience_accepts_string() {
        let mut resume = sample_resume();
        resume.years_of_experience = ExtractedField::new("4", 80);
        assert_eq!(resume.years_of_experience(), 4.0);
    }

    #[test]
    fn test_deserialize_server_payload_without_optional_sections() {
        let payload = json!({
            "full_name": {"value": "Ravi", "confidence": 90},
            "email": {"value": "ravi@example.com", "confidence": 95},
            "phone": {"value": null, "confidence": 0},
            "years_of_experience": {"value": 2, "confidence": 60},
            "skills": [{"value": "Python", "confidence": 88}],
            "education": [],
            "work_experience": [],
            "overall_confidence": 71,
            "raw_text": "Ravi ..."
        });
        let resume: ParsedResume = serde_json::from_value(payload).unwrap();
        assert!(resume.location.is_none());
        assert!(resume.projects.is_empty());
        assert_eq!(resume.phone.display_value(), "");
        assert_eq!(resume.skill_names(), vec!["Python"]);
    }
}
