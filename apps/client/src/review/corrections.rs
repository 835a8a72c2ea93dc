use serde_json::Value;

use crate::models::resume::{ExtractedField, ParsedResume, ProfileUpdate};
use crate::review::validation::{validate_email, ValidationError};

/// A value the user typed in is fully trusted.
pub const CONFIRMED_CONFIDENCE: u8 = 100;

pub const CORRECTABLE_FIELDS: &[&str] = &[
    "full_name",
    "email",
    "phone",
    "location",
    "current_role",
    "years_of_experience",
    "skills",
    "preferred_locations",
    "preferred_roles",
    "expected_salary",
];

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn confirmed(value: Value) -> ExtractedField {
    ExtractedField::new(value, CONFIRMED_CONFIDENCE)
}

/// Accepts a JSON array of strings, or a comma-separated string.
fn string_list(field: &str, value: &Value) -> Result<Vec<String>, ValidationError> {
    let items: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_str()
                    .map(|s| s.trim().to_string())
                    .ok_or_else(|| invalid(field, "expected a list of strings"))
            })
            .collect::<Result<_, _>>()?,
        Value::String(s) => s.split(',').map(|p| p.trim().to_string()).collect(),
        _ => return Err(invalid(field, "expected a list of strings")),
    };
    Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
}

fn non_negative_number(field: &str, value: &Value) -> Result<f64, ValidationError> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid(field, "expected a number"))?;
    if n < 0.0 || !n.is_finite() {
        return Err(invalid(field, "must not be negative"));
    }
    Ok(n)
}

/// Applies one user correction in place. Corrected scalar fields become
/// confirmed (confidence 100); a corrected skill list replaces the old one
/// with every skill confirmed.
pub fn apply_correction(resume: &mut ParsedResume, update: &ProfileUpdate) -> Result<(), ValidationError> {
    let field = update.field_name.as_str();
    let value = &update.corrected_value;

    match field {
        "full_name" | "phone" | "location" | "current_role" => {
            let text = value
                .as_str()
                .map(str::trim)
                .ok_or_else(|| invalid(field, "expected text"))?;
            if field == "full_name" && text.is_empty() {
                return Err(invalid(field, "Name is required"));
            }
            let corrected = confirmed(Value::String(text.to_string()));
            match field {
                "full_name" => resume.full_name = corrected,
                "phone" => resume.phone = corrected,
                "location" => resume.location = Some(corrected),
                _ => resume.current_role = Some(corrected),
            }
        }
        "email" => {
            let text = value
                .as_str()
                .map(str::trim)
                .ok_or_else(|| invalid(field, "expected text"))?;
            validate_email(text)?;
            resume.email = confirmed(Value::String(text.to_string()));
        }
        "years_of_experience" => {
            let years = non_negative_number(field, value)?;
            resume.years_of_experience = confirmed(Value::from(years));
        }
        "skills" => {
            resume.skills = string_list(field, value)?
                .into_iter()
                .map(|s| confirmed(Value::String(s)))
                .collect();
        }
        "preferred_locations" => resume.preferred_locations = string_list(field, value)?,
        "preferred_roles" => resume.preferred_roles = string_list(field, value)?,
        "expected_salary" => {
            resume.expected_salary = if value.is_null() {
                None
            } else {
                Some(non_negative_number(field, value)?.round() as i64)
            };
        }
        _ => {
            return Err(invalid(
                field,
                &format!("unknown field (expected one of: {})", CORRECTABLE_FIELDS.join(", ")),
            ))
        }
    }
    Ok(())
}
