use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::{ParsedResume, ProfileUpdate, SaveResumeResponse};
use crate::review::confidence::{review_resume, ReviewReport};
use crate::review::corrections::apply_correction;
use crate::review::validation::load_resume_upload;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ParseOutcome {
    pub resume: ParsedResume,
    pub review: ReviewReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<SaveResumeResponse>,
}

#[derive(Debug, Serialize)]
pub struct CorrectionOutcome {
    pub field: String,
    pub review: ReviewReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<SaveResumeResponse>,
}

pub async fn read_resume(path: &Path) -> Result<ParsedResume, AppError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!("résumé file {}", path.display())));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&raw)?)
}

async fn write_resume(path: &Path, resume: &ParsedResume) -> Result<(), AppError> {
    let raw = serde_json::to_string_pretty(resume)?;
    tokio::fs::write(path, raw).await?;
    Ok(())
}

/// Lists and JSON `null` are passed through as JSON; anything else is text.
pub fn parse_correction_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') || trimmed == "null" {
        if let Ok(value) = serde_json::from_str(trimmed) {
            return value;
        }
    }
    Value::String(raw.to_string())
}

/// `resume parse <file> [--save] [--out PATH]`
pub async fn handle_parse(
    state: &AppState,
    file: &Path,
    save: bool,
    out: Option<&Path>,
) -> Result<ParseOutcome, AppError> {
    let upload = load_resume_upload(file).await?;
    info!("uploading {} ({} bytes)", upload.file_name, upload.content.len());
    let resume = state.api.parse_resume(upload).await?;

    if let Some(out) = out {
        write_resume(out, &resume).await?;
    }

    let saved = if save {
        let id = resume.id.ok_or_else(|| {
            AppError::Validation(
                "parsed résumé has no candidate id; save it with `resume save <id> <file>`".to_string(),
            )
        })?;
        Some(state.api.save_resume(id, &resume).await?)
    } else {
        None
    };

    Ok(ParseOutcome {
        review: review_resume(&resume),
        resume,
        saved,
    })
}

/// `resume review <json>`
pub async fn handle_review(path: &Path) -> Result<ReviewReport, AppError> {
    let resume = read_resume(path).await?;
    Ok(review_resume(&resume))
}

/// `resume correct <json> <field> <value> [--save <id>]`
///
/// The corrected résumé is written back to the same file.
pub async fn handle_correct(
    state: &AppState,
    path: &Path,
    field: &str,
    raw_value: &str,
    save_as: Option<i64>,
) -> Result<CorrectionOutcome, AppError> {
    let mut resume = read_resume(path).await?;
    let update = ProfileUpdate {
        field_name: field.to_string(),
        corrected_value: parse_correction_value(raw_value),
    };
    apply_correction(&mut resume, &update)?;
    write_resume(path, &resume).await?;

    let saved = match save_as {
        Some(id) => Some(state.api.save_resume(id, &resume).await?),
        None => None,
    };

    Ok(CorrectionOutcome {
        field: update.field_name,
        review: review_resume(&resume),
        saved,
    })
}

/// `resume save <id> <json>`
pub async fn handle_save(state: &AppState, candidate_id: i64, path: &Path) -> Result<SaveResumeResponse, AppError> {
    let resume = read_resume(path).await?;
    Ok(state.api.save_resume(candidate_id, &resume).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{extract::Path as AxumPath, routing::post, Json, Router};
    use serde_json::json;

    use crate::api_client::stub;
    use crate::config::test_config;
    use crate::models::resume::fixtures::sample_resume;
    use crate::session::store::MemoryStore;

    fn state(base: &str) -> AppState {
        AppState::with_store(test_config(base), Arc::new(MemoryStore::default())).unwrap()
    }

    async fn write_sample(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("resume.json");
        write_resume(&path, &sample_resume()).await.unwrap();
        path
    }

    #[test]
    fn test_correction_value_parsing() {
        assert_eq!(parse_correction_value("Pune"), json!("Pune"));
        assert_eq!(parse_correction_value("[\"Go\", \"Rust\"]"), json!(["Go", "Rust"]));
        assert_eq!(parse_correction_value("null"), Value::Null);
        assert_eq!(parse_correction_value("[broken"), json!("[broken"));
        assert_eq!(parse_correction_value("4.5"), json!("4.5"));
    }

    #[tokio::test]
    async fn test_review_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path()).await;
        let report = handle_review(&path).await.unwrap();
        assert_eq!(report.flagged.len(), 4);
    }

    #[tokio::test]
    async fn test_review_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = handle_review(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_correct_writes_back_and_clears_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path()).await;
        let state = state("http://127.0.0.1:9");

        let outcome = handle_correct(&state, &path, "phone", "+91 98765 43210", None)
            .await
            .unwrap();
        assert!(outcome.saved.is_none());
        assert!(outcome.review.flagged.iter().all(|f| f.path != "phone"));

        let reread = read_resume(&path).await.unwrap();
        assert_eq!(reread.phone.confidence, 100);
        assert_eq!(reread.phone.value, json!("+91 98765 43210"));
    }

    #[tokio::test]
    async fn test_correct_rejects_unknown_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path()).await;
        let state = state("http://127.0.0.1:9");

        let err = handle_correct(&state, &path, "shoe_size", "44", None)
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(read_resume(&path).await.unwrap().phone, sample_resume().phone);
    }

    #[tokio::test]
    async fn test_correct_then_save_posts_corrected_resume() {
        async fn save(AxumPath(id): AxumPath<i64>, Json(body): Json<Value>) -> Json<Value> {
            Json(json!({
                "message": format!("saved {}", body["current_role"]["value"].as_str().unwrap_or("")),
                "candidate_id": id
            }))
        }
        let base = stub::spawn(Router::new().route("/api/resume/save/:id", post(save))).await;
        let dir = tempfile::tempdir().unwrap();
        let path = write_sample(dir.path()).await;

        let outcome = handle_correct(&state(&base), &path, "current_role", "Staff Engineer", Some(7))
            .await
            .unwrap();
        let saved = outcome.saved.unwrap();
        assert_eq!(saved.candidate_id, 7);
        assert_eq!(saved.message, "saved Staff Engineer");
    }
}
