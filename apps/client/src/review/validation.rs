use std::path::Path;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::api_client::FileUpload;
use crate::errors::AppError;

pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;
pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;
pub const MIN_PASSWORD_LEN: usize = 8;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A local input failure tied to the field that caused it.
#[derive(Debug, Clone, Error, PartialEq, Serialize)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => PDF_MIME,
            Self::Docx => DOCX_MIME,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            PDF_MIME => Some(Self::Pdf),
            DOCX_MIME => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }
}

/// Checks type and size of a résumé before anything is uploaded.
///
/// `declared_mime` wins over the extension when present.
pub fn validate_resume_file(
    file_name: &str,
    declared_mime: Option<&str>,
    size: u64,
) -> Result<ResumeFormat, ValidationError> {
    let format = match declared_mime {
        Some(mime) => ResumeFormat::from_mime(mime),
        None => ResumeFormat::from_file_name(file_name),
    }
    .ok_or_else(|| ValidationError::new("file", "Please upload a PDF or DOCX file"))?;

    if size == 0 {
        return Err(ValidationError::new("file", "File is empty"));
    }
    if size > MAX_RESUME_BYTES {
        return Err(ValidationError::new("file", "File size must be less than 10MB"));
    }
    Ok(format)
}

/// Validates a résumé on disk and reads it into an upload body.
pub async fn load_resume_upload(path: &Path) -> Result<FileUpload, AppError> {
    let file_name = local_file_name(path);
    let size = file_size(path).await?;
    let format = validate_resume_file(&file_name, None, size)?;
    let content = tokio::fs::read(path).await?;

    Ok(FileUpload {
        file_name,
        mime: format.mime(),
        content: Bytes::from(content),
    })
}

/// Photos are typed by extension: jpg, jpeg, png, gif or webp.
pub fn photo_mime(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

pub fn validate_photo_file(file_name: &str, size: u64) -> Result<&'static str, ValidationError> {
    let mime = photo_mime(file_name)
        .ok_or_else(|| ValidationError::new("file", "Please upload a JPEG, PNG, GIF or WebP image"))?;
    if size == 0 {
        return Err(ValidationError::new("file", "File is empty"));
    }
    if size > MAX_PHOTO_BYTES {
        return Err(ValidationError::new("file", "Image size must be less than 5MB"));
    }
    Ok(mime)
}

pub async fn load_photo_upload(path: &Path) -> Result<FileUpload, AppError> {
    let file_name = local_file_name(path);
    let size = file_size(path).await?;
    let mime = validate_photo_file(&file_name, size)?;
    let content = tokio::fs::read(path).await?;

    Ok(FileUpload {
        file_name,
        mime,
        content: Bytes::from(content),
    })
}

fn local_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

async fn file_size(path: &Path) -> Result<u64, AppError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound(format!("file {}", path.display())))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new("email", "Invalid email address");
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::new("email", "Email is required"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    Ok(())
}

/// Collects every registration failure so each field can be reported.
pub fn validate_registration(name: &str, email: &str, password: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push(ValidationError::new("name", "Name is required"));
    }
    if let Err(e) = validate_email(email) {
        errors.push(e);
    }
    if let Err(e) = validate_new_password(password) {
        errors.push(e);
    }
    errors
}

pub fn validate_login(email: &str, password: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if let Err(e) = validate_email(email) {
        errors.push(e);
    }
    if password.is_empty() {
        errors.push(ValidationError::new("password", "Password is required"));
    }
    errors
}
