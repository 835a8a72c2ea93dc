use thiserror::Error;

use crate::api_client::ApiError;
use crate::review::validation::ValidationError;
use crate::session::store::StoreError;

/// Application-level error type.
/// Every command handler returns `Result<(), AppError>`; `main` maps it to an exit code.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not logged in. Run `wevolve auth login` first.")]
    Unauthorized,

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<Vec<ValidationError>> for AppError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        AppError::Validation(joined)
    }
}

impl AppError {
    /// Process exit code for this failure kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) => 2,
            AppError::Unauthorized => 3,
            AppError::Api(e) if e.is_unauthorized() => 3,
            AppError::Api(_) => 4,
            AppError::NotFound(_) => 5,
            AppError::Storage(_) | AppError::Io(_) | AppError::Json(_) | AppError::Internal(_) => 1,
        }
    }

    /// True when the failure came from the remote service rather than local code.
    pub fn is_remote(&self) -> bool {
        matches!(self, AppError::Api(_))
    }
}
