use thiserror::Error;
use uuid::Uuid;

/// Failure of a single item inside a bulk approval action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemFailure {
    pub approval_id: Uuid,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upload failed: {0}")]
    UploadError(String),

    #[error("Rename failed: {0}")]
    RenameError(String),

    /// Aggregate failure of a bulk action. The display message stays generic;
    /// `failures` carries the per-item detail for callers that want it.
    #[error("{failed} of {total} approvals could not be updated")]
    PartialBulkFailure {
        failed: usize,
        total: usize,
        failures: Vec<BulkItemFailure>,
    },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ApiError {
    /// HTTP status a handler should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError(_) | ApiError::Conflict(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::UploadError(_)
            | ApiError::RenameError(_)
            | ApiError::PartialBulkFailure { .. }
            | ApiError::InternalError(_)
            | ApiError::DatabaseError(_) => 500,
        }
    }

    pub fn not_found(what: &str, id: Uuid) -> Self {
        ApiError::NotFound(format!("{what} {id}"))
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for ApiError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::ValidationError(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
