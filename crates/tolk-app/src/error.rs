use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use tolk_types::SubmissionErrors;
use tracing::error;

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Invalid submission: {0}")]
    InvalidSubmission(#[from] SubmissionErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(tolk_dal::Error),
}

impl From<tolk_dal::Error> for ApiError {
    fn from(value: tolk_dal::Error) -> Self {
        match value {
            tolk_dal::Error::RecordNotFound(what) => ApiError::ResourceNotFound(what),
            tolk_dal::Error::FailedUpdate { id, version } => ApiError::Conflict(format!(
                "Record {id} was changed, version {version} is outdated"
            )),
            tolk_dal::Error::MissingVersion => {
                ApiError::InvalidRequest("Version is required for update".to_string())
            }
            e if e.is_unique_violation() => ApiError::Conflict("Record already exists".to_string()),
            e => ApiError::DatabaseError(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ResourceNotFound(what) => {
                (StatusCode::NOT_FOUND, Json(json!({"error": format!("{what} not found")})))
                    .into_response()
            }
            ApiError::InvalidSubmission(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            ApiError::Conflict(msg) => {
                (StatusCode::CONFLICT, Json(json!({"error": msg}))).into_response()
            }
            ApiError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({"error": msg}))).into_response()
            }
            ApiError::DatabaseError(e) => {
                error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "Internal server error"})),
                )
                    .into_response()
            }
        }
    }
}
