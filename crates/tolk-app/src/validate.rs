use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use tolk_types::{StoreMessageValue, SubmissionErrors, ValidMessageValue};
use tracing::debug;

use crate::state::AppState;

/// Request body which passed submission validation.
#[derive(Debug, Clone)]
pub struct Submission<T>(pub T);

impl<T> Deref for Submission<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug)]
pub enum SubmissionRejection<E> {
    /// Body was parsed, but some fields did not pass validation.
    Invalid(SubmissionErrors),
    /// Body could not be extracted at all.
    Inner(E),
}

impl<E: Display> Display for SubmissionRejection<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionRejection::Invalid(errors) => write!(f, "{errors}"),
            SubmissionRejection::Inner(error) => write!(f, "{error}"),
        }
    }
}

impl<E: Error + 'static> Error for SubmissionRejection<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SubmissionRejection::Invalid(errors) => Some(errors),
            SubmissionRejection::Inner(e) => Some(e),
        }
    }
}

impl<E: IntoResponse> IntoResponse for SubmissionRejection<E> {
    fn into_response(self) -> Response {
        match self {
            SubmissionRejection::Invalid(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            SubmissionRejection::Inner(e) => e.into_response(),
        }
    }
}

impl<E> From<SubmissionErrors> for SubmissionRejection<E> {
    fn from(value: SubmissionErrors) -> Self {
        Self::Invalid(value)
    }
}

impl FromRequest<AppState> for Submission<ValidMessageValue> {
    type Rejection = SubmissionRejection<JsonRejection>;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<StoreMessageValue>::from_request(req, state)
            .await
            .map_err(SubmissionRejection::Inner)?;

        let valid = payload.validate_submission().inspect_err(|errors| {
            debug!("Rejected message value submission: {errors}");
        })?;
        Ok(Submission(valid))
    }
}
