use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error_code: &'static str,
    message: String,
    fields: Option<Vec<String>>,
}

/// Error returned by every handler, rendered as a JSON body.
#[derive(Debug, Error)]
#[error("{error_code}: {message}")]
pub struct ApiError {
    status: StatusCode,
    error_code: &'static str,
    message: String,
    fields: Option<Vec<String>>,
}

impl ApiError {
    fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error_code,
            message: message.into(),
            fields: None,
        }
    }

    fn validation(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "validation_error", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<tracker_core::Error> for ApiError {
    fn from(err: tracker_core::Error) -> Self {
        use tracker_core::Error as CoreError;

        match err {
            CoreError::InvalidArgument(message) => {
                Self::new(StatusCode::BAD_REQUEST, "invalid_argument", message)
            }
            CoreError::NotFound(message) => Self::new(StatusCode::NOT_FOUND, "not_found", message),
            CoreError::Validation(fields) => {
                let message = CoreError::Validation(fields.clone()).to_string();
                Self {
                    fields: Some(fields.into_iter().map(|f| f.field).collect()),
                    ..Self::validation(message)
                }
            }
            other => {
                tracing::warn!(error = %other, "request failed");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    other.to_string(),
                )
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error_code: self.error_code,
            message: self.message,
            fields: self.fields,
        };
        (self.status, Json(body)).into_response()
    }
}
