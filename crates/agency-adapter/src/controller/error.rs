//! Use case failures rendered as HTTP responses

use agency_usecase::{AppError, ErrorKind};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// Handler-facing error, body is always `{"error": "<client message>"}`
#[derive(Debug)]
pub struct ApiError(pub AppError);

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Request could not be decoded or failed field validation
    pub fn bad_request(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self(AppError::invalid_argument(
            format!("couldn't bind request: {}", detail),
            format!("Couldn't bind request: {}", detail),
        ))
    }

    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Database | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if self.0.kind().is_client_error() {
            warn!(kind = %self.0.kind(), status = status.as_u16(), "{}", self.0.message());
        } else {
            error!(kind = %self.0.kind(), status = status.as_u16(), "{}", self.0.message());
        }
        (status, Json(json!({ "error": self.0.client_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::not_found("x", "x"), StatusCode::NOT_FOUND),
            (AppError::invalid_argument("x", "x"), StatusCode::BAD_REQUEST),
            (AppError::conflict("x", "x"), StatusCode::CONFLICT),
            (AppError::database("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[tokio::test]
    async fn test_database_detail_never_reaches_body() {
        let response = ApiError(AppError::database("relation \"cats\" does not exist")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "database raised an error" }));
    }

    #[test]
    fn test_bad_request_prefix() {
        let err = ApiError::bad_request("salary must be positive");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.0.client_message(),
            "Couldn't bind request: salary must be positive"
        );
    }
}
