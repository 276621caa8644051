//! API error types with IntoResponse
//!
//! Error bodies are plain text, as the bundled frontend expects. Store
//! failures on delete carry no body at all.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::db::StoreError;
use crate::models::TodoId;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request body could not be decoded (400)
    Decode { message: String },

    /// Path id is not an integer (400)
    InvalidId { raw: String },

    /// An axum extractor refused the request; keeps its status
    /// (e.g. 413 for an oversized body)
    Rejected { status: StatusCode, message: String },

    /// Todo does not exist (404)
    NotFound { id: TodoId },

    /// Store failure, detail returned to the client (500, logged)
    Store(StoreError),

    /// Store failure with an empty body (500, logged)
    StoreRedacted(StoreError),

    /// Store call exceeded its deadline (504)
    Timeout { after: Duration },
}

impl ApiError {
    /// Drop the response detail of a store failure.
    pub fn redacted(self) -> Self {
        match self {
            Self::Store(e) => Self::StoreRedacted(e),
            other => other,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Decode { message } => (StatusCode::BAD_REQUEST, message).into_response(),
            Self::InvalidId { raw } => (
                StatusCode::BAD_REQUEST,
                format!("invalid todo id '{}': expected an integer", raw),
            )
                .into_response(),
            Self::Rejected { status, message } => (status, message).into_response(),
            Self::NotFound { id } => {
                (StatusCode::NOT_FOUND, format!("todo {} not found", id)).into_response()
            }
            Self::Store(e) => {
                tracing::error!("Store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
            Self::StoreRedacted(e) => {
                tracing::error!("Store error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
            Self::Timeout { after } => {
                tracing::warn!(?after, "Store call timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    format!("store call timed out after {}ms", after.as_millis()),
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn decode_error_is_400() {
        let err = ApiError::Decode {
            message: "bad json".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, "bad json");
    }

    #[tokio::test]
    async fn rejection_keeps_its_status() {
        let err = ApiError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".into(),
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_text(response).await, "length limit exceeded");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::NotFound { id: 7 }.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "todo 7 not found");
    }

    #[tokio::test]
    async fn store_error_is_500_with_detail() {
        let err = ApiError::from(StoreError::MissingAfterWrite { id: 3 });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response).await,
            "todo 3 was not found after it was written"
        );
    }

    #[tokio::test]
    async fn redacted_store_error_has_empty_body() {
        let err = ApiError::from(StoreError::MissingAfterWrite { id: 3 }).redacted();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response).await.is_empty());
    }

    #[test]
    fn redacted_keeps_other_variants() {
        let err = ApiError::NotFound { id: 1 }.redacted();
        assert!(matches!(err, ApiError::NotFound { id: 1 }));
    }

    #[tokio::test]
    async fn timeout_is_504() {
        let response = ApiError::Timeout {
            after: Duration::from_millis(250),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body_text(response).await, "store call timed out after 250ms");
    }
}
