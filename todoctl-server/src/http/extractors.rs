//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{TodoFields, TodoId};

/// Extract and validate a todo id from path
pub struct TodoIdParam(pub TodoId);

impl<S> FromRequestParts<S> for TodoIdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;

        let id = raw
            .parse::<TodoId>()
            .map_err(|_| ApiError::InvalidId { raw: raw.clone() })?;

        Ok(Self(id))
    }
}

/// Decode a todo payload from the request body.
///
/// Unlike `axum::Json` this does not require a JSON content type, and every
/// decode failure is a 400. Failures to read the body keep axum's status,
/// so a body over the size limit is a 413.
pub struct TodoBody(pub TodoFields);

impl<S> FromRequest<S> for TodoBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;

        let fields = serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            message: format!("invalid todo payload: {}", e),
        })?;

        Ok(Self(fields))
    }
}
