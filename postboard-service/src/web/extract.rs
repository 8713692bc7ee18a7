//! Request body extraction
//!
//! `axum::Json` only accepts `application/json`, but the merge-patch
//! endpoints must also take `application/merge-patch+json` bodies.
//! [`JsonBody`] accepts both and turns failures into [`ApiError`]s.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, Method},
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiOperation};

/// JSON body extractor accepting `application/json` and
/// `application/merge-patch+json` content types
pub struct JsonBody<T>(pub T);

/// Operation implied by the request method, used as error context when the
/// body is rejected before a handler runs
fn operation_for_method(method: &Method) -> ApiOperation {
    match *method {
        Method::POST => ApiOperation::Create,
        Method::PUT => ApiOperation::Update,
        Method::PATCH => ApiOperation::PartialUpdate,
        Method::DELETE => ApiOperation::Delete,
        _ => ApiOperation::Get,
    }
}

fn is_json_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || mime == "application/merge-patch+json"
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let operation = operation_for_method(req.method());

        let accepted = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(is_json_content_type);
        if !accepted {
            return Err(ApiError::bad_request(
                "Expected content type application/json or application/merge-patch+json",
            )
            .with_operation(operation));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            ApiError::bad_request(format!("Failed to read request body: {}", e))
                .with_operation(operation)
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::bad_request(format!("Malformed JSON body: {}", e)).with_operation(operation)
        })?;
        Ok(JsonBody(value))
    }
}
