//! HTTP boundary: routes, extractors, errors and response headers

mod comments;
mod crud;
mod error;
mod extract;
mod headers;
mod pagination;
mod posts;
mod query;

pub use error::{ApiError, ApiErrorKind, ApiOperation};
pub use extract::JsonBody;
pub use pagination::X_TOTAL_COUNT;
pub use query::{PageQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;

use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(posts::routes())
        .merge(comments::routes())
        .route("/health", get(health))
        .with_state(state)
}

/// Liveness endpoint
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": state.application_name(),
    }))
}
