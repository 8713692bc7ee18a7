//! REST endpoints for managing comments

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};

use crate::domain::Comment;
use crate::state::AppState;

use super::crud;
use super::error::ApiError;
use super::extract::JsonBody;
use super::query::PageQuery;

const BASE_PATH: &str = "/api/comments";

/// Comment routes under `/api/comments`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(BASE_PATH, get(get_all_comments).post(create_comment))
        .route(
            "/api/comments/{id}",
            get(get_comment)
                .put(update_comment)
                .patch(partial_update_comment)
                .delete(delete_comment),
        )
}

async fn create_comment(
    State(state): State<AppState>,
    JsonBody(comment): JsonBody<Comment>,
) -> Result<Response, ApiError> {
    crud::create(state.comments(), state.application_name(), BASE_PATH, comment).await
}

async fn update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(comment): JsonBody<Comment>,
) -> Result<Response, ApiError> {
    crud::update(state.comments(), state.application_name(), &id, comment).await
}

async fn partial_update_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(comment): JsonBody<Comment>,
) -> Result<Response, ApiError> {
    crud::partial_update(state.comments(), state.application_name(), &id, comment).await
}

async fn get_all_comments(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    crud::list(state.comments(), BASE_PATH, &query).await
}

async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    crud::get_one(state.comments(), &id).await
}

async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    crud::delete(state.comments(), state.application_name(), &id).await
}
