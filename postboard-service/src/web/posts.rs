//! REST endpoints for managing posts

use axum::{
    extract::{Path, Query, State},
    response::Response,
    routing::get,
    Router,
};

use crate::domain::Post;
use crate::state::AppState;

use super::crud;
use super::error::ApiError;
use super::extract::JsonBody;
use super::query::PageQuery;

const BASE_PATH: &str = "/api/posts";

/// Post routes under `/api/posts`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(BASE_PATH, get(get_all_posts).post(create_post))
        .route(
            "/api/posts/{id}",
            get(get_post)
                .put(update_post)
                .patch(partial_update_post)
                .delete(delete_post),
        )
}

async fn create_post(
    State(state): State<AppState>,
    JsonBody(post): JsonBody<Post>,
) -> Result<Response, ApiError> {
    crud::create(state.posts(), state.application_name(), BASE_PATH, post).await
}

async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(post): JsonBody<Post>,
) -> Result<Response, ApiError> {
    crud::update(state.posts(), state.application_name(), &id, post).await
}

async fn partial_update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(post): JsonBody<Post>,
) -> Result<Response, ApiError> {
    crud::partial_update(state.posts(), state.application_name(), &id, post).await
}

async fn get_all_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Response, ApiError> {
    crud::list(state.posts(), BASE_PATH, &query).await
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    crud::get_one(state.posts(), &id).await
}

async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    crud::delete(state.posts(), state.application_name(), &id).await
}
