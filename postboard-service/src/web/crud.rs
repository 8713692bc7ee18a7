//! Generic CRUD handler core shared by all entity endpoints
//!
//! The per-entity route modules stay thin: every boundary rule (identifier
//! guards, validation, existence pre-checks, response headers) lives here,
//! parameterized over the entity's store.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use futures::future::try_join;

use crate::domain::Document;
use crate::service::EntityService;
use crate::store::EntityStore;

use super::error::{ApiError, ApiOperation};
use super::headers;
use super::pagination::pagination_headers;
use super::query::PageQuery;

/// Create a new entity: 201 with `Location` and creation alert headers
///
/// The payload must not carry an id; the store mints one.
pub async fn create<S: EntityStore>(
    service: &EntityService<S>,
    app_name: &str,
    base_path: &str,
    entity: S::Entity,
) -> Result<Response, ApiError> {
    tracing::debug!(entity = <S::Entity>::NAME, "REST request to create");

    entity
        .validate()
        .map_err(|msg| ApiError::validation_failed(msg).with_operation(ApiOperation::Create))?;
    if let Some(id) = entity.id() {
        return Err(ApiError::bad_request(format!(
            "A new {} cannot already have an ID",
            <S::Entity>::NAME
        ))
        .with_operation(ApiOperation::Create)
        .with_entity(<S::Entity>::NAME, id));
    }

    let created = service
        .save(entity)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Create))?;
    let id = created
        .id()
        .ok_or_else(|| {
            ApiError::internal("store returned an entity without an id")
                .with_operation(ApiOperation::Create)
        })?
        .to_string();

    let mut response_headers = headers::creation_alert(app_name, <S::Entity>::NAME, &id);
    if let Ok(location) = HeaderValue::try_from(format!("{}/{}", base_path, id)) {
        response_headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, response_headers, Json(created)).into_response())
}

/// Full update of an existing entity: 200 with update alert headers
pub async fn update<S: EntityStore>(
    service: &EntityService<S>,
    app_name: &str,
    path_id: &str,
    entity: S::Entity,
) -> Result<Response, ApiError> {
    tracing::debug!(entity = <S::Entity>::NAME, id = path_id, "REST request to update");

    entity
        .validate()
        .map_err(|msg| ApiError::validation_failed(msg).with_operation(ApiOperation::Update))?;
    check_id_guards(&entity, path_id, ApiOperation::Update)?;
    ensure_exists(service, path_id, ApiOperation::Update).await?;

    let updated = service
        .update(entity)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Update))?;
    match updated {
        Some(result) => Ok((
            StatusCode::OK,
            headers::update_alert(app_name, <S::Entity>::NAME, path_id),
            Json(result),
        )
            .into_response()),
        // The record vanished between the existence check and the write
        None => Err(ApiError::not_found(<S::Entity>::NAME, path_id)
            .with_operation(ApiOperation::Update)),
    }
}

/// Merge-patch of an existing entity: 200 with update alert headers
///
/// Field-level validation is deliberately skipped; a patch may omit
/// required fields it does not touch.
pub async fn partial_update<S: EntityStore>(
    service: &EntityService<S>,
    app_name: &str,
    path_id: &str,
    patch: S::Entity,
) -> Result<Response, ApiError> {
    tracing::debug!(
        entity = <S::Entity>::NAME,
        id = path_id,
        "REST request to partially update"
    );

    check_id_guards(&patch, path_id, ApiOperation::PartialUpdate)?;
    ensure_exists(service, path_id, ApiOperation::PartialUpdate).await?;

    let merged = service
        .partial_update(patch)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::PartialUpdate))?;
    match merged {
        Some(result) => Ok((
            StatusCode::OK,
            headers::update_alert(app_name, <S::Entity>::NAME, path_id),
            Json(result),
        )
            .into_response()),
        None => Err(ApiError::not_found(<S::Entity>::NAME, path_id)
            .with_operation(ApiOperation::PartialUpdate)),
    }
}

/// Paginated list: 200 with `X-Total-Count` and `Link` headers
///
/// The total count and the page window are fetched concurrently and joined
/// before the response is built.
pub async fn list<S: EntityStore>(
    service: &EntityService<S>,
    base_path: &str,
    query: &PageQuery,
) -> Result<Response, ApiError> {
    tracing::debug!(entity = <S::Entity>::NAME, "REST request to get a page");

    let page = query.to_page_request();
    let entities = async {
        if query.is_eagerload() {
            service.find_all_with_eager_relationships(&page).await
        } else {
            service.find_all(&page).await
        }
    };

    let (total, entities) = try_join(service.count_all(), entities)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::List))?;

    let response_headers =
        pagination_headers(base_path, query.page_index(), query.page_size(), total)?;
    Ok((StatusCode::OK, response_headers, Json(entities)).into_response())
}

/// Fetch one entity: 200 or 404
pub async fn get_one<S: EntityStore>(
    service: &EntityService<S>,
    id: &str,
) -> Result<Response, ApiError> {
    tracing::debug!(entity = <S::Entity>::NAME, id, "REST request to get");

    let found = service
        .find_one(id)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Get))?;
    match found {
        Some(entity) => Ok((StatusCode::OK, Json(entity)).into_response()),
        None => Err(ApiError::not_found(<S::Entity>::NAME, id)),
    }
}

/// Delete by id: always 204 with deletion alert headers, no existence check
pub async fn delete<S: EntityStore>(
    service: &EntityService<S>,
    app_name: &str,
    id: &str,
) -> Result<Response, ApiError> {
    tracing::debug!(entity = <S::Entity>::NAME, id, "REST request to delete");

    service
        .delete(id)
        .await
        .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Delete))?;
    Ok((
        StatusCode::NO_CONTENT,
        headers::deletion_alert(app_name, <S::Entity>::NAME, id),
    )
        .into_response())
}

/// Reject payloads whose id is missing or disagrees with the path
fn check_id_guards<D: Document>(
    entity: &D,
    path_id: &str,
    operation: ApiOperation,
) -> Result<(), ApiError> {
    let Some(body_id) = entity.id() else {
        return Err(ApiError::bad_request("Invalid id")
            .with_operation(operation)
            .with_entity(D::NAME, path_id));
    };
    if body_id != path_id {
        return Err(ApiError::bad_request("Invalid ID")
            .with_operation(operation)
            .with_entity(D::NAME, path_id));
    }
    Ok(())
}

/// Pre-check that the target record exists; a miss is a Bad Request, the
/// same contract clients of the original API rely on
async fn ensure_exists<S: EntityStore>(
    service: &EntityService<S>,
    id: &str,
    operation: ApiOperation,
) -> Result<(), ApiError> {
    let exists = service
        .exists(id)
        .await
        .map_err(|e| ApiError::from(e).with_operation(operation))?;
    if exists {
        Ok(())
    } else {
        Err(ApiError::bad_request("Entity not found")
            .with_operation(operation)
            .with_entity(<S::Entity>::NAME, id))
    }
}
