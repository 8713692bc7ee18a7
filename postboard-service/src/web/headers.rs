//! Entity alert headers
//!
//! Mutating endpoints announce what happened through a pair of custom
//! headers: `X-{app}-alert` carries a translation key such as
//! `postboard.post.created` and `X-{app}-params` carries the entity id.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

/// Headers announcing a created entity
pub fn creation_alert(app_name: &str, entity_name: &str, id: &str) -> HeaderMap {
    entity_alert(app_name, entity_name, "created", id)
}

/// Headers announcing an updated entity
pub fn update_alert(app_name: &str, entity_name: &str, id: &str) -> HeaderMap {
    entity_alert(app_name, entity_name, "updated", id)
}

/// Headers announcing a deleted entity
pub fn deletion_alert(app_name: &str, entity_name: &str, id: &str) -> HeaderMap {
    entity_alert(app_name, entity_name, "deleted", id)
}

fn entity_alert(app_name: &str, entity_name: &str, action: &str, id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let app = app_name.to_lowercase();
    let alert_name = HeaderName::try_from(format!("x-{}-alert", app));
    let params_name = HeaderName::try_from(format!("x-{}-params", app));
    let alert_value = HeaderValue::try_from(format!("{}.{}.{}", app, entity_name, action));
    let params_value = HeaderValue::try_from(id);

    // A misconfigured application name must not fail the request; the alert
    // headers are informational.
    match (alert_name, alert_value) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!(app = %app, "application name is not a valid header token"),
    }
    match (params_name, params_value) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!(app = %app, id, "could not attach alert params header"),
    }

    headers
}
