//! HTTP contract tests for the `/api/posts` endpoints

mod common;

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use common::{bare_request, json_request, merge_patch_request, send, test_app};

fn post_body() -> Value {
    json!({
        "title": "First post",
        "required": "yes",
        "creationDate": "2024-01-15",
        "creator": { "id": "u1", "login": "alice" }
    })
}

/// Create a post and return its assigned id
async fn create_post(app: &axum::Router, body: &Value) -> String {
    let (status, _, created) = send(app, json_request("POST", "/api/posts", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created["id"].as_str().expect("assigned id").to_string()
}

#[tokio::test]
async fn create_assigns_identity_and_location() {
    let app = test_app().await;

    let (status, headers, created) =
        send(&app, json_request("POST", "/api/posts", &post_body())).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("assigned id");
    assert!(!id.is_empty());
    assert_eq!(created["title"], "First post");
    assert_eq!(created["creationDate"], "2024-01-15");
    assert_eq!(created["creator"]["login"], "alice");

    let location = headers
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("Location header");
    assert_eq!(location, format!("/api/posts/{}", id));

    assert_eq!(
        headers.get("x-postboard-alert").unwrap(),
        "postboard.post.created"
    );
    assert_eq!(headers.get("x-postboard-params").unwrap(), id);
}

#[tokio::test]
async fn create_rejects_preset_id() {
    let app = test_app().await;

    let mut body = post_body();
    body["id"] = json!("custom-id");
    let (status, _, error) = send(&app, json_request("POST", "/api/posts", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_rejects_missing_required_field() {
    let app = test_app().await;

    let body = json!({ "title": "No required field" });
    let (status, _, error) = send(&app, json_request("POST", "/api/posts", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let app = test_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_error_names_the_request_operation() {
    let app = test_app().await;

    // A body rejected before the handler runs still carries the operation
    // implied by the request method
    let request = axum::http::Request::builder()
        .method("PUT")
        .uri("/api/posts/p1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (status, _, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["operation"], "update");

    let request = axum::http::Request::builder()
        .method("PATCH")
        .uri("/api/posts/p1")
        .header(header::CONTENT_TYPE, "application/merge-patch+json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let (_, _, error) = send(&app, request).await;
    assert_eq!(error["operation"], "partial_update");
}

#[tokio::test]
async fn create_rejects_unsupported_content_type() {
    let app = test_app().await;

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(axum::body::Body::from(post_body().to_string()))
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn created_post_round_trips_by_id() {
    let app = test_app().await;
    let id = create_post(&app, &post_body()).await;

    let (status, _, fetched) = send(&app, bare_request("GET", &format!("/api/posts/{}", id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["title"], "First post");
    assert_eq!(fetched["required"], "yes");
    assert_eq!(fetched["creationDate"], "2024-01-15");
    assert_eq!(fetched["creator"]["id"], "u1");
}

#[tokio::test]
async fn get_unknown_post_is_not_found() {
    let app = test_app().await;

    let (status, _, error) = send(&app, bare_request("GET", "/api/posts/no-such-post")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "NOT_FOUND");
}

#[tokio::test]
async fn full_update_overwrites_and_alerts() {
    let app = test_app().await;
    let id = create_post(&app, &post_body()).await;

    let replacement = json!({
        "id": id,
        "title": "Edited title",
        "required": "still",
        "creationDate": "2024-02-20"
    });
    let (status, headers, updated) = send(
        &app,
        json_request("PUT", &format!("/api/posts/{}", id), &replacement),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Edited title");
    assert_eq!(
        headers.get("x-postboard-alert").unwrap(),
        "postboard.post.updated"
    );

    // Full overwrite: the creator snapshot was not in the replacement body
    let (_, _, fetched) = send(&app, bare_request("GET", &format!("/api/posts/{}", id))).await;
    assert_eq!(fetched["title"], "Edited title");
    assert!(fetched.get("creator").is_none() || fetched["creator"].is_null());
}

#[tokio::test]
async fn full_update_requires_body_id() {
    let app = test_app().await;
    let id = create_post(&app, &post_body()).await;

    let body = json!({ "title": "No id", "required": "yes" });
    let (status, _, _) = send(
        &app,
        json_request("PUT", &format!("/api/posts/{}", id), &body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_update_rejects_mismatched_ids() {
    let app = test_app().await;
    let id = create_post(&app, &post_body()).await;

    let body = json!({ "id": "different-id", "title": "x", "required": "yes" });
    let (status, _, _) = send(
        &app,
        json_request("PUT", &format!("/api/posts/{}", id), &body),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_update_of_unknown_id_fails_precheck() {
    let app = test_app().await;

    let body = json!({ "id": "ghost", "title": "x", "required": "yes" });
    let (status, _, error) = send(&app, json_request("PUT", "/api/posts/ghost", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "Entity not found");
}

#[tokio::test]
async fn merge_patch_preserves_unpatched_fields() {
    let app = test_app().await;
    let id = create_post(&app, &post_body()).await;

    let patch = json!({ "id": id, "title": "Patched title" });
    let (status, _, patched) = send(
        &app,
        merge_patch_request(&format!("/api/posts/{}", id), &patch),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["title"], "Patched title");
    assert_eq!(patched["required"], "yes");
    assert_eq!(patched["creationDate"], "2024-01-15");

    let (_, _, fetched) = send(&app, bare_request("GET", &format!("/api/posts/{}", id))).await;
    assert_eq!(fetched["title"], "Patched title");
    assert_eq!(fetched["required"], "yes");
}

#[tokio::test]
async fn merge_patch_accepts_partial_body_without_required_field() {
    let app = test_app().await;
    let id = create_post(&app, &post_body()).await;

    // No `required` field at all; must still be accepted
    let patch = json!({ "id": id, "creationDate": "2025-01-01" });
    let (status, _, patched) = send(
        &app,
        merge_patch_request(&format!("/api/posts/{}", id), &patch),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["creationDate"], "2025-01-01");
    assert_eq!(patched["required"], "yes");
}

#[tokio::test]
async fn merge_patch_of_unknown_id_fails_precheck() {
    let app = test_app().await;

    let patch = json!({ "id": "ghost", "title": "x" });
    let (status, _, _) = send(&app, merge_patch_request("/api/posts/ghost", &patch)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_paginates_with_count_and_links() {
    let app = test_app().await;
    for i in 0..25 {
        let body = json!({
            "title": format!("Post {:02}", i),
            "required": "yes",
            "creationDate": "2024-01-01"
        });
        create_post(&app, &body).await;
    }

    let (status, headers, body) =
        send(&app, bare_request("GET", "/api/posts?page=0&size=10&sort=title,asc")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get("x-total-count").unwrap(), "25");
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["title"], "Post 00");

    let link = headers
        .get(header::LINK)
        .and_then(|v| v.to_str().ok())
        .expect("Link header");
    assert!(link.contains("rel=\"next\""));
    assert!(link.contains("/api/posts?page=2&size=10>; rel=\"last\""));
    assert!(!link.contains("rel=\"prev\""));

    // Last page holds the remainder
    let (_, headers, body) =
        send(&app, bare_request("GET", "/api/posts?page=2&size=10&sort=title,asc")).await;
    assert_eq!(headers.get("x-total-count").unwrap(), "25");
    assert_eq!(body.as_array().unwrap().len(), 5);

    // A window past the end is an empty array, not an error
    let (status, _, body) = send(&app, bare_request("GET", "/api/posts?page=9&size=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn list_sorts_descending() {
    let app = test_app().await;
    for title in ["alpha", "bravo", "charlie"] {
        let body = json!({ "title": title, "required": "yes" });
        create_post(&app, &body).await;
    }

    let (_, _, body) = send(
        &app,
        bare_request("GET", "/api/posts?sort=title,desc&size=1"),
    )
    .await;
    assert_eq!(body.as_array().unwrap()[0]["title"], "charlie");
}

#[tokio::test]
async fn delete_is_idempotent_and_alerts() {
    let app = test_app().await;
    let id = create_post(&app, &post_body()).await;
    let uri = format!("/api/posts/{}", id);

    let (status, headers, _) = send(&app, bare_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(
        headers.get("x-postboard-alert").unwrap(),
        "postboard.post.deleted"
    );

    let (status, _, _) = send(&app, bare_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting again still succeeds
    let (status, _, _) = send(&app, bare_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn collection_path_rejects_unroutable_methods() {
    let app = test_app().await;

    let (status, _, _) = send(
        &app,
        json_request("PUT", "/api/posts", &post_body()),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, _) = send(&app, bare_request("DELETE", "/api/posts")).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
