use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use masterblog::application::posts::PostStore;
use masterblog::config::CorsSettings;
use masterblog::domain::posts::Post;
use masterblog::infra::http::{self, ApiRateLimiter, ApiState};

const TEST_ORIGIN: &str = "http://127.0.0.1:5001";

fn router_with(store: PostStore, rate_limit: u32) -> Router {
    let state = ApiState {
        store: Arc::new(store),
        rate_limiter: Arc::new(ApiRateLimiter::new(Duration::from_secs(60), rate_limit)),
    };
    let cors = CorsSettings {
        allowed_origin: TEST_ORIGIN.to_string(),
    };
    http::build_router(state, &cors).expect("router builds")
}

fn seeded_router() -> Router {
    router_with(PostStore::seeded(), 30)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn with_json_body(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

#[tokio::test]
async fn welcome_route_serves_static_text() {
    let router = seeded_router();
    let response = router.oneshot(get("/")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    assert_eq!(&bytes[..], b"Welcome to the Masterblog API");
}

#[tokio::test]
async fn list_returns_seed_posts_with_pagination_metadata() {
    let (status, body) = send(&seeded_router(), get("/api/posts")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_posts"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["posts"][0]["post_id"], 1);
    assert_eq!(body["posts"][0]["title"], "First post");
    assert_eq!(body["posts"][1]["content"], "This is the second post.");
}

#[tokio::test]
async fn list_sorts_by_title_descending() {
    let (status, body) = send(
        &seeded_router(),
        get("/api/posts?sort=title&direction=DESC"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["posts"][0]["title"], "Second post");
    assert_eq!(body["posts"][1]["title"], "First post");
}

#[tokio::test]
async fn list_rejects_unknown_sort_field() {
    let (status, body) = send(&seeded_router(), get("/api/posts?sort=author")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Sort field must be either 'title' or 'content'."
    );
}

#[tokio::test]
async fn list_rejects_unknown_direction() {
    let (status, body) = send(
        &seeded_router(),
        get("/api/posts?sort=title&direction=sideways"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Sort direction must be either 'asc' or 'desc'."
    );
}

#[tokio::test]
async fn list_rejects_non_positive_pagination() {
    for uri in [
        "/api/posts?page=0",
        "/api/posts?limit=-1",
        "/api/posts?page=abc",
        "/api/posts?sort=title&page=0",
    ] {
        let (status, body) = send(&seeded_router(), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri `{uri}`");
        assert_eq!(body["error"], "Page and limit must be positive integers.");
    }
}

#[tokio::test]
async fn list_out_of_range_page_is_empty() {
    let (status, body) = send(&seeded_router(), get("/api/posts?page=9&limit=5")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_posts"], 2);
    assert_eq!(body["posts"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn create_assigns_next_id_and_round_trips() {
    let router = seeded_router();

    let (status, created) = send(
        &router,
        with_json_body(
            "POST",
            "/api/posts",
            json!({"title": "Third post", "content": "Fresh content."}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["post_id"], 3);
    assert_eq!(created["title"], "Third post");

    let (_, listed) = send(&router, get("/api/posts")).await;
    assert_eq!(listed["total_posts"], 3);
    assert_eq!(listed["posts"][2]["content"], "Fresh content.");

    let (_, found) = send(&router, get("/api/posts/search?title=third")).await;
    assert_eq!(found.as_array().map(Vec::len), Some(1));
    assert_eq!(found[0]["post_id"], 3);
}

#[tokio::test]
async fn create_requires_both_fields() {
    for payload in [json!({"title": "A"}), json!({"content": "B"}), json!({})] {
        let (status, body) =
            send(&seeded_router(), with_json_body("POST", "/api/posts", payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Both 'title' and 'content' are required.");
    }
}

#[tokio::test]
async fn create_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/posts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");

    let (status, body) = send(&seeded_router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON data.");
}

#[tokio::test]
async fn update_overwrites_only_supplied_fields() {
    let router = seeded_router();
    let (status, body) = send(
        &router,
        with_json_body("PUT", "/api/posts/1", json!({"title": "Renamed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post_id"], 1);
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["content"], "This is the first post.");
}

#[tokio::test]
async fn update_with_empty_body_returns_unmodified_post() {
    let (status, body) = send(
        &seeded_router(),
        with_json_body("PUT", "/api/posts/2", json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Second post");
    assert_eq!(body["content"], "This is the second post.");
}

#[tokio::test]
async fn update_unknown_id_reports_not_found_before_payload_errors() {
    let request = Request::builder()
        .method("PUT")
        .uri("/api/posts/99")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");

    let (status, body) = send(&seeded_router(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found.");
}

#[tokio::test]
async fn update_rejects_malformed_json_for_known_id() {
    let request = Request::builder()
        .method("PUT")
        .uri("/api/posts/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("request");

    let (status, body) = send(&seeded_router(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid JSON data.");
}

#[tokio::test]
async fn delete_confirms_with_id_and_second_attempt_is_not_found() {
    let router = seeded_router();

    let (status, body) = send(
        &router,
        Request::builder()
            .method("DELETE")
            .uri("/api/posts/1")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        "Post with id 1 has been deleted successfully."
    );

    let (status, body) = send(
        &router,
        Request::builder()
            .method("DELETE")
            .uri("/api/posts/1")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found.");

    let (_, listed) = send(&router, get("/api/posts")).await;
    assert_eq!(listed["total_posts"], 1);
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() {
    let (status, body) = send(&seeded_router(), get("/api/posts/search?title=FIRST")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["title"], "First post");
}

#[tokio::test]
async fn search_without_filters_returns_all_posts_in_order() {
    let (status, body) = send(&seeded_router(), get("/api/posts/search")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["post_id"], 1);
    assert_eq!(body[1]["post_id"], 2);
}

#[tokio::test]
async fn search_applies_all_supplied_filters() {
    let store = PostStore::new(vec![
        Post::new(1, "Alpha post", "About gardens."),
        Post::new(2, "Beta post", "About orchards."),
    ]);
    let router = router_with(store, 30);

    let (status, body) = send(&router, get("/api/posts/search?title=post&content=orchard")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["post_id"], 2);
}

#[tokio::test]
async fn list_endpoint_is_rate_limited() {
    let router = router_with(PostStore::seeded(), 2);

    for _ in 0..2 {
        let (status, _) = send(&router, get("/api/posts")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let response = router
        .clone()
        .oneshot(get("/api/posts"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok()),
        Some("60")
    );
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(body["error"], "Rate limit exceeded");

    // Other operations are not limited.
    let (status, _) = send(
        &router,
        with_json_body("POST", "/api/posts", json!({"title": "t", "content": "c"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn unsupported_method_is_rejected_by_routing() {
    let (status, _) = send(
        &seeded_router(),
        Request::builder()
            .method("PATCH")
            .uri("/api/posts")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn preflight_allows_the_configured_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/posts")
        .header(header::ORIGIN, TEST_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .expect("request");

    let response = seeded_router().oneshot(request).await.expect("response");
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some(TEST_ORIGIN)
    );
}
