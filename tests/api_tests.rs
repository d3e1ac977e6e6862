use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::Arc;

use condition_coach::{
    db::MemoryStore,
    models::{CatalogItem, Category, UserId},
    routes::{create_router, AppState},
};

fn catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(1, "Shoulder stretch", "Loosens tight shoulders")
            .with_target_area("shoulders")
            .with_tags(["shoulder-relief", "stretch", "seated"]),
        CatalogItem::new(2, "Box breathing", "Slow breathing to reset")
            .with_target_area("whole body")
            .with_tags(["#breathing", "relax", "beginner-friendly"]),
        CatalogItem::new(3, "Burpees", "Full body high intensity drill")
            .with_category(Category::Cardio)
            .with_target_area("whole body")
            .with_tags(["push-to-limit", "cardio"]),
        CatalogItem::new(4, "Wall push-up", "Gentle upper body strength, easy on the shoulder")
            .with_category(Category::Strength)
            .with_target_area("chest")
            .with_tags(["strength-training", "beginner-friendly"]),
    ]
}

fn create_test_server(items: Vec<CatalogItem>) -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::with_items(items));
    let state = AppState::from_store(store.clone());
    let app = create_router(Arc::new(state));
    (TestServer::new(app).unwrap(), store)
}

fn user_header(user: UserId) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_str(&user.to_string()).unwrap(),
    )
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server(vec![]);
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (server, _) = create_test_server(vec![]);
    let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_recommend_ranks_by_score() {
    let (server, store) = create_test_server(catalog());
    let (name, value) = user_header(UserId::new());

    let response = server
        .post("/api/v1/recommendations")
        .add_header(name, value)
        .json(&json!({
            "fatigue_level": 4,
            "mood_level": 3,
            "body_concern": "shoulder"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rest_suggestion"], false);

    let items = body["items"].as_array().unwrap();
    assert!(items.len() <= 3);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["score"], 105);
    assert_eq!(store.log_count().await, 1);
}

#[tokio::test]
async fn test_recommend_accepts_numeric_strings() {
    let (server, _) = create_test_server(catalog());
    let (name, value) = user_header(UserId::new());

    let response = server
        .post("/api/v1/recommendations")
        .add_header(name, value)
        .json(&json!({ "fatigue_level": "2", "mood_level": "5" }))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_recommend_rest_still_logs() {
    let items = vec![
        CatalogItem::new(1, "Sprints", "All out").with_tags(["push-to-limit"]),
        CatalogItem::new(2, "Max lifts", "Heavy").with_tags(["high-intensity"]),
    ];
    let (server, store) = create_test_server(items);
    let (name, value) = user_header(UserId::new());

    let response = server
        .post("/api/v1/recommendations")
        .add_header(name, value)
        .json(&json!({
            "fatigue_level": 5,
            "mood_level": 1,
            "body_concern": "headache"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["rest_suggestion"], true);
    assert!(body["message"].as_str().is_some());
    assert_eq!(body["items"].as_array().unwrap().len(), 0);
    assert_eq!(store.log_count().await, 1);
}

#[tokio::test]
async fn test_recommend_invalid_levels_write_nothing() {
    let (server, store) = create_test_server(catalog());
    let user = UserId::new();

    for payload in [
        json!({ "fatigue_level": 0, "mood_level": 3 }),
        json!({ "fatigue_level": 3, "mood_level": 6 }),
        json!({ "fatigue_level": 2.5, "mood_level": 3 }),
        json!({ "fatigue_level": "tired", "mood_level": 3 }),
        json!({ "mood_level": 3 }),
    ] {
        let (name, value) = user_header(user);
        let response = server
            .post("/api/v1/recommendations")
            .add_header(name, value)
            .json(&payload)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert!(body["error"].as_str().is_some());
    }

    assert_eq!(store.log_count().await, 0);
}

#[tokio::test]
async fn test_recommend_requires_user() {
    let (server, store) = create_test_server(catalog());

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "fatigue_level": 3, "mood_level": 3 }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(store.log_count().await, 0);
}

fn assert_json_error(response: &axum_test::TestResponse, status: StatusCode) {
    response.assert_status(status);
    let body: Value = response.json();
    assert!(body["error"].as_str().is_some(), "{body}");
}

#[tokio::test]
async fn test_recommend_malformed_body_is_json_bad_request() {
    let (server, store) = create_test_server(catalog());
    let user = UserId::new();

    for payload in [
        json!({ "fatigue_level": 3, "mood_level": 3, "body_concern": 5 }),
        json!({ "fatigue_level": 3, "mood_level": 3, "body_concern": ["neck"] }),
        json!("tired"),
    ] {
        let (name, value) = user_header(user);
        let response = server
            .post("/api/v1/recommendations")
            .add_header(name, value)
            .json(&payload)
            .await;
        assert_json_error(&response, StatusCode::BAD_REQUEST);
    }

    let (name, value) = user_header(user);
    let response = server
        .post("/api/v1/recommendations")
        .add_header(name, value)
        .text("fatigue_level=3")
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);

    assert_eq!(store.log_count().await, 0);
}

#[tokio::test]
async fn test_page_errors_use_error_body() {
    let (server, _) = create_test_server(catalog());

    let response = server
        .get("/api/v1/exercises")
        .add_query_param("page", "two")
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);

    for page in [0, -1] {
        let response = server
            .get("/api/v1/exercises")
            .add_query_param("page", page)
            .await;
        assert_json_error(&response, StatusCode::NOT_FOUND);
    }

    let (name, value) = user_header(UserId::new());
    let response = server
        .get("/api/v1/history")
        .add_query_param("page", "-")
        .add_header(name, value)
        .await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_without_keyword_is_id_order() {
    let mut items = catalog();
    items.reverse();
    let (server, _) = create_test_server(items);

    let response = server.get("/api/v1/exercises").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let ids: Vec<i64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(body["count"], 4);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["current_page"], 1);
}

#[tokio::test]
async fn test_search_exact_name_beats_description_match() {
    let (server, _) = create_test_server(catalog());

    let response = server
        .get("/api/v1/exercises")
        .add_query_param("q", "shoulder stretch")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["results"][0]["id"], 1);

    let response = server
        .get("/api/v1/exercises")
        .add_query_param("q", "Shoulder")
        .await;
    let body: Value = response.json();
    let ids: Vec<i64> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 4]);
}

#[tokio::test]
async fn test_search_tag_filter_is_intersection() {
    let (server, _) = create_test_server(catalog());

    let response = server
        .get("/api/v1/exercises")
        .add_query_param("tags", "beginner, strength")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], 4);
}

#[tokio::test]
async fn test_search_caps_and_rejects_missing_page() {
    let items: Vec<CatalogItem> = (1..=23)
        .map(|id| CatalogItem::new(id, format!("Drill {}", id), "Practice"))
        .collect();
    let (server, _) = create_test_server(items);

    let response = server
        .get("/api/v1/exercises")
        .add_query_param("page", 4)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 20);
    assert_eq!(body["total_pages"], 4);
    assert_eq!(body["results"][4]["id"], 20);

    let response = server
        .get("/api/v1/exercises")
        .add_query_param("page", 5)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_item_and_missing_item() {
    let (server, _) = create_test_server(catalog());

    let response = server.get("/api/v1/exercises/2").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["name"], "Box breathing");
    assert_eq!(body["category"], "stretch");

    let response = server.get("/api/v1/exercises/99").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_routine_toggle_flow() {
    let (server, store) = create_test_server(catalog());
    let user = UserId::new();

    let (name, value) = user_header(user);
    let response = server
        .post("/api/v1/routines/1")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["created"], true);
    assert_eq!(body["exercise"]["name"], "Shoulder stretch");

    let (name, value) = user_header(user);
    let response = server
        .post("/api/v1/routines/1")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["created"], false);
    assert_eq!(store.routine_count().await, 1);

    let (name, value) = user_header(user);
    let response = server
        .delete("/api/v1/routines/1")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NO_CONTENT);

    let (name, value) = user_header(user);
    let response = server
        .delete("/api/v1/routines/1")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_routine_unknown_exercise() {
    let (server, store) = create_test_server(catalog());
    let (name, value) = user_header(UserId::new());

    let response = server
        .post("/api/v1/routines/42")
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(store.routine_count().await, 0);
}

#[tokio::test]
async fn test_routine_list_orders_by_views() {
    let (server, _) = create_test_server(catalog());
    let user = UserId::new();

    for id in [1, 2] {
        let (name, value) = user_header(user);
        server
            .post(&format!("/api/v1/routines/{}", id))
            .add_header(name, value)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let (name, value) = user_header(user);
    server
        .get("/api/v1/exercises/1")
        .add_header(name, value)
        .await
        .assert_status_ok();

    let (name, value) = user_header(user);
    let response = server.get("/api/v1/routines").add_header(name, value).await;
    response.assert_status_ok();

    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0]["item_id"], 1);
    assert_eq!(results[0]["view_count"], 1);
    assert_eq!(results[0]["exercise"]["id"], 1);
    assert_eq!(results[1]["item_id"], 2);
}

#[tokio::test]
async fn test_history_lists_own_logs_newest_first() {
    let (server, _) = create_test_server(catalog());
    let user = UserId::new();

    for concern in ["neck", "back"] {
        let (name, value) = user_header(user);
        server
            .post("/api/v1/recommendations")
            .add_header(name, value)
            .json(&json!({ "fatigue_level": 3, "mood_level": 3, "body_concern": concern }))
            .await
            .assert_status_ok();
    }

    let (name, value) = user_header(UserId::new());
    let response = server.get("/api/v1/history").add_header(name, value).await;
    let body: Value = response.json();
    assert_eq!(body["count"], 0);

    let (name, value) = user_header(user);
    let response = server.get("/api/v1/history").add_header(name, value).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 2);
    assert_eq!(body["results"][0]["body_concern"], "back");
    assert_eq!(body["results"][1]["body_concern"], "neck");

    let (name, value) = user_header(user);
    let response = server
        .get("/api/v1/history")
        .add_query_param("page", 2)
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}
