use newsweaver::parser::NewsParser;
use newsweaver::routing::Router;
use newsweaver::server::{build_rocket, AppState};
use rocket::http::Status;
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};

async fn setup_client() -> Client {
    let parser = NewsParser::builtin().expect("builtin tables");
    let rocket = build_rocket(AppState::new(Router::new(parser)), None);
    Client::tracked(rocket).await.expect("valid rocket instance")
}

#[tokio::test]
async fn test_health_and_status() {
    let client = setup_client().await;

    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().await.as_deref(), Some("OK"));

    let response = client.get("/api/v1/status").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("status json");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["languages_count"], 26);
    assert_eq!(body["topic_rules"], 12);
}

#[tokio::test]
async fn test_languages_are_listed_in_order() {
    let client = setup_client().await;
    let response = client.get("/api/v1/languages").dispatch().await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.expect("languages json");
    let list = body.as_array().expect("array");
    assert_eq!(list.len(), 26);
    assert_eq!(list[0]["code"], "English");
    assert_eq!(list[1]["display_name"], "Hindi (हिंदी)");
}

#[tokio::test]
async fn test_classify_endpoint() {
    let client = setup_client().await;
    let response = client
        .post("/api/v1/news/classify")
        .json(&json!({ "message": "breaking news today" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("classify json");
    assert_eq!(body["is_news"], true);
}

#[tokio::test]
async fn test_parse_endpoint_returns_pipeline_message() {
    let client = setup_client().await;
    let response = client
        .post("/api/v1/news/parse")
        .json(&json!({
            "query": "Tell me about current health news in French",
            "recipient_email": "reader@example.com"
        }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body: Value = response.into_json().await.expect("parse json");
    assert_eq!(body["success"], true);
    assert_eq!(body["processing_details"]["formatted"], "daily:health:French");
    assert_eq!(body["pipeline_message"], "daily:health:French:reader@example.com");
}

#[tokio::test]
async fn test_parse_endpoint_rejects_non_news() {
    let client = setup_client().await;
    let response = client
        .post("/api/v1/news/parse")
        .json(&json!({ "query": "xyz completely unrelated text" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);

    let body: Value = response.into_json().await.expect("error json");
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_structured_endpoint_validates_language() {
    let client = setup_client().await;

    let response = client
        .post("/api/v1/news/structured")
        .json(&json!({ "frequency": "Weekly", "topic": "markets", "language": "Dutch" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("structured json");
    assert_eq!(body["pipeline_message"], "weekly:markets:Dutch:");
    assert_eq!(body["processing_details"]["frequency"], "weekly");

    let response = client
        .post("/api/v1/news/structured")
        .json(&json!({ "frequency": "Weekly", "topic": "markets", "language": "Elvish" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[tokio::test]
async fn test_structured_endpoint_defaults_frequency_to_daily() {
    let client = setup_client().await;

    let response = client
        .post("/api/v1/news/structured")
        .json(&json!({ "topic": "markets", "language": "Dutch" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("structured json");
    assert_eq!(body["pipeline_message"], "daily:markets:Dutch:");

    let response = client
        .post("/api/v1/news/structured")
        .json(&json!({}))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("structured json");
    assert_eq!(body["pipeline_message"], "daily:general news:English:");
}

#[tokio::test]
async fn test_route_endpoint() {
    let client = setup_client().await;

    let response = client
        .post("/api/v1/route")
        .json(&json!({ "usecase": "News", "message": "Show me technology updates for this week" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.expect("route json");
    assert_eq!(body["outcome"], "dispatch");
    assert_eq!(body["message"], "weekly:technology:English");

    let response = client
        .post("/api/v1/route")
        .json(&json!({ "usecase": "Weather Bot", "message": "hello" }))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}
