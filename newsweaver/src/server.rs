use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, routes, Build, Rocket, State};
use serde::{Deserialize, Serialize};

use common::Config;

use crate::parser::{Language, ParsedNewsRequest};
use crate::pipeline::PipelineMessage;
use crate::routing::{NewsForm, RouteOutcome, Router, Usecase, NOT_NEWS_REASON};

/// Application state stored inside Rocket managed state.
#[derive(Clone)]
pub struct AppState {
    pub started_at: DateTime<Utc>,
    pub router: Router,
}

impl AppState {
    pub fn new(router: Router) -> Self {
        Self {
            started_at: Utc::now(),
            router,
        }
    }
}

type ApiError = (Status, Json<ErrorResponse>);

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        Status::BadRequest,
        Json(ErrorResponse {
            success: false,
            message: message.into(),
        }),
    )
}

/// Response structure for `/api/v1/status`.
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    uptime_seconds: i64,
    languages_count: usize,
    topic_rules: usize,
}

#[derive(Deserialize)]
struct ClassifyRequest {
    message: String,
}

#[derive(Serialize)]
struct ClassifyResponse {
    is_news: bool,
}

/// Natural-language news query, optionally with a recipient for the summary.
#[derive(Deserialize)]
struct NewsInvokeRequest {
    query: String,
    recipient_email: Option<String>,
}

#[derive(Serialize)]
struct NewsResponse {
    success: bool,
    message: &'static str,
    processing_details: ParsedNewsRequest,
    pipeline_message: String,
}

/// Sidebar-style request body. Frequency falls back to daily when omitted.
#[derive(Deserialize)]
struct StructuredNewsRequest {
    #[serde(default = "default_frequency")]
    frequency: String,
    topic: Option<String>,
    language: Option<String>,
    recipient_email: Option<String>,
}

fn default_frequency() -> String {
    "daily".to_string()
}

impl From<StructuredNewsRequest> for NewsForm {
    fn from(request: StructuredNewsRequest) -> Self {
        NewsForm {
            timeframe: request.frequency,
            topic: request.topic,
            language: request.language,
            recipient_email: request.recipient_email,
        }
    }
}

#[derive(Serialize)]
struct StructuredResponse {
    success: bool,
    pipeline_message: String,
    processing_details: PipelineMessage,
}

#[derive(Deserialize)]
struct RouteRequest {
    usecase: String,
    message: String,
}

#[get("/")]
async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Welcome to the News Weaver API" }))
}

#[get("/health")]
async fn health() -> &'static str {
    "OK"
}

/// Status endpoint returning uptime and the size of the loaded tables.
#[get("/api/v1/status")]
async fn status(state: &State<AppState>) -> Json<StatusResponse> {
    let uptime = (Utc::now() - state.started_at).num_seconds();
    let tables = state.router.parser().tables();

    Json(StatusResponse {
        status: "ok",
        uptime_seconds: uptime,
        languages_count: tables.languages().len(),
        topic_rules: tables.topics().rules().len(),
    })
}

/// Language registry in table order.
#[get("/api/v1/languages")]
async fn languages(state: &State<AppState>) -> Json<Vec<Language>> {
    Json(state.router.parser().languages().iter().cloned().collect())
}

#[post("/api/v1/news/classify", data = "<body>")]
async fn classify(state: &State<AppState>, body: Json<ClassifyRequest>) -> Json<ClassifyResponse> {
    Json(ClassifyResponse {
        is_news: state.router.parser().is_news_request(&body.message),
    })
}

/// Parse a free-form query. Rejects text that does not read as a news request.
#[post("/api/v1/news/parse", data = "<body>")]
async fn parse_news(
    state: &State<AppState>,
    body: Json<NewsInvokeRequest>,
) -> Result<Json<NewsResponse>, ApiError> {
    let parser = state.router.parser();
    if !parser.is_news_request(&body.query) {
        tracing::info!("rejected query that is not a news request");
        return Err(bad_request(NOT_NEWS_REASON));
    }

    let parsed = parser.parse(&body.query);
    let pipeline_message =
        PipelineMessage::from_request(&parsed, body.recipient_email.as_deref()).encode();
    tracing::info!(formatted = parsed.formatted(), "news query parsed");

    Ok(Json(NewsResponse {
        success: true,
        message: "News request parsed.",
        processing_details: parsed,
        pipeline_message,
    }))
}

/// Explicit frequency/topic/language, validated without classification.
#[post("/api/v1/news/structured", data = "<body>")]
async fn structured_news(
    state: &State<AppState>,
    body: Json<StructuredNewsRequest>,
) -> Result<Json<StructuredResponse>, ApiError> {
    let form = NewsForm::from(body.into_inner());
    match state.router.route_form(&form) {
        RouteOutcome::Dispatch { message, .. } => Ok(Json(StructuredResponse {
            success: true,
            processing_details: PipelineMessage::decode(&message),
            pipeline_message: message,
        })),
        RouteOutcome::Rejected { reason } => Err(bad_request(reason)),
    }
}

#[post("/api/v1/route", data = "<body>")]
async fn route_message(
    state: &State<AppState>,
    body: Json<RouteRequest>,
) -> Result<Json<RouteOutcome>, ApiError> {
    let usecase = body
        .usecase
        .parse::<Usecase>()
        .map_err(|e| bad_request(e.to_string()))?;
    Ok(Json(state.router.route_chat(usecase, &body.message)))
}

/// Build the Rocket instance with managed state, applying `[server]` bind/port if configured.
pub fn build_rocket(state: AppState, config: Option<&Config>) -> Rocket<Build> {
    let mut fig = rocket::Config::figment();
    if let Some(cfg) = config {
        let (bind, port) = cfg.server_address();
        if let Some(bind) = bind {
            fig = fig.merge(("address", bind.to_string()));
        }
        if let Some(port) = port {
            fig = fig.merge(("port", port));
        }
    }

    rocket::custom(fig).manage(state).mount(
        "/",
        routes![
            index,
            health,
            status,
            languages,
            classify,
            parse_news,
            structured_news,
            route_message,
        ],
    )
}

/// Start the HTTP server and run until Rocket shuts down (SIGINT/SIGTERM etc.).
pub async fn launch_rocket(state: AppState, config: Option<&Config>) -> Result<()> {
    let rocket = build_rocket(state, config);

    tracing::info!("Starting Rocket HTTP server");
    rocket
        .launch()
        .await
        .map_err(|e| anyhow!("Rocket failed: {}", e))?;

    tracing::info!("Rocket HTTP server has shut down");
    Ok(())
}
