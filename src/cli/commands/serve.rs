//! HTTP API server.
//!
//! Serves the welcome page, raw transcripts and RAG answers.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{AskOutcome, Orchestrator, Reply};
use crate::transcript::TranscriptOutcome;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

const INDEX_HTML: &str = r#"<html>
    <head>
        <title>YouTube Transcript Q&amp;A API</title>
    </head>
    <body>
        <h1>Welcome to the YouTube Transcript Q&amp;A API</h1>
        <p>Use <code>GET /transcript/{video_id}</code> to fetch a transcript.</p>
        <p>Use <code>POST /ask</code> with <code>{"video_id": "...", "question": "..."}</code> to ask about a video.</p>
    </body>
</html>
"#;

/// Shared application state.
pub struct AppState {
    orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/transcript/{video_id}", get(transcript))
        .route("/ask", post(ask))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP API server.
///
/// Refuses to start without an OpenAI credential.
pub async fn run_serve(host: Option<String>, port: Option<u16>, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Serve, &settings) {
        Output::error(&e.to_string());
        return Err(e.into());
    }
    info!("OpenAI API key loaded successfully.");

    let orchestrator = Orchestrator::new(&settings)?;
    let state = Arc::new(AppState::new(orchestrator));
    let app = router(state);

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("ytqa API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Index", "GET  /");
    Output::kv("Health", "GET  /health");
    Output::kv("Transcript", "GET  /transcript/{video_id}");
    Output::kv("Ask (RAG)", "POST /ask");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request Types ===

#[derive(Debug, Deserialize)]
struct AskRequest {
    video_id: String,
    question: String,
}

// === Handlers ===

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn transcript(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> impl IntoResponse {
    let outcome = state.orchestrator.transcript(&video_id).await;
    let status = match outcome {
        TranscriptOutcome::Found(_) => StatusCode::OK,
        TranscriptOutcome::Unavailable(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(Reply::from(outcome)))
}

async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> impl IntoResponse {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            return (rejection.status(), Json(Reply::Error(rejection.body_text())));
        }
    };
    info!("Received request: video_id={} question={:?}", req.video_id, req.question);

    let outcome = state.orchestrator.ask(&req.video_id, &req.question).await;
    (ask_status(&outcome), Json(outcome.reply()))
}

/// HTTP status for an ask outcome. The JSON body carries the details.
fn ask_status(outcome: &AskOutcome) -> StatusCode {
    match outcome {
        AskOutcome::Answered(_) | AskOutcome::NoContext => StatusCode::OK,
        AskOutcome::NoTranscript => StatusCode::NOT_FOUND,
        AskOutcome::Errored(_) => StatusCode::BAD_GATEWAY,
    }
}
