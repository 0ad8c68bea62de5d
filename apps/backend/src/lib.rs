pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use kana_core::quiz::ChoiceQuiz;
use kana_core::session::Session;
use kana_core::types::ScriptFilter;

use crate::services::jisho::JishoClient;

/// A stored session together with the script filter it was built for.
pub struct PracticeEntry {
    pub script: ScriptFilter,
    pub session: Session,
}

/// Shared application state. Sessions and quizzes are in-memory only;
/// the kana pools they hold are rebuilt from static tables on demand.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<Uuid, PracticeEntry>>>,
    pub quizzes: Arc<RwLock<HashMap<Uuid, ChoiceQuiz>>>,
    pub jisho: Arc<JishoClient>,
}

impl AppState {
    pub fn new(jisho: JishoClient) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            quizzes: Arc::new(RwLock::new(HashMap::new())),
            jisho: Arc::new(jisho),
        }
    }
}

/// Build the full router over the given state. Split out so tests can
/// run against an in-process server.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Word lookup
        .route("/api/words", get(routes::words::lookup))
        // Reference charts
        .route("/api/kana", get(routes::reference::kana_chart))
        .route("/api/numbers", get(routes::reference::number_chart))
        // Practice sessions
        .route("/api/sessions", post(routes::sessions::create))
        .route("/api/sessions/{id}", get(routes::sessions::get))
        .route("/api/sessions/{id}", delete(routes::sessions::delete))
        .route("/api/sessions/{id}/submit", post(routes::sessions::submit))
        .route("/api/sessions/{id}/skip", post(routes::sessions::skip))
        .route("/api/sessions/{id}/next", post(routes::sessions::next))
        .route("/api/sessions/{id}/script", put(routes::sessions::change_script))
        .route(
            "/api/sessions/{id}/selection",
            post(routes::sessions::toggle_selection),
        )
        .route(
            "/api/sessions/{id}/curated",
            post(routes::sessions::start_curated),
        )
        .route(
            "/api/sessions/{id}/back",
            post(routes::sessions::back_to_selection),
        )
        .route(
            "/api/sessions/{id}/start-over",
            post(routes::sessions::start_over),
        )
        .route(
            "/api/sessions/{id}/practice-mistakes",
            post(routes::sessions::practice_mistakes),
        )
        // Numeral quiz
        .route("/api/quiz", post(routes::quiz::create))
        .route("/api/quiz/{id}", get(routes::quiz::get))
        .route("/api/quiz/{id}", delete(routes::quiz::delete))
        .route("/api/quiz/{id}/answer", post(routes::quiz::answer))
        .route("/api/quiz/{id}/next", post(routes::quiz::next))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = AppState::new(JishoClient::new());
    let app = app_router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
