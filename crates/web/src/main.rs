use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, Mutex, MutexGuard};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use chess_duel_core::GameSession;

mod config;
mod routes;

use config::ServerConfig;

pub struct AppState {
    pub session: Mutex<GameSession>,
}

impl AppState {
    pub fn session(&self) -> MutexGuard<'_, GameSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::load().expect("Failed to load config");

    let session = GameSession::new(config.game.clone());
    let first_wakeup = session.next_wakeup();
    let state = Arc::new(AppState {
        session: Mutex::new(session),
    });
    routes::api::schedule_wakeup(&state, first_wakeup);

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/state", get(routes::api::state))
        .route("/api/select", post(routes::api::select))
        .route("/api/move", post(routes::api::attempt_move))
        .route("/api/click", post(routes::api::click))
        .route("/api/reset", post(routes::api::reset))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .expect("Failed to bind listener");

    info!(human = %config.game.human, "Server running at http://{}", config.bind);

    axum::serve(listener, app).await.expect("Server error");
}
