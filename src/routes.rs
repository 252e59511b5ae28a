use crate::app::AppState;
use crate::handlers::{ask_question, health_check};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/askQuestion", post(ask_question))
}
