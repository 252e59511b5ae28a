use std::any::Any;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    response::{IntoResponse, Response},
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::error::AppError;
use crate::exporter::DocumentExporter;
use crate::generator::{AnswerGenerator, OpenAiGenerator};
use crate::routes::create_routes;

/// Shared per-process collaborators handed to every request
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn AnswerGenerator>,
    pub exporter: Arc<DocumentExporter>,
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ask_question_svc=info,tower_http=debug,axum::rejection=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware
pub async fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing application router");

    let generator = OpenAiGenerator::from_config(config)?;
    let exporter = DocumentExporter::new(&config.output_dir)?;

    let state = AppState {
        generator: Arc::new(generator),
        exporter: Arc::new(exporter),
    };

    build_router(state, &config.allowed_origin)
}

/// Wires routes, state and middleware. Split out so tests can inject state.
pub fn build_router(state: AppState, allowed_origin: &str) -> Result<Router, anyhow::Error> {
    Ok(Router::new()
        .merge(create_routes())
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origin)?))
}

/// Only the configured browser origin may call the API.
/// Other origins get no `Access-Control-Allow-Origin` header at all.
fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, anyhow::Error> {
    let origin = HeaderValue::from_str(allowed_origin)
        .with_context(|| format!("Invalid ALLOWED_ORIGIN: {allowed_origin}"))?;

    Ok(CorsLayer::new()
        .allow_origin([origin])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::InternalServerError(format!("server error: {detail}")).into_response()
}
