pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use handlers::{calculate, export, verify};
use state::AppState;

/// Assemble every route. The verification file is mounted at the configured
/// path once, here, before the listener starts.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    state.config.validate()?;

    let api_routes = Router::new()
        .route("/calculate", post(calculate::calculate))
        .route("/scenarios", post(calculate::scenarios))
        .route("/export", post(export::export_scenarios));

    Ok(Router::new()
        .route("/health", get(health))
        .route(&state.config.verify_route(), get(verify::verification_file))
        .nest("/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
