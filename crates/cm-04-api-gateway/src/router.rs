//! Route table and shared handler state.

use crate::domain::config::GatewayConfig;
use crate::middleware::auth::{require_admin, AdminGate};
use crate::routes::{admin, public};
use axum::extract::DefaultBodyLimit;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use cm_02_naming_workflow::NamingWorkflowApi;
use cm_03_cat_registry::CatRegistryApi;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub naming: Arc<dyn NamingWorkflowApi>,
    pub registry: Arc<dyn CatRegistryApi>,
    pub gate: Arc<dyn AdminGate>,
}

/// Build the full HTTP router.
///
/// Admin routes sit behind [`require_admin`]; `/api/admin/check` is outside
/// the gate so a client can ask whether it is signed in.
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let admin_routes = Router::new()
        .route("/api/admin/voting", post(admin::apply_workflow_action))
        .route(
            "/api/admin/cats",
            get(admin::list_cats).post(admin::create_cat),
        )
        .route(
            "/api/admin/cats/:id",
            get(admin::get_cat)
                .put(admin::update_cat)
                .delete(admin::delete_cat),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route(
            "/api/suggestions",
            get(public::list_suggestions).post(public::submit_suggestion),
        )
        .route("/api/votes", post(public::submit_vote))
        .route("/api/voting-cats", get(public::list_voting_cats))
        .route("/api/cats", get(public::list_gallery))
        .route("/api/submit", post(public::submit_sighting))
        .route("/api/admin/check", get(admin::check))
        .merge(admin_routes)
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cm-api-gateway",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
