//! gradebook-api library - HTTP surface for the grade tracker
//!
//! Serves the compiled course view as JSON, accepts single-grade updates
//! and exports the view as CSV.

use axum::http::{header, Method};
use axum::Router;
use gradebook_common::Gradebook;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub gradebook: Arc<Gradebook>,
}

impl AppState {
    pub fn new(gradebook: Gradebook) -> Self {
        Self {
            gradebook: Arc::new(gradebook),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/api/dados", get(api::get_courses))
        .route("/api/atualizar", post(api::update_course))
        .route("/exportar_csv", get(api::export_csv))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Any origin may call the API (the UI is often served from another port)
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
