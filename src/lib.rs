pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router. `main` and the integration tests share this
/// so both exercise the same routes, fallback and CORS behavior.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/availability", get(handlers::availability::check_availability))
        .route("/inquiry", post(handlers::inquiry::submit_inquiry))
        .route("/pay", get(handlers::payment::checkout_page))
        .route("/payhere/notify", post(handlers::payment::payhere_notify))
        .route("/admin/bookings", get(handlers::admin::list_bookings))
        .route("/admin/bookings/:id", patch(handlers::admin::patch_booking))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
