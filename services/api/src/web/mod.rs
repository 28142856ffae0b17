pub mod protocol;
pub mod rest;
pub mod state;

use axum::{routing::get, Router};
use std::sync::Arc;

pub use rest::{
    estimate_handler, list_bookings_handler, list_destinations_handler, root_handler,
    travel_options_handler,
};
use state::AppState;

/// The read API routes. Cross-cutting layers (CORS, tracing, docs) are added by
/// the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/destinations", get(list_destinations_handler))
        .route("/bookings/{username}", get(list_bookings_handler))
        .route("/travel-options", get(travel_options_handler))
        .route("/estimate", get(estimate_handler))
        .with_state(app_state)
}
