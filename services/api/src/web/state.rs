//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;
use tripwala_core::ports::{BookingStore, CatalogStore};
use tripwala_core::tables::TravelTables;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub bookings: Arc<dyn BookingStore>,
    pub tables: Arc<TravelTables>,
}
