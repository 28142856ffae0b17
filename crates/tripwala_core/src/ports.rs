//! crates/tripwala_core/src/ports.rs
//!
//! Defines the storage contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, so the estimator,
//! the wizard and the admin commands never see a concrete database.

use async_trait::async_trait;

use crate::domain::{Booking, BookingId, Destination, DestinationDraft, DestinationId, TripEstimate};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors of the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Storage Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All destinations, sorted by name ascending.
    async fn list_destinations(&self) -> PortResult<Vec<Destination>>;

    async fn count_destinations(&self) -> PortResult<u64>;

    /// Inserts a destination and returns its newly assigned id.
    async fn add_destination(&self, draft: &DestinationDraft) -> PortResult<DestinationId>;

    /// Replaces every field except the id. Fails with `NotFound` if the id is unknown.
    async fn update_destination(&self, id: DestinationId, draft: &DestinationDraft) -> PortResult<()>;

    /// Removing an unknown id is not an error.
    async fn remove_destination(&self, id: DestinationId) -> PortResult<()>;
}

#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Snapshots the estimate under `username`; the store assigns id and timestamp.
    async fn save_booking(&self, username: &str, estimate: &TripEstimate) -> PortResult<BookingId>;

    /// The user's bookings, newest first. Empty when the user has none.
    async fn list_bookings_for_user(&self, username: &str) -> PortResult<Vec<Booking>>;
}
