//! crates/tripwala_core/src/memory.rs
//!
//! A process-local implementation of both storage ports. Used by tests and by
//! anything that wants the planner without a database.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Booking, BookingId, Destination, DestinationDraft, DestinationId, TripEstimate};
use crate::ports::{BookingStore, CatalogStore, PortError, PortResult};

#[derive(Default)]
struct Tables {
    destinations: Vec<Destination>,
    bookings: Vec<Booking>,
    last_destination_id: DestinationId,
    last_booking_id: BookingId,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> PortResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| PortError::Storage("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_destinations(&self) -> PortResult<Vec<Destination>> {
        let mut destinations = self.lock()?.destinations.clone();
        destinations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(destinations)
    }

    async fn count_destinations(&self) -> PortResult<u64> {
        Ok(self.lock()?.destinations.len() as u64)
    }

    async fn add_destination(&self, draft: &DestinationDraft) -> PortResult<DestinationId> {
        let mut tables = self.lock()?;
        tables.last_destination_id += 1;
        let id = tables.last_destination_id;
        tables.destinations.push(Destination {
            id,
            name: draft.name.clone(),
            region: draft.region.clone(),
            highlights: draft.highlights.clone(),
            cost: draft.cost,
            image_url: draft.image_url.clone(),
        });
        Ok(id)
    }

    async fn update_destination(&self, id: DestinationId, draft: &DestinationDraft) -> PortResult<()> {
        let mut tables = self.lock()?;
        let destination = tables
            .destinations
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| PortError::NotFound(format!("Destination {} not found", id)))?;
        destination.name = draft.name.clone();
        destination.region = draft.region.clone();
        destination.highlights = draft.highlights.clone();
        destination.cost = draft.cost;
        destination.image_url = draft.image_url.clone();
        Ok(())
    }

    async fn remove_destination(&self, id: DestinationId) -> PortResult<()> {
        self.lock()?.destinations.retain(|d| d.id != id);
        Ok(())
    }
}

#[async_trait]
impl BookingStore for InMemoryStore {
    async fn save_booking(&self, username: &str, estimate: &TripEstimate) -> PortResult<BookingId> {
        let mut tables = self.lock()?;
        tables.last_booking_id += 1;
        let id = tables.last_booking_id;
        tables.bookings.push(Booking {
            id,
            username: username.to_string(),
            start_city: estimate.start_city.clone(),
            destination_name: estimate.destination_name.clone(),
            num_people: estimate.num_people,
            stay_days: estimate.stay_days,
            transport_mode: estimate.transport_mode.clone(),
            total_budget: estimate.total_cost,
            booked_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_bookings_for_user(&self, username: &str) -> PortResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .lock()?
            .bookings
            .iter()
            .filter(|b| b.username == username)
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.booked_at.cmp(&a.booked_at).then(b.id.cmp(&a.id)));
        Ok(bookings)
    }
}
