//! crates/tripwala_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database; serde derives exist only so the
//! web layer and the seed asset can share them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type DestinationId = i64;
pub type BookingId = i64;

/// A catalog entry a trip can be planned to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub id: DestinationId,
    pub name: String,
    pub region: String,
    pub highlights: String,
    /// Currency units per person per day.
    pub cost: i64,
    /// Empty when the destination has no image.
    pub image_url: String,
}

/// The replaceable fields of a destination, used for both inserts and updates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DestinationDraft {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub highlights: String,
    pub cost: i64,
    #[serde(default)]
    pub image_url: String,
}

impl DestinationDraft {
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        highlights: impl Into<String>,
        cost: i64,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            highlights: highlights.into(),
            cost,
            image_url: image_url.into(),
        }
    }
}

/// How a transport mode's per-kilometer rate scales with the party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingDiscipline {
    /// One vehicle carries the whole party; the party size is ignored.
    Flat,
    /// Every traveller pays the rate.
    PerPerson,
}

impl PricingDiscipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingDiscipline::Flat => "flat",
            PricingDiscipline::PerPerson => "per_person",
        }
    }
}

/// What the user picked in the planner before asking for a budget.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub start_city: String,
    pub num_people: u32,
    pub stay_days: u32,
    pub transport_mode: String,
}

/// An itemized cost computation for one candidate trip.
///
/// Every intermediate is kept so the breakdown can be shown, not just the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripEstimate {
    pub start_city: String,
    pub destination_name: String,
    pub num_people: u32,
    pub stay_days: u32,
    pub transport_mode: String,
    pub transport_rate: f64,
    pub discipline: PricingDiscipline,
    pub cost_per_person_per_day: i64,
    pub distance_km: u32,
    pub round_trip_km: u32,
    pub base_cost: i64,
    pub transport_cost: f64,
    pub total_cost: f64,
}

/// A confirmed trip, snapshotted at booking time.
///
/// `destination_name` is a copy, not a reference: renaming or deleting the
/// destination later leaves the booking untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: BookingId,
    pub username: String,
    pub start_city: String,
    pub destination_name: String,
    pub num_people: u32,
    pub stay_days: u32,
    pub transport_mode: String,
    pub total_budget: f64,
    pub booked_at: DateTime<Utc>,
}
