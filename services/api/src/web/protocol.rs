//! services/api/src/web/protocol.rs
//!
//! Defines the JSON shapes exchanged with read API clients. Field names match the
//! persisted column names so external consumers see the same vocabulary as the
//! database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tripwala_core::catalog::CatalogFilter;
use tripwala_core::domain::{Booking, Destination, TripEstimate};
use tripwala_core::tables::TravelTables;
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Query Parameters
//=========================================================================================

/// Optional narrowing of the destination listing.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the destination name.
    pub search: Option<String>,
    /// Exact region name.
    pub region: Option<String>,
    /// Inclusive lower bound on cost per person per day.
    pub min_cost: Option<i64>,
    /// Inclusive upper bound on cost per person per day.
    pub max_cost: Option<i64>,
}

impl From<CatalogQuery> for CatalogFilter {
    fn from(query: CatalogQuery) -> Self {
        CatalogFilter {
            search: query.search,
            region: query.region,
            min_cost: query.min_cost,
            max_cost: query.max_cost,
        }
    }
}

/// The planner's selections for a budget estimate.
#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EstimateQuery {
    pub start_city: String,
    /// Destination display name, as listed by `/destinations`.
    pub destination: String,
    pub num_people: u32,
    pub stay_days: u32,
    pub transport_mode: String,
}

//=========================================================================================
// Responses
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct DestinationResponse {
    pub id: i64,
    pub name: String,
    pub region: String,
    pub highlights: String,
    pub cost: i64,
    pub image_url: String,
}

impl From<Destination> for DestinationResponse {
    fn from(d: Destination) -> Self {
        Self {
            id: d.id,
            name: d.name,
            region: d.region,
            highlights: d.highlights,
            cost: d.cost,
            image_url: d.image_url,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i64,
    pub start_city: String,
    pub destination_name: String,
    pub num_people: u32,
    pub stay_days: u32,
    pub transport_mode: String,
    pub total_budget: f64,
    pub booking_timestamp: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            start_city: b.start_city,
            destination_name: b.destination_name,
            num_people: b.num_people,
            stay_days: b.stay_days,
            transport_mode: b.transport_mode,
            total_budget: b.total_budget,
            booking_timestamp: b.booked_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct TransportModeResponse {
    pub name: String,
    pub rate_per_km: f64,
    /// `flat` or `per_person`.
    pub pricing_discipline: String,
}

#[derive(Serialize, ToSchema)]
pub struct TravelOptionsResponse {
    pub start_cities: Vec<String>,
    pub transport_modes: Vec<TransportModeResponse>,
}

impl From<&TravelTables> for TravelOptionsResponse {
    fn from(tables: &TravelTables) -> Self {
        Self {
            start_cities: tables.distances.hubs().map(str::to_string).collect(),
            transport_modes: tables
                .pricing
                .modes()
                .map(|(name, rate)| TransportModeResponse {
                    name: name.to_string(),
                    rate_per_km: rate.rate_per_km,
                    pricing_discipline: rate.discipline.as_str().to_string(),
                })
                .collect(),
        }
    }
}

/// A full, itemized budget estimate. Amounts are unrounded; `breakdown` carries
/// the display strings.
#[derive(Serialize, ToSchema)]
pub struct EstimateResponse {
    pub start_city: String,
    pub destination_name: String,
    pub num_people: u32,
    pub stay_days: u32,
    pub transport_mode: String,
    pub transport_rate: f64,
    pub pricing_discipline: String,
    pub cost_per_person_per_day: i64,
    pub distance_km: u32,
    pub round_trip_km: u32,
    pub base_cost: i64,
    pub transport_cost: f64,
    pub total_cost: f64,
    pub breakdown: Vec<String>,
}

impl From<TripEstimate> for EstimateResponse {
    fn from(e: TripEstimate) -> Self {
        let breakdown = e.breakdown();
        Self {
            start_city: e.start_city,
            destination_name: e.destination_name,
            num_people: e.num_people,
            stay_days: e.stay_days,
            transport_mode: e.transport_mode,
            transport_rate: e.transport_rate,
            pricing_discipline: e.discipline.as_str().to_string(),
            cost_per_person_per_day: e.cost_per_person_per_day,
            distance_km: e.distance_km,
            round_trip_km: e.round_trip_km,
            base_cost: e.base_cost,
            transport_cost: e.transport_cost,
            total_cost: e.total_cost,
            breakdown,
        }
    }
}
