//! crates/tripwala_core/src/estimator.rs
//!
//! The budget estimator: a pure function from a destination, the planner's
//! selections and the travel tables to an itemized `TripEstimate`.

use crate::domain::{Destination, PricingDiscipline, TripEstimate, TripRequest};
use crate::tables::TravelTables;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("Distance data unavailable from {start_city} to {lookup_key}")]
    DistanceUnavailable {
        start_city: String,
        lookup_key: String,
    },
    #[error("Unknown transport mode: {0}")]
    UnknownTransportMode(String),
    #[error("A trip needs at least one person")]
    InvalidPartySize,
    #[error("A trip needs at least one stay day")]
    InvalidStayDays,
    #[error("Base cost overflows for {0}")]
    CostOverflow(String),
    #[error("Distance from {start_city} to {lookup_key} is out of range ({km} km)")]
    DistanceOutOfRange {
        start_city: String,
        lookup_key: String,
        km: u32,
    },
}

/// Computes the cost breakdown for one candidate trip.
///
/// A missing distance entry fails the whole estimate; the transport cost is never
/// silently dropped or computed from a zero distance.
pub fn estimate_trip(
    destination: &Destination,
    request: &TripRequest,
    tables: &TravelTables,
) -> Result<TripEstimate, EstimateError> {
    if request.num_people == 0 {
        return Err(EstimateError::InvalidPartySize);
    }
    if request.stay_days == 0 {
        return Err(EstimateError::InvalidStayDays);
    }

    let rate = tables
        .pricing
        .get(&request.transport_mode)
        .ok_or_else(|| EstimateError::UnknownTransportMode(request.transport_mode.clone()))?;

    let lookup_key = tables.aliases.lookup_key(&destination.name);
    let distance_km = tables
        .distances
        .lookup(&request.start_city, lookup_key)
        .ok_or_else(|| EstimateError::DistanceUnavailable {
            start_city: request.start_city.clone(),
            lookup_key: lookup_key.to_string(),
        })?;
    let round_trip_km = distance_km
        .checked_mul(2)
        .ok_or_else(|| EstimateError::DistanceOutOfRange {
            start_city: request.start_city.clone(),
            lookup_key: lookup_key.to_string(),
            km: distance_km,
        })?;

    let base_cost = destination
        .cost
        .checked_mul(i64::from(request.num_people))
        .and_then(|cost| cost.checked_mul(i64::from(request.stay_days)))
        .ok_or_else(|| EstimateError::CostOverflow(destination.name.clone()))?;

    let riders = match rate.discipline {
        PricingDiscipline::Flat => 1.0,
        PricingDiscipline::PerPerson => f64::from(request.num_people),
    };
    let transport_cost = f64::from(round_trip_km) * rate.rate_per_km * riders;

    Ok(TripEstimate {
        start_city: request.start_city.clone(),
        destination_name: destination.name.clone(),
        num_people: request.num_people,
        stay_days: request.stay_days,
        transport_mode: request.transport_mode.clone(),
        transport_rate: rate.rate_per_km,
        discipline: rate.discipline,
        cost_per_person_per_day: destination.cost,
        distance_km,
        round_trip_km,
        base_cost,
        transport_cost,
        total_cost: base_cost as f64 + transport_cost,
    })
}
