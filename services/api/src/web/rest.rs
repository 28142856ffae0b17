//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the read-only REST API and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    BookingResponse, CatalogQuery, DestinationResponse, EstimateQuery, EstimateResponse,
    TransportModeResponse, TravelOptionsResponse, WelcomeResponse,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{debug, error};
use tripwala_core::catalog::CatalogFilter;
use tripwala_core::domain::TripRequest;
use tripwala_core::estimator::{estimate_trip, EstimateError};
use tripwala_core::ports::PortError;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        root_handler,
        list_destinations_handler,
        list_bookings_handler,
        travel_options_handler,
        estimate_handler,
    ),
    components(
        schemas(
            WelcomeResponse,
            DestinationResponse,
            BookingResponse,
            TravelOptionsResponse,
            TransportModeResponse,
            EstimateResponse,
        )
    ),
    tags(
        (name = "Trip Wala API", description = "Read-only access to the destination catalog, bookings and trip estimates.")
    )
)]
pub struct ApiDoc;

type HandlerError = (StatusCode, String);

/// Logs the storage failure and hides driver details from the client.
fn storage_failure(context: &str, e: PortError) -> HandlerError {
    error!("{}: {:?}", context, e);
    (StatusCode::INTERNAL_SERVER_ERROR, context.to_string())
}

fn estimate_failure(e: EstimateError) -> HandlerError {
    let status = match e {
        EstimateError::DistanceUnavailable { .. }
        | EstimateError::DistanceOutOfRange { .. }
        | EstimateError::CostOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EstimateError::UnknownTransportMode(_)
        | EstimateError::InvalidPartySize
        | EstimateError::InvalidStayDays => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Liveness check.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "The API is running", body = WelcomeResponse))
)]
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to the Trip Wala API!".to_string(),
    })
}

/// List the destination catalog, sorted by name.
///
/// Without query parameters this is the full catalog.
#[utoipa::path(
    get,
    path = "/destinations",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Destinations sorted by name", body = Vec<DestinationResponse>),
        (status = 500, description = "Catalog storage unavailable")
    )
)]
pub async fn list_destinations_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<DestinationResponse>>, HandlerError> {
    let destinations = app_state
        .catalog
        .list_destinations()
        .await
        .map_err(|e| storage_failure("Failed to load destinations", e))?;

    let filter = CatalogFilter::from(query);
    let destinations = if filter.is_empty() {
        destinations
    } else {
        filter.apply(destinations)
    };

    Ok(Json(destinations.into_iter().map(Into::into).collect()))
}

/// List a user's bookings, newest first.
#[utoipa::path(
    get,
    path = "/bookings/{username}",
    params(("username" = String, Path, description = "The user whose bookings to list.")),
    responses(
        (status = 200, description = "Bookings, most recent first; empty if none", body = Vec<BookingResponse>),
        (status = 500, description = "Booking storage unavailable")
    )
)]
pub async fn list_bookings_handler(
    State(app_state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<Vec<BookingResponse>>, HandlerError> {
    let bookings = app_state
        .bookings
        .list_bookings_for_user(&username)
        .await
        .map_err(|e| storage_failure("Failed to load bookings", e))?;

    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

/// The start cities and transport modes a trip can be planned with.
#[utoipa::path(
    get,
    path = "/travel-options",
    responses((status = 200, description = "Sorted start cities and transport modes", body = TravelOptionsResponse))
)]
pub async fn travel_options_handler(
    State(app_state): State<Arc<AppState>>,
) -> Json<TravelOptionsResponse> {
    Json(TravelOptionsResponse::from(app_state.tables.as_ref()))
}

/// Compute an itemized budget estimate without booking anything.
#[utoipa::path(
    get,
    path = "/estimate",
    params(EstimateQuery),
    responses(
        (status = 200, description = "Itemized estimate", body = EstimateResponse),
        (status = 400, description = "Invalid party size, stay, or transport mode"),
        (status = 404, description = "Unknown destination"),
        (status = 422, description = "Distance data unavailable for this start city and destination"),
        (status = 500, description = "Catalog storage unavailable")
    )
)]
pub async fn estimate_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<EstimateQuery>,
) -> Result<Json<EstimateResponse>, HandlerError> {
    let destination = app_state
        .catalog
        .list_destinations()
        .await
        .map_err(|e| storage_failure("Failed to load destinations", e))?
        .into_iter()
        .find(|d| d.name == query.destination)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                format!("Unknown destination: {}", query.destination),
            )
        })?;

    let request = TripRequest {
        start_city: query.start_city,
        num_people: query.num_people,
        stay_days: query.stay_days,
        transport_mode: query.transport_mode,
    };
    let estimate =
        estimate_trip(&destination, &request, &app_state.tables).map_err(estimate_failure)?;
    debug!(
        "Estimated {} -> {}: {}",
        estimate.start_city, estimate.destination_name, estimate.total_cost
    );

    Ok(Json(estimate.into()))
}
