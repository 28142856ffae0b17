pub mod admin;
pub mod catalog;
pub mod display;
pub mod domain;
pub mod estimator;
pub mod memory;
pub mod payment;
pub mod ports;
pub mod seed;
pub mod tables;
pub mod wizard;

pub use admin::{AdminCommand, AdminError, AdminOutcome, ValidationError};
pub use catalog::{display_image_url, CatalogFilter, PLACEHOLDER_IMAGE_URL};
pub use display::format_rupees;
pub use domain::{
    Booking, BookingId, Destination, DestinationDraft, DestinationId, PricingDiscipline,
    TripEstimate, TripRequest,
};
pub use estimator::{estimate_trip, EstimateError};
pub use memory::InMemoryStore;
pub use payment::PaymentRequest;
pub use ports::{BookingStore, CatalogStore, PortError, PortResult};
pub use seed::{seed_if_empty, SeedError};
pub use tables::{TablesError, TravelTables, TransportRate, MAX_DISTANCE_KM};
pub use wizard::{BookingOutcome, TravellerDetails, TripWizard, WizardError, WizardState};
