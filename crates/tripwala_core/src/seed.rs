//! crates/tripwala_core/src/seed.rs
//!
//! The default catalog, shipped as a versioned JSON asset and inserted on first start.

use serde::Deserialize;
use tracing::info;

use crate::domain::DestinationDraft;
use crate::ports::{CatalogStore, PortError};

const DEFAULT_CATALOG: &str = include_str!("../assets/destinations.json");

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Seed catalog is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Port(#[from] PortError),
}

#[derive(Deserialize)]
struct SeedCatalog {
    version: u32,
    destinations: Vec<DestinationDraft>,
}

/// The destinations inserted into an empty catalog, with the asset's version.
pub fn default_destinations() -> Result<(u32, Vec<DestinationDraft>), SeedError> {
    let catalog: SeedCatalog = serde_json::from_str(DEFAULT_CATALOG)?;
    Ok((catalog.version, catalog.destinations))
}

/// Populates the catalog with the defaults if, and only if, it is empty.
///
/// Returns how many destinations were inserted. Safe to call on every startup;
/// a concurrent insert between the count and the writes is not guarded against.
pub async fn seed_if_empty(store: &dyn CatalogStore) -> Result<usize, SeedError> {
    if store.count_destinations().await? > 0 {
        info!("Destination catalog already populated; skipping seed.");
        return Ok(0);
    }

    let (version, destinations) = default_destinations()?;
    info!(
        "Destination catalog empty. Seeding {} destinations (catalog v{})...",
        destinations.len(),
        version
    );
    for draft in &destinations {
        store.add_destination(draft).await?;
    }
    Ok(destinations.len())
}
