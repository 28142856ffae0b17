//! crates/tripwala_core/src/tables.rs
//!
//! Static travel configuration: one-way distances from the origin hubs, per-kilometer
//! transport rates, and the alias table that maps a destination's display name to the
//! key the distance table is indexed by.
//!
//! The standard tables are compiled in. A JSON file with the same shape can replace
//! them at startup:
//!
//! ```json
//! {
//!   "distances": { "Sangli": { "Kolhapur": 50 } },
//!   "pricing": { "Car": { "rate_per_km": 14.0, "discipline": "flat" } },
//!   "aliases": { "Ratnagiri": "Konkan" }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::PricingDiscipline;

#[derive(Debug, thiserror::Error)]
pub enum TablesError {
    #[error("Travel tables are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Transport mode '{mode}' has a non-positive rate {rate}")]
    InvalidRate { mode: String, rate: f64 },
    #[error("Travel tables define no {0}")]
    Empty(&'static str),
    #[error("Distance from {hub} to {lookup_key} exceeds {} km (got {km})", MAX_DISTANCE_KM)]
    DistanceOutOfRange {
        hub: String,
        lookup_key: String,
        km: u32,
    },
}

/// Longest tabulated one-way distance; a round trip must still fit in a `u32`.
pub const MAX_DISTANCE_KM: u32 = u32::MAX / 2;

//=========================================================================================
// Distance Table
//=========================================================================================

/// One-way kilometers, indexed by hub and then by destination lookup key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DistanceTable {
    hubs: BTreeMap<String, BTreeMap<String, u32>>,
}

impl DistanceTable {
    pub fn insert(&mut self, hub: impl Into<String>, lookup_key: impl Into<String>, km: u32) {
        self.hubs
            .entry(hub.into())
            .or_default()
            .insert(lookup_key.into(), km);
    }

    /// `None` means the pair is not tabulated, which is never the same as zero.
    pub fn lookup(&self, hub: &str, lookup_key: &str) -> Option<u32> {
        self.hubs.get(hub)?.get(lookup_key).copied()
    }

    /// Hub names in ascending order.
    pub fn hubs(&self) -> impl Iterator<Item = &str> {
        self.hubs.keys().map(String::as_str)
    }

    /// Every `(hub, lookup_key, km)` entry.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.hubs.iter().flat_map(|(hub, row)| {
            row.iter()
                .map(move |(key, km)| (hub.as_str(), key.as_str(), *km))
        })
    }
}

//=========================================================================================
// Pricing Table
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransportRate {
    pub rate_per_km: f64,
    pub discipline: PricingDiscipline,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct PricingTable {
    modes: BTreeMap<String, TransportRate>,
}

impl PricingTable {
    pub fn insert(&mut self, mode: impl Into<String>, rate: TransportRate) {
        self.modes.insert(mode.into(), rate);
    }

    pub fn get(&self, mode: &str) -> Option<TransportRate> {
        self.modes.get(mode).copied()
    }

    /// Modes in ascending name order.
    pub fn modes(&self) -> impl Iterator<Item = (&str, TransportRate)> {
        self.modes.iter().map(|(name, rate)| (name.as_str(), *rate))
    }
}

//=========================================================================================
// Alias Table
//=========================================================================================

/// Display names whose distance lookup key differs from the name itself.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn insert(&mut self, display_name: impl Into<String>, lookup_key: impl Into<String>) {
        self.aliases.insert(display_name.into(), lookup_key.into());
    }

    /// Exact, byte-for-byte match; names without an alias are their own key.
    pub fn lookup_key<'a>(&'a self, display_name: &'a str) -> &'a str {
        self.aliases
            .get(display_name)
            .map(String::as_str)
            .unwrap_or(display_name)
    }
}

//=========================================================================================
// Travel Tables
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TravelTables {
    pub distances: DistanceTable,
    pub pricing: PricingTable,
    #[serde(default)]
    pub aliases: AliasTable,
}

const STANDARD_DESTINATIONS: [&str; 17] = [
    "Matheran",
    "Konkan",
    "Malshej Ghat",
    "Mumbai",
    "Pune",
    "Lonavala & Khandala",
    "Mahabaleshwar",
    "Chhatrapati Sambhaji Nagar",
    "Nashik",
    "Alibaug",
    "Shirdi",
    "Tadoba National Park",
    "Ganpatipule",
    "Kolhapur",
    "Tarkarli",
    "Panchgani",
    "Raigad Fort",
];

// Same column order as STANDARD_DESTINATIONS.
const STANDARD_DISTANCES: [(&str, [u32; 17]); 3] = [
    (
        "Sangli",
        [345, 185, 390, 375, 235, 295, 185, 470, 450, 375, 420, 890, 215, 50, 215, 175, 305],
    ),
    (
        "Ashta",
        [315, 155, 360, 345, 210, 270, 155, 445, 425, 345, 395, 860, 165, 70, 185, 145, 275],
    ),
    (
        "Islampur",
        [320, 150, 355, 340, 200, 265, 145, 435, 415, 340, 385, 850, 155, 60, 180, 135, 270],
    ),
];

const STANDARD_ALIASES: [(&str, &str); 2] = [
    ("Konkan", "Konkan"),
    ("Chhatrapati Sambhaji Nagar", "Chhatrapati Sambhaji Nagar"),
];

impl TravelTables {
    /// The compiled-in tables: three hubs, seventeen destinations, Bus and Car.
    pub fn standard() -> Self {
        let mut distances = DistanceTable::default();
        for (hub, row) in STANDARD_DISTANCES {
            for (destination, km) in STANDARD_DESTINATIONS.iter().zip(row) {
                distances.insert(hub, *destination, km);
            }
        }

        let mut pricing = PricingTable::default();
        pricing.insert(
            "Bus",
            TransportRate {
                rate_per_km: 2.5,
                discipline: PricingDiscipline::PerPerson,
            },
        );
        pricing.insert(
            "Car",
            TransportRate {
                rate_per_km: 14.0,
                discipline: PricingDiscipline::Flat,
            },
        );

        let mut aliases = AliasTable::default();
        for (display_name, lookup_key) in STANDARD_ALIASES {
            aliases.insert(display_name, lookup_key);
        }

        Self {
            distances,
            pricing,
            aliases,
        }
    }

    /// Parses and validates a tables file.
    pub fn from_json(json: &str) -> Result<Self, TablesError> {
        let tables: Self = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> Result<(), TablesError> {
        if self.distances.hubs().next().is_none() {
            return Err(TablesError::Empty("start cities"));
        }
        if let Some((hub, lookup_key, km)) = self
            .distances
            .entries()
            .find(|(_, _, km)| *km > MAX_DISTANCE_KM)
        {
            return Err(TablesError::DistanceOutOfRange {
                hub: hub.to_string(),
                lookup_key: lookup_key.to_string(),
                km,
            });
        }
        if self.pricing.modes().next().is_none() {
            return Err(TablesError::Empty("transport modes"));
        }
        for (mode, rate) in self.pricing.modes() {
            if !(rate.rate_per_km.is_finite() && rate.rate_per_km > 0.0) {
                return Err(TablesError::InvalidRate {
                    mode: mode.to_string(),
                    rate: rate.rate_per_km,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_tables_cover_every_hub_and_destination() {
        let tables = TravelTables::standard();
        let hubs: Vec<&str> = tables.distances.hubs().collect();
        assert_eq!(hubs, vec!["Ashta", "Islampur", "Sangli"]);

        for hub in &hubs {
            for destination in STANDARD_DESTINATIONS {
                let key = tables.aliases.lookup_key(destination);
                assert!(
                    tables.distances.lookup(hub, key).is_some(),
                    "missing {hub} -> {destination}"
                );
            }
        }
        assert_eq!(tables.distances.lookup("Sangli", "Matheran"), Some(345));
        assert_eq!(tables.distances.lookup("Islampur", "Kolhapur"), Some(60));
        assert_eq!(tables.distances.lookup("Sangli", "Lonavala & Khandala"), Some(295));
    }

    #[test]
    fn absent_pairs_are_not_zero() {
        let tables = TravelTables::standard();
        assert_eq!(tables.distances.lookup("Sangli", "Goa"), None);
        assert_eq!(tables.distances.lookup("Satara", "Matheran"), None);
        assert_eq!(tables.distances.lookup("Sangli", "lonavala & khandala"), None);
    }

    #[test]
    fn standard_pricing_tags_bus_per_person_and_car_flat() {
        let tables = TravelTables::standard();
        let bus = tables.pricing.get("Bus").unwrap();
        let car = tables.pricing.get("Car").unwrap();
        assert_eq!(bus.discipline, PricingDiscipline::PerPerson);
        assert_eq!(bus.rate_per_km, 2.5);
        assert_eq!(car.discipline, PricingDiscipline::Flat);
        assert_eq!(car.rate_per_km, 14.0);
        assert!(tables.pricing.get("Train").is_none());
    }

    #[test]
    fn alias_table_falls_back_to_display_name() {
        let mut aliases = AliasTable::default();
        aliases.insert("Ratnagiri Coast", "Konkan");
        assert_eq!(aliases.lookup_key("Ratnagiri Coast"), "Konkan");
        assert_eq!(aliases.lookup_key("Pune"), "Pune");
    }

    #[test]
    fn from_json_loads_a_custom_table() {
        let json = r#"{
            "distances": { "Miraj": { "Kolhapur": 55, "Konkan": 190 } },
            "pricing": {
                "Bus": { "rate_per_km": 3.0, "discipline": "per_person" },
                "Car": { "rate_per_km": 12.5, "discipline": "flat" }
            },
            "aliases": { "Ratnagiri": "Konkan" }
        }"#;
        let tables = TravelTables::from_json(json).unwrap();
        assert_eq!(tables.distances.lookup("Miraj", "Kolhapur"), Some(55));
        assert_eq!(tables.aliases.lookup_key("Ratnagiri"), "Konkan");
        assert_eq!(tables.pricing.get("Car").unwrap().rate_per_km, 12.5);
    }

    #[test]
    fn from_json_rejects_non_positive_rates() {
        let json = r#"{
            "distances": { "Miraj": { "Kolhapur": 55 } },
            "pricing": { "Walk": { "rate_per_km": 0.0, "discipline": "per_person" } }
        }"#;
        let err = TravelTables::from_json(json).unwrap_err();
        assert!(matches!(err, TablesError::InvalidRate { ref mode, .. } if mode == "Walk"));
    }

    #[test]
    fn from_json_rejects_unknown_discipline() {
        let json = r#"{
            "distances": { "Miraj": { "Kolhapur": 55 } },
            "pricing": { "Car": { "rate_per_km": 14.0, "discipline": "per_seat" } }
        }"#;
        assert!(matches!(
            TravelTables::from_json(json),
            Err(TablesError::Malformed(_))
        ));
    }

    #[test]
    fn from_json_rejects_empty_hubs() {
        let json = r#"{ "distances": {}, "pricing": { "Car": { "rate_per_km": 14.0, "discipline": "flat" } } }"#;
        assert!(matches!(
            TravelTables::from_json(json),
            Err(TablesError::Empty("start cities"))
        ));
    }

    #[test]
    fn from_json_rejects_distances_whose_round_trip_overflows() {
        let json = r#"{
            "distances": { "Sangli": { "Matheran": 3000000000 } },
            "pricing": { "Car": { "rate_per_km": 14.0, "discipline": "flat" } }
        }"#;
        let err = TravelTables::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            TablesError::DistanceOutOfRange { ref hub, km: 3_000_000_000, .. } if hub == "Sangli"
        ));

        let at_limit = format!(
            r#"{{
                "distances": {{ "Sangli": {{ "Matheran": {MAX_DISTANCE_KM} }} }},
                "pricing": {{ "Car": {{ "rate_per_km": 14.0, "discipline": "flat" }} }}
            }}"#
        );
        assert!(TravelTables::from_json(&at_limit).is_ok());
    }
}
