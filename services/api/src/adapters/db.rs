//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `CatalogStore` and `BookingStore` ports from the `core` crate. It handles
//! all interactions with the SQLite database using `sqlx`.
//!
//! Every operation is a single statement on a pooled connection; nothing is wrapped
//! in a transaction and concurrent writers are last-writer-wins.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tripwala_core::domain::{
    Booking, BookingId, Destination, DestinationDraft, DestinationId, TripEstimate,
};
use tripwala_core::ports::{BookingStore, CatalogStore, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements both storage ports.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the tables if they do not exist yet. Runs at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn storage_error(e: sqlx::Error) -> PortError {
    PortError::Storage(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

// Nullable columns are tolerated so databases created by older builds still load.
#[derive(FromRow)]
struct DestinationRecord {
    id: i64,
    name: String,
    region: String,
    highlights: Option<String>,
    cost: Option<i64>,
    image_url: Option<String>,
}
impl DestinationRecord {
    fn to_domain(self) -> Destination {
        Destination {
            id: self.id,
            name: self.name,
            region: self.region,
            highlights: self.highlights.unwrap_or_default(),
            cost: self.cost.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
        }
    }
}

#[derive(FromRow)]
struct BookingRecord {
    id: i64,
    username: String,
    start_city: Option<String>,
    destination_name: Option<String>,
    num_people: Option<i64>,
    stay_days: Option<i64>,
    transport_mode: Option<String>,
    total_budget: Option<f64>,
    booking_timestamp: Option<String>,
}
impl BookingRecord {
    fn to_domain(self) -> PortResult<Booking> {
        let booked_at = match self.booking_timestamp.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => DateTime::<Utc>::UNIX_EPOCH,
        };
        Ok(Booking {
            id: self.id,
            username: self.username,
            start_city: self.start_city.unwrap_or_default(),
            destination_name: self.destination_name.unwrap_or_default(),
            num_people: count(self.num_people, "num_people")?,
            stay_days: count(self.stay_days, "stay_days")?,
            transport_mode: self.transport_mode.unwrap_or_default(),
            total_budget: self.total_budget.unwrap_or_default(),
            booked_at,
        })
    }
}

/// SQLite stores `YYYY-MM-DD HH:MM:SS`, optionally with fractional seconds, in UTC.
fn parse_timestamp(raw: &str) -> PortResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
        .map_err(|e| PortError::Storage(format!("Invalid booking timestamp '{}': {}", raw, e)))
}

fn count(value: Option<i64>, column: &str) -> PortResult<u32> {
    let value = value.unwrap_or_default();
    u32::try_from(value)
        .map_err(|_| PortError::Storage(format!("Invalid {} in bookings: {}", column, value)))
}

//=========================================================================================
// `CatalogStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogStore for DbAdapter {
    async fn list_destinations(&self) -> PortResult<Vec<Destination>> {
        let records = sqlx::query_as::<_, DestinationRecord>(
            "SELECT id, name, region, highlights, cost, image_url FROM destinations ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn count_destinations(&self) -> PortResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM destinations")
            .fetch_one(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(total.max(0) as u64)
    }

    async fn add_destination(&self, draft: &DestinationDraft) -> PortResult<DestinationId> {
        let result = sqlx::query(
            "INSERT INTO destinations (name, region, highlights, cost, image_url) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&draft.name)
        .bind(&draft.region)
        .bind(&draft.highlights)
        .bind(draft.cost)
        .bind(&draft.image_url)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(result.last_insert_rowid())
    }

    async fn update_destination(&self, id: DestinationId, draft: &DestinationDraft) -> PortResult<()> {
        let result = sqlx::query(
            "UPDATE destinations SET name = ?, region = ?, highlights = ?, cost = ?, image_url = ? WHERE id = ?",
        )
        .bind(&draft.name)
        .bind(&draft.region)
        .bind(&draft.highlights)
        .bind(draft.cost)
        .bind(&draft.image_url)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Destination {} not found", id)));
        }
        Ok(())
    }

    async fn remove_destination(&self, id: DestinationId) -> PortResult<()> {
        sqlx::query("DELETE FROM destinations WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

//=========================================================================================
// `BookingStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl BookingStore for DbAdapter {
    async fn save_booking(&self, username: &str, estimate: &TripEstimate) -> PortResult<BookingId> {
        let result = sqlx::query(
            "INSERT INTO bookings (username, start_city, destination_name, num_people, stay_days, transport_mode, total_budget) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(username)
        .bind(&estimate.start_city)
        .bind(&estimate.destination_name)
        .bind(i64::from(estimate.num_people))
        .bind(i64::from(estimate.stay_days))
        .bind(&estimate.transport_mode)
        .bind(estimate.total_cost)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(result.last_insert_rowid())
    }

    async fn list_bookings_for_user(&self, username: &str) -> PortResult<Vec<Booking>> {
        let records = sqlx::query_as::<_, BookingRecord>(
            "SELECT id, username, start_city, destination_name, num_people, stay_days, transport_mode, total_budget, CAST(booking_timestamp AS TEXT) AS booking_timestamp FROM bookings WHERE username = ? ORDER BY booking_timestamp DESC, id DESC",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        records.into_iter().map(|r| r.to_domain()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use sqlx::sqlite::SqlitePoolOptions;
    use std::time::Duration;
    use tripwala_core::{estimate_trip, seed_if_empty, TravelTables, TripRequest};

    async fn adapter() -> DbAdapter {
        // A single long-lived connection keeps the in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let adapter = DbAdapter::new(pool);
        adapter.run_migrations().await.unwrap();
        adapter
    }

    fn draft(name: &str, cost: i64) -> DestinationDraft {
        DestinationDraft::new(name, "Maharashtra", "Beaches, Forts", cost, "")
    }

    async fn matheran_estimate(db: &DbAdapter, num_people: u32) -> TripEstimate {
        let destination = db
            .list_destinations()
            .await
            .unwrap()
            .into_iter()
            .find(|d| d.name == "Matheran")
            .unwrap();
        let request = TripRequest {
            start_city: "Sangli".to_string(),
            num_people,
            stay_days: 3,
            transport_mode: "Car".to_string(),
        };
        estimate_trip(&destination, &request, &TravelTables::standard()).unwrap()
    }

    #[tokio::test]
    async fn destinations_are_listed_by_name() {
        let db = adapter().await;
        for (name, cost) in [("Shirdi", 550), ("Alibaug", 420), ("Nashik", 480)] {
            db.add_destination(&draft(name, cost)).await.unwrap();
        }

        let names: Vec<String> = db
            .list_destinations()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Alibaug", "Nashik", "Shirdi"]);
        assert_eq!(db.count_destinations().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn add_update_and_remove() {
        let db = adapter().await;
        let id = db.add_destination(&draft("Tarkarli", 650)).await.unwrap();

        let mut changed = draft("Tarkarli Beach", 700);
        changed.image_url = "https://example.org/tarkarli.jpg".to_string();
        db.update_destination(id, &changed).await.unwrap();

        let listed = db.list_destinations().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, id);
        assert_eq!(listed[0].name, "Tarkarli Beach");
        assert_eq!(listed[0].cost, 700);
        assert_eq!(listed[0].image_url, "https://example.org/tarkarli.jpg");

        db.remove_destination(id).await.unwrap();
        db.remove_destination(id).await.unwrap();
        assert!(db.list_destinations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updating_a_missing_destination_is_not_found() {
        let db = adapter().await;
        let err = db.update_destination(99, &draft("Pune", 450)).await.unwrap_err();
        assert!(matches!(err, PortError::NotFound(_)));
    }

    #[tokio::test]
    async fn seeding_twice_keeps_the_row_count() {
        let db = adapter().await;
        assert_eq!(seed_if_empty(&db).await.unwrap(), 17);
        assert_eq!(seed_if_empty(&db).await.unwrap(), 0);
        assert_eq!(db.count_destinations().await.unwrap(), 17);
    }

    #[tokio::test]
    async fn saved_booking_comes_back_first_and_unchanged() {
        let db = adapter().await;
        seed_if_empty(&db).await.unwrap();

        let older = matheran_estimate(&db, 2).await;
        let newer = matheran_estimate(&db, 4).await;
        let older_id = db.save_booking("asha", &older).await.unwrap();
        let newer_id = db.save_booking("asha", &newer).await.unwrap();
        db.save_booking("ravi", &older).await.unwrap();

        let bookings = db.list_bookings_for_user("asha").await.unwrap();
        assert_eq!(bookings.len(), 2);
        assert_eq!(bookings[0].id, newer_id);
        assert_eq!(bookings[1].id, older_id);
        assert!(bookings[0].booked_at >= bookings[1].booked_at);

        let latest = &bookings[0];
        assert_eq!(latest.username, "asha");
        assert_eq!(latest.start_city, newer.start_city);
        assert_eq!(latest.destination_name, newer.destination_name);
        assert_eq!(latest.num_people, newer.num_people);
        assert_eq!(latest.stay_days, newer.stay_days);
        assert_eq!(latest.transport_mode, newer.transport_mode);
        assert_eq!(latest.total_budget, newer.total_cost);
    }

    #[tokio::test]
    async fn unknown_user_has_no_bookings() {
        let db = adapter().await;
        assert!(db.list_bookings_for_user("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repricing_a_destination_leaves_bookings_alone() {
        let db = adapter().await;
        seed_if_empty(&db).await.unwrap();
        let estimate = matheran_estimate(&db, 2).await;
        db.save_booking("asha", &estimate).await.unwrap();

        let matheran = db
            .list_destinations()
            .await
            .unwrap()
            .into_iter()
            .find(|d| d.name == "Matheran")
            .unwrap();
        db.update_destination(matheran.id, &draft("Matheran", 1200))
            .await
            .unwrap();
        db.remove_destination(matheran.id).await.unwrap();

        let bookings = db.list_bookings_for_user("asha").await.unwrap();
        assert_eq!(bookings[0].total_budget, 14460.0);
        assert_eq!(bookings[0].destination_name, "Matheran");
    }

    #[test]
    fn parses_both_timestamp_layouts() {
        let plain = parse_timestamp("2025-03-14 09:26:53").unwrap();
        assert_eq!((plain.year(), plain.month(), plain.day()), (2025, 3, 14));
        assert_eq!((plain.hour(), plain.minute(), plain.second()), (9, 26, 53));

        let fractional = parse_timestamp("2025-03-14 09:26:53.589").unwrap();
        assert_eq!(fractional.timestamp_subsec_millis(), 589);

        assert!(matches!(parse_timestamp("yesterday"), Err(PortError::Storage(_))));
    }
}
