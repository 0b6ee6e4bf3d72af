pub mod rest;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Booking, BookingPatch, BookingStatus, NewBooking};

/// Access to the bookings table in the external data store.
///
/// The production implementation talks to a remote REST table resource; the
/// integration tests substitute an in-memory store behind the same trait.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Existence check: is there any confirmed/blocked booking whose
    /// half-open stay interval overlaps `[checkin, checkout)`? Fetches at
    /// most one matching row.
    async fn find_reserved_overlap(
        &self,
        checkin: NaiveDate,
        checkout: NaiveDate,
    ) -> anyhow::Result<Option<Booking>>;

    async fn insert_booking(&self, new: &NewBooking) -> anyhow::Result<Booking>;

    async fn get_booking(&self, id: i64) -> anyhow::Result<Option<Booking>>;

    async fn find_by_order_id(&self, order_id: &str) -> anyhow::Result<Option<Booking>>;

    async fn update_booking(&self, id: i64, patch: &BookingPatch) -> anyhow::Result<()>;

    /// All bookings, newest first, optionally filtered by exact status.
    async fn list_bookings(&self, status: Option<BookingStatus>) -> anyhow::Result<Vec<Booking>>;
}
