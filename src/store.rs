// Booking repository: the persistence seam between the booking service and whatever stores bookings
//
// Concurrent creates are not atomic relative to reads. A query running
// alongside a create may or may not observe it, but every create gets its
// own identity and creation times never go backwards.

use crate::models::{Booking, NewBooking};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Store request timed out after {0}ms")]
    Timeout(u64),

    #[error("Malformed store record: {0}")]
    Decode(String),
}

#[async_trait]
pub trait BookingStore: Send + Sync + 'static {
    // Persist a booking, assigning its identity and creation time.
    // Either the whole record is stored and returned or nothing is stored.
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, StoreError>;

    // Bookings owned by `user_id`, most recent first
    async fn bookings_by_user_id(&self, user_id: &str) -> Result<Vec<Booking>, StoreError>;

    // A single booking, visible only to the user who owns it
    async fn booking_by_id(
        &self,
        booking_id: &str,
        user_id: &str,
    ) -> Result<Option<Booking>, StoreError>;

    // Every booking, most recent first
    async fn all_bookings(&self) -> Result<Vec<Booking>, StoreError>;
}

pub fn new_booking_id() -> String {
    format!("booking-{:016x}", rand::random::<u64>())
}

#[derive(Default)]
struct Ledger {
    // Booking ids in creation order
    ids: Vec<String>,
    last_created_at: Option<DateTime<Utc>>,
}

// Process-local store, used in tests and when no hosted backend is configured
#[derive(Default)]
pub struct InMemoryBookingStore {
    // Point lookups by id read this map without taking the ledger lock
    bookings: DashMap<String, Booking>,
    ledger: Mutex<Ledger>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    fn collect_newest_first<F>(&self, keep: F) -> Vec<Booking>
    where
        F: Fn(&Booking) -> bool,
    {
        let ledger = self.ledger.lock();
        ledger
            .ids
            .iter()
            .rev()
            .filter_map(|id| self.bookings.get(id).map(|entry| entry.value().clone()))
            .filter(|booking| keep(booking))
            .collect()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking, StoreError> {
        // The ledger lock serialises creates, so the vacancy check below cannot race
        let mut ledger = self.ledger.lock();

        let now = Utc::now();
        let created_at = ledger.last_created_at.map_or(now, |last| last.max(now));

        let mut id = new_booking_id();
        while self.bookings.contains_key(&id) {
            id = new_booking_id();
        }

        let booking = Booking::from_new(id.clone(), created_at, booking);
        self.bookings.insert(id.clone(), booking.clone());
        ledger.ids.push(id);
        ledger.last_created_at = Some(created_at);

        debug!(booking_id = %booking.id, user_id = %booking.user_id, "booking stored in memory");
        Ok(booking)
    }

    async fn bookings_by_user_id(&self, user_id: &str) -> Result<Vec<Booking>, StoreError> {
        Ok(self.collect_newest_first(|b| b.user_id == user_id))
    }

    async fn booking_by_id(
        &self,
        booking_id: &str,
        user_id: &str,
    ) -> Result<Option<Booking>, StoreError> {
        Ok(self
            .bookings
            .get(booking_id)
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.value().clone()))
    }

    async fn all_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.collect_newest_first(|_| true))
    }
}
