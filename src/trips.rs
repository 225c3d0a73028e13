// Upcoming/past split of a user's bookings, evaluated against the current day

use crate::models::Booking;
use chrono::{NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TripTiming {
    Upcoming,
    Past,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripPartition {
    pub upcoming: Vec<Booking>,
    pub past: Vec<Booking>,
}

// Calendar day used as "now" for classification
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

// Upcoming while the last travel day is today or later.
// A booking without travel dates has nothing left to travel and counts as past.
pub fn classify(booking: &Booking, today: NaiveDate) -> TripTiming {
    match booking.end_date() {
        Some(last_day) if last_day >= today => TripTiming::Upcoming,
        _ => TripTiming::Past,
    }
}

// Each half keeps the input order
pub fn partition_trips<I>(bookings: I, today: NaiveDate) -> TripPartition
where
    I: IntoIterator<Item = Booking>,
{
    let (upcoming, past) = bookings
        .into_iter()
        .partition(|b| classify(b, today) == TripTiming::Upcoming);

    TripPartition { upcoming, past }
}
