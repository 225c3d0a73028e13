// Aggregates for the admin dashboard

use crate::catalog::Catalog;
use crate::models::{Booking, BookingStatus, UnknownStatus};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

pub const RECENT_BOOKINGS_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestinationBookings {
    pub destination_id: String,
    pub name: String,
    pub bookings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_destinations: usize,
    pub total_packages: usize,
    pub total_guides: usize,
    pub total_bookings: usize,
    pub total_revenue: u64,
    pub bookings_by_destination: Vec<DestinationBookings>,
    pub recent_bookings: Vec<Booking>,
}

impl DashboardSummary {
    pub fn build(catalog: &Catalog, bookings: &[Booking]) -> Self {
        // Bookings whose package is no longer in the catalog are counted in the
        // totals but not attributed to any destination
        let mut per_destination: HashMap<&str, usize> = HashMap::new();
        for booking in bookings {
            if let Some(package) = catalog.package_by_id(&booking.package_id) {
                *per_destination
                    .entry(package.destination_id.as_str())
                    .or_insert(0) += 1;
            }
        }

        let bookings_by_destination = catalog
            .destinations()
            .iter()
            .map(|d| DestinationBookings {
                destination_id: d.id.clone(),
                name: d.name.clone(),
                bookings: per_destination.get(d.id.as_str()).copied().unwrap_or(0),
            })
            .collect();

        Self {
            total_destinations: catalog.destinations().len(),
            total_packages: catalog.packages().len(),
            total_guides: catalog.guides().len(),
            total_bookings: bookings.len(),
            total_revenue: bookings
                .iter()
                .filter(|b| b.status != BookingStatus::Canceled)
                .fold(0u64, |sum, b| sum.saturating_add(b.total_cost)),
            bookings_by_destination,
            recent_bookings: recent_bookings(bookings, RECENT_BOOKINGS_LIMIT),
        }
    }
}

// Newest first by creation time
pub fn recent_bookings(bookings: &[Booking], limit: usize) -> Vec<Booking> {
    let mut sorted: Vec<&Booking> = bookings.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.into_iter().take(limit).cloned().collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Only(BookingStatus),
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse::<BookingStatus>().map(StatusFilter::Only)
    }
}

impl StatusFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => booking.status == *status,
        }
    }
}

pub fn filter_by_status(bookings: &[Booking], filter: StatusFilter) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|b| filter.matches(b))
        .cloned()
        .collect()
}
