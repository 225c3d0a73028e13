// Travel booking core: catalog lookups, pricing, travel dates, trip classification and booking storage

pub mod admin;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod models;
pub mod pricing;
pub mod rest_store;
pub mod store;
pub mod travel_dates;
pub mod trips;

// Re-export key types for convenience
pub use admin::{filter_by_status, DashboardSummary, DestinationBookings, StatusFilter};
pub use booking::{BookingError, BookingPreview, BookingRequest, BookingService};
pub use catalog::{paginate, Catalog, CatalogError, Page, ALL_CATEGORIES};
pub use config::{ConfigError, RestStoreConfig, ServiceConfig, ValidationPolicy};
pub use models::{Booking, BookingStatus, Category, Destination, Guide, NewBooking, Package, Place};
pub use pricing::{calculate_cost, quote, Quote};
pub use rest_store::RestBookingStore;
pub use store::{BookingStore, InMemoryBookingStore, StoreError};
pub use travel_dates::{build_travel_dates, end_date};
pub use trips::{classify, partition_trips, today_utc, TripPartition, TripTiming};
