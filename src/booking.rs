// Booking service: selection preview and booking creation on top of the catalog and a booking store
//
// `preview` and `create_booking` run the same resolution, validation and
// pricing, so the total a user is quoted is the total that gets stored.

use crate::admin::DashboardSummary;
use crate::catalog::Catalog;
use crate::config::ServiceConfig;
use crate::models::{Booking, Guide, NewBooking, Package};
use crate::pricing::{quote, Quote};
use crate::store::{BookingStore, StoreError};
use crate::travel_dates::build_travel_dates;
use crate::trips::{partition_trips, today_utc, TripPartition};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Package not found: {0}")]
    PackageNotFound(String),

    #[error("Guide not found: {0}")]
    GuideNotFound(String),

    #[error("Invalid booking: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// What the user picked on the package page
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub user_id: String,
    pub package_id: String,
    pub guide_id: Option<String>,
    pub start_date: NaiveDate,
}

// Everything shown on the confirmation page before the booking is committed
#[derive(Debug, Clone, PartialEq)]
pub struct BookingPreview {
    pub package: Package,
    pub guide: Option<Guide>,
    pub travel_dates: Vec<NaiveDate>,
    pub quote: Quote,
}

impl BookingPreview {
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.travel_dates.first().copied()
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.travel_dates.last().copied()
    }
}

pub struct BookingService {
    catalog: Arc<Catalog>,
    store: Arc<dyn BookingStore>,
    config: ServiceConfig,
}

impl BookingService {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn BookingStore>, config: ServiceConfig) -> Self {
        Self {
            catalog,
            store,
            config,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // Resolve, validate and price a request without touching the store
    pub fn preview(
        &self,
        request: &BookingRequest,
        today: NaiveDate,
    ) -> Result<BookingPreview, BookingError> {
        if request.user_id.trim().is_empty() {
            return Err(BookingError::InvalidInput("user id is empty".to_string()));
        }

        let package = self
            .catalog
            .package_by_id(&request.package_id)
            .ok_or_else(|| BookingError::PackageNotFound(request.package_id.clone()))?;

        let guide = match request.guide_id.as_deref() {
            Some(guide_id) => Some(
                self.catalog
                    .guide_by_id(guide_id)
                    .ok_or_else(|| BookingError::GuideNotFound(guide_id.to_string()))?,
            ),
            None => None,
        };

        self.validate(request, package, guide, today)?;

        Ok(BookingPreview {
            package: package.clone(),
            guide: guide.cloned(),
            travel_dates: build_travel_dates(request.start_date, package.duration_days),
            quote: quote(package, guide),
        })
    }

    fn validate(
        &self,
        request: &BookingRequest,
        package: &Package,
        guide: Option<&Guide>,
        today: NaiveDate,
    ) -> Result<(), BookingError> {
        let policy = &self.config.validation;

        if package.duration_days == 0 {
            return Err(BookingError::InvalidInput(format!(
                "package {} has no travel days",
                package.id
            )));
        }

        if let Some(guide) = guide {
            if policy.enforce_guide_destination && guide.destination_id != package.destination_id {
                return Err(BookingError::InvalidInput(format!(
                    "guide {} works at {}, package {} is at {}",
                    guide.id, guide.destination_id, package.id, package.destination_id
                )));
            }
        }

        if policy.reject_past_start_date && request.start_date < today {
            return Err(BookingError::InvalidInput(format!(
                "start date {} is before {}",
                request.start_date, today
            )));
        }

        Ok(())
    }

    // Single, non-retried store create. On error nothing has been booked.
    pub async fn create_booking(&self, request: BookingRequest) -> Result<Booking, BookingError> {
        let preview = self.preview(&request, today_utc()).map_err(|e| {
            warn!(user_id = %request.user_id, package_id = %request.package_id, error = %e, "booking rejected");
            e
        })?;

        let new_booking = NewBooking {
            user_id: request.user_id,
            package_id: preview.package.id,
            guide_id: preview.guide.map(|g| g.id),
            travel_dates: preview.travel_dates,
            status: self.config.initial_status,
            total_cost: preview.quote.total,
        };

        let booking = self
            .with_timeout(self.store.create_booking(new_booking))
            .await?;

        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            package_id = %booking.package_id,
            total_cost = booking.total_cost,
            "booking created"
        );
        Ok(booking)
    }

    pub async fn bookings_for_user(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        Ok(self
            .with_timeout(self.store.bookings_by_user_id(user_id))
            .await?)
    }

    pub async fn booking_for_user(
        &self,
        booking_id: &str,
        user_id: &str,
    ) -> Result<Option<Booking>, BookingError> {
        Ok(self
            .with_timeout(self.store.booking_by_id(booking_id, user_id))
            .await?)
    }

    // A user's bookings split into upcoming and past as of today
    pub async fn trips_for_user(&self, user_id: &str) -> Result<TripPartition, BookingError> {
        let bookings = self.bookings_for_user(user_id).await?;
        Ok(partition_trips(bookings, today_utc()))
    }

    pub async fn all_bookings(&self) -> Result<Vec<Booking>, BookingError> {
        Ok(self.with_timeout(self.store.all_bookings()).await?)
    }

    pub async fn dashboard(&self) -> Result<DashboardSummary, BookingError> {
        let bookings = self.all_bookings().await?;
        Ok(DashboardSummary::build(&self.catalog, &bookings))
    }

    async fn with_timeout<T, F>(&self, call: F) -> Result<T, StoreError>
    where
        F: std::future::Future<Output = Result<T, StoreError>>,
    {
        let timeout_ms = self.config.store_timeout_ms;
        match tokio::time::timeout(Duration::from_millis(timeout_ms), call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_ms, "booking store call timed out");
                Err(StoreError::Timeout(timeout_ms))
            }
        }
    }
}
