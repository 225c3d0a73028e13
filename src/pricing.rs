// Booking cost calculation, shared by the preview and the create path

use crate::models::{Guide, Package};
use serde::Serialize;

// Package base cost plus the guide's daily rate for every day of the trip
pub fn calculate_cost(package: &Package, guide: Option<&Guide>) -> u64 {
    package.cost.saturating_add(guide_cost(package, guide))
}

fn guide_cost(package: &Package, guide: Option<&Guide>) -> u64 {
    guide.map_or(0, |g| {
        g.price_per_day
            .saturating_mul(u64::from(package.duration_days))
    })
}

// Cost breakdown shown before the booking is confirmed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub base_cost: u64,
    pub guide_cost: u64,
    pub guide_days: u32,
    pub total: u64,
}

pub fn quote(package: &Package, guide: Option<&Guide>) -> Quote {
    Quote {
        base_cost: package.cost,
        guide_cost: guide_cost(package, guide),
        guide_days: guide.map_or(0, |_| package.duration_days),
        total: calculate_cost(package, guide),
    }
}
