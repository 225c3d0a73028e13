// Expansion of a (start date, duration) pair into the contiguous day sequence stored on a booking

use chrono::{Days, NaiveDate};

// Every calendar day from `start` through `start + (duration_days - 1)`, inclusive.
// A zero duration gives an empty sequence.
pub fn build_travel_dates(start: NaiveDate, duration_days: u32) -> Vec<NaiveDate> {
    start.iter_days().take(duration_days as usize).collect()
}

// Last day of a trip. A zero duration is treated as a single day.
pub fn end_date(start: NaiveDate, duration_days: u32) -> NaiveDate {
    let offset = u64::from(duration_days.saturating_sub(1));
    start.checked_add_days(Days::new(offset)).unwrap_or(NaiveDate::MAX)
}

// True when each entry is exactly one day after the previous one
pub fn is_contiguous(dates: &[NaiveDate]) -> bool {
    dates
        .windows(2)
        .all(|pair| pair[0].succ_opt() == Some(pair[1]))
}
