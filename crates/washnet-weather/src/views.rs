//! Hourly and daily projections of a forecast for the weather card.

use chrono::{Local, NaiveDate, TimeZone};

use crate::types::{ForecastSet, Observation};

/// Slots in the hourly view (about 12 hours at 3-hour spacing)
pub const HOURLY_VIEW_LEN: usize = 4;
/// Days in the daily view
pub const DAILY_VIEW_MAX_DAYS: usize = 5;

/// The next few slots, in forecast order
pub fn hourly_view(forecast: &ForecastSet) -> &[Observation] {
    let observations = forecast.observations();
    &observations[..observations.len().min(HOURLY_VIEW_LEN)]
}

/// First slot of each local calendar day, at most five days
pub fn daily_view(forecast: &ForecastSet) -> Vec<&Observation> {
    daily_view_in(forecast, &Local)
}

/// First slot of each calendar day in `tz`, in first-seen order.
///
/// Picks the earliest sample of the day as-is, no averaging.
pub fn daily_view_in<'a, Tz: TimeZone>(forecast: &'a ForecastSet, tz: &Tz) -> Vec<&'a Observation> {
    let mut seen: Vec<NaiveDate> = Vec::with_capacity(DAILY_VIEW_MAX_DAYS);
    let mut days = Vec::with_capacity(DAILY_VIEW_MAX_DAYS);

    for observation in forecast.observations() {
        if days.len() == DAILY_VIEW_MAX_DAYS {
            break;
        }
        let day = observation.timestamp.with_timezone(tz).date_naive();
        if !seen.contains(&day) {
            seen.push(day);
            days.push(observation);
        }
    }

    days
}
