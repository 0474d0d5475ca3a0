//! Picks the forecast slot to recommend for drying laundry outdoors.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use crate::display::{long_date, round_half_up};
use crate::types::{ForecastSet, Observation, WeatherCondition};

/// Humidity must be strictly below this (percent)
pub const MAX_DRYING_HUMIDITY: u8 = 80;
/// Temperature must be strictly above this (°C)
pub const MIN_DRYING_TEMPERATURE: f64 = 25.0;
/// Date label used when nothing in the forecast qualifies
pub const FALLBACK_DATE_LABEL: &str = "Tomorrow";

/// Display-ready recommendation derived from one observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestDayResult {
    /// "Monday, October 19", or "Tomorrow" for the fallback
    pub date_label: String,
    /// Whole degrees Celsius
    pub temperature: i64,
    pub humidity: u8,
    pub condition: WeatherCondition,
    /// True when no slot passed and the first slot was used instead
    pub is_fallback: bool,
}

impl BestDayResult {
    /// "Monday, October 19 • 29°C • 72% humidity"
    pub fn summary(&self) -> String {
        format!(
            "{} • {}°C • {}% humidity",
            self.date_label, self.temperature, self.humidity
        )
    }

    pub fn reason(&self) -> String {
        format!(
            "Perfect weather for drying clothes - {} skies with optimal temperature",
            self.condition
        )
    }
}

/// Dry, warm and not too humid
pub fn is_good_drying_weather(observation: &Observation) -> bool {
    !observation.condition.is_rain_or_storm()
        && observation.humidity < MAX_DRYING_HUMIDITY
        && observation.temperature > MIN_DRYING_TEMPERATURE
}

/// Select the best laundry day, formatting dates in local time.
///
/// Returns `None` only for an empty forecast.
pub fn select_best_day(forecast: &ForecastSet) -> Option<BestDayResult> {
    select_best_day_in(forecast, &Local)
}

/// Select the first qualifying observation, formatting its date in `tz`.
///
/// This is first-match: a later, better slot never displaces an earlier one.
/// With no match the first observation is used and labelled "Tomorrow"
/// whatever its real date is.
// NOTE: the "Tomorrow" label can be wrong when the first slot is today.
// Kept as-is because the customer-facing copy depends on it.
pub fn select_best_day_in<Tz>(forecast: &ForecastSet, tz: &Tz) -> Option<BestDayResult>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let observations = forecast.observations();

    if let Some(best) = observations.iter().find(|o| is_good_drying_weather(o)) {
        return Some(project(best, long_date(best.timestamp, tz), false));
    }

    let first = observations.first()?;
    Some(project(first, FALLBACK_DATE_LABEL.to_string(), true))
}

fn project(observation: &Observation, date_label: String, is_fallback: bool) -> BestDayResult {
    BestDayResult {
        date_label,
        temperature: round_half_up(observation.temperature),
        humidity: observation.humidity,
        condition: observation.condition.clone(),
        is_fallback,
    }
}
