//! Text helpers for rendering observations in the weather card.

use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

use crate::types::WeatherCondition;

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Round half up, so 26.5 -> 27 and -2.5 -> -2
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Glyph shown next to a condition
pub fn condition_glyph(condition: &WeatherCondition) -> &'static str {
    match condition {
        WeatherCondition::Clear => "☀️",
        WeatherCondition::Clouds => "☁️",
        WeatherCondition::Rain => "🌧️",
        WeatherCondition::Drizzle => "🌦️",
        WeatherCondition::Thunderstorm => "⛈️",
        WeatherCondition::Snow => "❄️",
        WeatherCondition::Mist | WeatherCondition::Fog => "🌫️",
        WeatherCondition::Other(_) => "🌤️",
    }
}

/// 8-point compass direction for a wind bearing
pub fn wind_direction(degrees: u16) -> &'static str {
    let index = round_half_up(f64::from(degrees) / 45.0).rem_euclid(8) as usize;
    COMPASS_POINTS[index]
}

/// Wind speed in whole km/h
pub fn wind_kmh(speed_ms: f64) -> i64 {
    round_half_up(speed_ms * 3.6)
}

/// Visibility in km with one decimal. Zero means the provider omitted it.
pub fn visibility_km(meters: u32) -> String {
    if meters == 0 {
        return "10".to_string();
    }
    format!("{:.1}", f64::from(meters) / 1000.0)
}

/// Chance of precipitation in percent, only when there is any
pub fn precipitation_percent(chance: Option<f64>) -> Option<i64> {
    chance
        .filter(|p| *p > 0.0)
        .map(|p| round_half_up(p * 100.0))
}

/// Clock time such as "6:00 AM"
pub fn clock_time<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%-I:%M %p").to_string()
}

/// Short day label such as "Mon, Oct 19"
pub fn short_date<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%a, %b %-d").to_string()
}

/// Long day label such as "Monday, October 19"
pub fn long_date<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format("%A, %B %-d").to_string()
}

/// Uppercase the first character ("clear sky" -> "Clear sky")
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
