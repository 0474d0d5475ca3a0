//! Weather card data for WASHNET
//!
//! Fetches a forecast from OpenWeatherMap (or generates a demo one), picks
//! the best day for drying laundry, and shapes the forecast into hourly and
//! daily views.

pub mod demo;
pub mod display;
pub mod provider;
pub mod selector;
pub mod types;
pub mod views;

pub use demo::generate_demo;
pub use provider::WeatherProvider;
pub use selector::{select_best_day, BestDayResult};
pub use types::*;
pub use views::{daily_view, hourly_view};
