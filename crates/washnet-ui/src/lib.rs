//! UI state for the customer page: the weather card and the order search form.
//!
//! Models are plain state machines; services run network work on a tokio
//! runtime and report back over `std::sync::mpsc` channels.

pub mod models;
pub mod services;

pub use models::{OrderSearchModel, WeatherModel};
