pub mod order_service;
pub mod weather_service;

pub use order_service::{request_search as request_order_search, OrderServiceMessage};
pub use weather_service::{request_fetch as request_weather_fetch, WeatherServiceMessage};
