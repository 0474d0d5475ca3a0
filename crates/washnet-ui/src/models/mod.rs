pub mod order_model;
pub mod weather_model;

pub use order_model::{OrderCard, OrderSearchModel, SearchNotice, NO_ORDERS_MESSAGE};
pub use weather_model::{CurrentSummary, ForecastMode, ForecastTile, WeatherModel};
