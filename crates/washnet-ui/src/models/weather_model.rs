//! State behind the weather card on the customer page.

use std::fmt::Display;
use std::sync::mpsc::Receiver;

use chrono::{Local, TimeZone};
use washnet_weather::display::{
    capitalize, clock_time, condition_glyph, precipitation_percent, round_half_up, short_date,
    visibility_km, wind_direction, wind_kmh,
};
use washnet_weather::selector::select_best_day_in;
use washnet_weather::views::{daily_view_in, hourly_view};
use washnet_weather::{BestDayResult, ForecastSource, Observation, WeatherData};

use crate::services::WeatherServiceMessage;

/// Which projection the forecast strip shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForecastMode {
    Hourly,
    #[default]
    Daily,
}

impl ForecastMode {
    /// Heading above the forecast strip
    pub fn title(&self) -> &'static str {
        match self {
            ForecastMode::Hourly => "📅 Hourly Forecast",
            ForecastMode::Daily => "📆 5-Day Forecast",
        }
    }
}

/// Headline block of the card
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentSummary {
    pub location: String,
    pub glyph: &'static str,
    pub temperature: i64,
    pub feels_like: i64,
    pub description: String,
    pub high: i64,
    pub low: i64,
    pub humidity: u8,
    pub wind: String,
    pub visibility_km: String,
    pub pressure: u32,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub is_demo: bool,
}

/// One tile in the forecast strip
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastTile {
    /// "6:00 AM" in hourly mode, "Mon, Oct 19" in daily mode
    pub label: String,
    pub glyph: &'static str,
    pub temperature: i64,
    pub description: String,
    pub precipitation: Option<i64>,
}

#[derive(Debug, Default)]
pub struct WeatherModel {
    loading: bool,
    mode: ForecastMode,
    data: Option<WeatherData>,
    best_day: Option<BestDayResult>,
}

impl WeatherModel {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&WeatherData> {
        self.data.as_ref()
    }

    pub fn best_day(&self) -> Option<&BestDayResult> {
        self.best_day.as_ref()
    }

    pub fn mode(&self) -> ForecastMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            ForecastMode::Hourly => ForecastMode::Daily,
            ForecastMode::Daily => ForecastMode::Hourly,
        };
    }

    /// Mark a fetch as in flight
    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Replace the shown weather and recompute the best day in local time
    pub fn set_data(&mut self, data: WeatherData) {
        self.set_data_in(data, &Local);
    }

    pub fn set_data_in<Tz>(&mut self, data: WeatherData, tz: &Tz)
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.best_day = select_best_day_in(&data.forecast, tz);
        if let Some(best) = &self.best_day {
            tracing::debug!("Best laundry day: {}", best.summary());
        }
        self.data = Some(data);
        self.loading = false;
    }

    /// Drain pending service messages. Returns true if anything changed.
    pub fn poll(&mut self, rx: &Receiver<WeatherServiceMessage>) -> bool {
        let mut changed = false;
        while let Ok(message) = rx.try_recv() {
            match message {
                WeatherServiceMessage::FetchDone(data) => {
                    self.set_data(data);
                    changed = true;
                }
            }
        }
        changed
    }

    pub fn current_summary(&self) -> Option<CurrentSummary> {
        self.current_summary_in(&Local)
    }

    pub fn current_summary_in<Tz>(&self, tz: &Tz) -> Option<CurrentSummary>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let data = self.data.as_ref()?;
        let current = &data.current;
        let now = &current.observation;

        let location = match data.forecast.country() {
            Some(country) => format!("{}, {}", data.forecast.location(), country),
            None => data.forecast.location().to_string(),
        };

        Some(CurrentSummary {
            location,
            glyph: condition_glyph(&now.condition),
            temperature: round_half_up(now.temperature),
            feels_like: round_half_up(now.feels_like),
            description: capitalize(&now.description),
            high: round_half_up(now.temp_max),
            low: round_half_up(now.temp_min),
            humidity: now.humidity,
            wind: format!("{} km/h {}", wind_kmh(now.wind_speed), wind_direction(now.wind_deg)),
            visibility_km: visibility_km(now.visibility),
            pressure: now.pressure,
            sunrise: current.sunrise.map(|t| clock_time(t, tz)),
            sunset: current.sunset.map(|t| clock_time(t, tz)),
            is_demo: data.forecast.source() == ForecastSource::Demo,
        })
    }

    /// Tiles for the current mode
    pub fn forecast_tiles(&self) -> Vec<ForecastTile> {
        self.forecast_tiles_in(&Local)
    }

    pub fn forecast_tiles_in<Tz>(&self, tz: &Tz) -> Vec<ForecastTile>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let Some(data) = &self.data else {
            return Vec::new();
        };

        match self.mode {
            ForecastMode::Hourly => hourly_view(&data.forecast)
                .iter()
                .map(|o| tile(o, clock_time(o.timestamp, tz)))
                .collect(),
            ForecastMode::Daily => daily_view_in(&data.forecast, tz)
                .into_iter()
                .map(|o| tile(o, short_date(o.timestamp, tz)))
                .collect(),
        }
    }
}

fn tile(observation: &Observation, label: String) -> ForecastTile {
    ForecastTile {
        label,
        glyph: condition_glyph(&observation.condition),
        temperature: round_half_up(observation.temperature),
        description: capitalize(&observation.description),
        precipitation: precipitation_percent(observation.precipitation_chance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::mpsc;
    use washnet_weather::demo::{generate_demo_at, DEMO_RAIN_INDEX};
    use washnet_weather::WeatherCondition;

    fn plus8() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn demo_data() -> WeatherData {
        let now = plus8().with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        generate_demo_at(now, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_new_model_is_loading_and_daily() {
        let model = WeatherModel::new();
        assert!(model.loading());
        assert!(!model.has_data());
        assert_eq!(model.mode(), ForecastMode::Daily);
        assert_eq!(model.mode().title(), "📆 5-Day Forecast");
        assert!(model.forecast_tiles().is_empty());
        assert!(model.current_summary().is_none());
    }

    #[test]
    fn test_set_data_computes_best_day() {
        let mut model = WeatherModel::new();
        model.set_data_in(demo_data(), &plus8());

        assert!(!model.loading());
        let best = model.best_day().unwrap();
        // First demo slot is 09:00 local: clear, warm, under 80% humidity
        assert_eq!(best.date_label, "Monday, October 19");
        assert_eq!(best.condition, WeatherCondition::Clear);
        assert!(!best.is_fallback);
    }

    #[test]
    fn test_hourly_and_daily_tiles() {
        let mut model = WeatherModel::new();
        model.set_data_in(demo_data(), &plus8());

        let daily = model.forecast_tiles_in(&plus8());
        assert_eq!(daily.len(), 5);
        assert_eq!(daily[0].label, "Mon, Oct 19");
        assert_eq!(daily[1].label, "Tue, Oct 20");

        model.toggle_mode();
        assert_eq!(model.mode(), ForecastMode::Hourly);
        let hourly = model.forecast_tiles_in(&plus8());
        assert_eq!(hourly.len(), 4);
        assert_eq!(hourly[0].label, "9:00 AM");
        assert_eq!(hourly[1].label, "12:00 PM");
        assert_eq!(model.mode().title(), "📅 Hourly Forecast");
    }

    #[test]
    fn test_rain_slot_shows_precipitation() {
        let data = demo_data();
        let rain = &data.forecast.observations()[DEMO_RAIN_INDEX];
        let t = tile(rain, String::new());
        assert_eq!(t.precipitation, Some(70));
        assert_eq!(t.glyph, "🌧️");
    }

    #[test]
    fn test_current_summary() {
        let mut model = WeatherModel::new();
        model.set_data_in(demo_data(), &plus8());

        let summary = model.current_summary_in(&plus8()).unwrap();
        assert_eq!(summary.location, "Manila, PH");
        assert_eq!(summary.temperature, 29);
        assert_eq!(summary.feels_like, 32);
        assert_eq!(summary.description, "Clear sky");
        assert_eq!(summary.humidity, 75);
        assert_eq!(summary.wind, "13 km/h S");
        assert_eq!(summary.visibility_km, "10.0");
        assert_eq!(summary.sunrise.as_deref(), Some("6:00 AM"));
        assert_eq!(summary.sunset.as_deref(), Some("6:30 PM"));
        assert!(summary.is_demo);
    }

    #[test]
    fn test_poll_applies_fetch_result() {
        let (tx, rx) = mpsc::channel();
        let mut model = WeatherModel::new();
        assert!(!model.poll(&rx));

        tx.send(WeatherServiceMessage::FetchDone(demo_data())).unwrap();
        assert!(model.poll(&rx));
        assert!(model.has_data());
        assert!(model.best_day().is_some());
    }

    #[test]
    fn test_utc_and_local_labels_differ() {
        let mut model = WeatherModel::new();
        model.set_data_in(demo_data(), &Utc);
        // 09:00 +08:00 is 01:00 UTC, so the hourly labels shift
        model.toggle_mode();
        assert_eq!(model.forecast_tiles_in(&Utc)[0].label, "1:00 AM");
    }
}
