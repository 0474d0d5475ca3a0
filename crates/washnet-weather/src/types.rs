use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Condition groups reported by the provider (OpenWeatherMap `weather[0].main`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    /// Any group outside the known set, kept verbatim (e.g. "Haze")
    Other(String),
}

impl WeatherCondition {
    /// Parse a provider condition group. Matching is case-insensitive.
    pub fn from_label(label: &str) -> Self {
        const KNOWN: [WeatherCondition; 8] = [
            WeatherCondition::Clear,
            WeatherCondition::Clouds,
            WeatherCondition::Rain,
            WeatherCondition::Drizzle,
            WeatherCondition::Thunderstorm,
            WeatherCondition::Snow,
            WeatherCondition::Mist,
            WeatherCondition::Fog,
        ];

        let label = label.trim();
        KNOWN
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .unwrap_or_else(|| Self::Other(label.to_string()))
    }

    /// The provider's spelling of this condition
    pub fn label(&self) -> &str {
        match self {
            Self::Clear => "Clear",
            Self::Clouds => "Clouds",
            Self::Rain => "Rain",
            Self::Drizzle => "Drizzle",
            Self::Thunderstorm => "Thunderstorm",
            Self::Snow => "Snow",
            Self::Mist => "Mist",
            Self::Fog => "Fog",
            Self::Other(label) => label,
        }
    }

    /// True if the label mentions rain or storm, in any case.
    ///
    /// Substring match on the label, so Drizzle and Snow are *not* wet.
    pub fn is_rain_or_storm(&self) -> bool {
        let label = self.label().to_lowercase();
        label.contains("rain") || label.contains("storm")
    }
}

impl From<String> for WeatherCondition {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<WeatherCondition> for String {
    fn from(condition: WeatherCondition) -> Self {
        condition.label().to_string()
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One weather sample at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    pub condition: WeatherCondition,
    pub description: String,
    pub icon: String,
    /// Degrees Celsius
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// hPa
    pub pressure: u32,
    /// Percent, 0-100
    pub humidity: u8,
    /// m/s
    pub wind_speed: f64,
    /// Degrees, 0-360
    pub wind_deg: u16,
    /// Meters
    pub visibility: u32,
    /// Probability of precipitation, 0-1
    pub precipitation_chance: Option<f64>,
}

/// Present-moment conditions, shown above the forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub observation: Observation,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

/// Where a forecast came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSource {
    Live,
    Demo,
}

/// Chronologically ordered observations for one location.
///
/// Built once and only read afterwards; a refresh produces a new set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSet {
    location: String,
    country: Option<String>,
    source: ForecastSource,
    observations: Vec<Observation>,
}

impl ForecastSet {
    pub fn new(
        location: impl Into<String>,
        country: Option<String>,
        source: ForecastSource,
        observations: Vec<Observation>,
    ) -> Self {
        Self {
            location: location.into(),
            country,
            source,
            observations,
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn source(&self) -> ForecastSource {
        self.source
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn first(&self) -> Option<&Observation> {
        self.observations.first()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Complete weather data bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub current: CurrentConditions,
    pub forecast: ForecastSet,
    pub fetched_at: DateTime<Utc>,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid API key")]
    Unauthorized,
    #[error("Weather API returned status {0}")]
    Status(u16),
    #[error("Parse error: {0}")]
    Parse(String),
}
