//! OpenWeatherMap client with demo fallback.
//!
//! A missing key, a bad key, an unreachable provider and a malformed payload
//! all end the same way: the caller gets demo data and a log line.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use washnet_core::WeatherConfig;

use crate::demo::generate_demo;
use crate::types::{
    CurrentConditions, ForecastSet, ForecastSource, Observation, WeatherCondition, WeatherData,
    WeatherError,
};

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const UNITS: &str = "metric";
const USER_AGENT: &str = "WASHNET/0.1.0";

#[derive(Debug, Deserialize)]
struct ApiCondition {
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp: f64,
    feels_like: Option<f64>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    pressure: Option<u32>,
    humidity: u8,
}

#[derive(Debug, Default, Deserialize)]
struct ApiWind {
    #[serde(default)]
    speed: f64,
    #[serde(default)]
    deg: f64,
}

#[derive(Debug, Deserialize)]
struct ApiSample {
    dt: Option<i64>,
    weather: Vec<ApiCondition>,
    main: ApiMain,
    #[serde(default)]
    wind: ApiWind,
    visibility: Option<u32>,
    pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ApiSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ApiCurrentResponse {
    #[serde(flatten)]
    sample: ApiSample,
    sys: Option<ApiSys>,
}

#[derive(Debug, Deserialize)]
struct ApiCity {
    name: String,
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastResponse {
    list: Vec<ApiSample>,
    city: Option<ApiCity>,
}

fn from_unix(seconds: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| WeatherError::Parse(format!("timestamp out of range: {}", seconds)))
}

impl ApiSample {
    fn into_observation(self, fallback_time: DateTime<Utc>) -> Result<Observation, WeatherError> {
        let timestamp = match self.dt {
            Some(dt) => from_unix(dt)?,
            None => fallback_time,
        };

        let condition = self
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Parse("sample has no weather entry".to_string()))?;

        let temperature = self.main.temp;

        Ok(Observation {
            timestamp,
            condition: WeatherCondition::from_label(&condition.main),
            description: condition.description,
            icon: condition.icon,
            temperature,
            feels_like: self.main.feels_like.unwrap_or(temperature),
            temp_min: self.main.temp_min.unwrap_or(temperature),
            temp_max: self.main.temp_max.unwrap_or(temperature),
            pressure: self.main.pressure.unwrap_or_default(),
            humidity: self.main.humidity,
            wind_speed: self.wind.speed,
            wind_deg: self.wind.deg.rem_euclid(360.0).round() as u16 % 360,
            visibility: self.visibility.unwrap_or_default(),
            precipitation_chance: self.pop,
        })
    }
}

/// Weather provider client
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
    location_query: String,
    forecast_count: u8,
}

impl WeatherProvider {
    /// Build a provider from settings. Blank or placeholder keys count as no key.
    pub fn from_config(config: &WeatherConfig) -> Result<Self, WeatherError> {
        // No request timeout: a hung provider delays the fallback until the
        // connection itself fails.
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: config.provider_url.trim_end_matches('/').to_string(),
            api_key: config.usable_api_key().map(str::to_string),
            location_query: config.location_query.clone(),
            forecast_count: config.forecast_count,
        })
    }

    /// Whether live requests will be attempted
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Forecast for the configured location
    pub async fn fetch(&self) -> WeatherData {
        self.fetch_forecast(&self.location_query).await
    }

    /// Forecast for `location_query`, falling back to demo data on any failure.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self, location_query: &str) -> WeatherData {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::info!("No OpenWeatherMap API key found. Using demo weather data.");
            return generate_demo();
        };

        match self.fetch_live(location_query, api_key).await {
            Ok(data) => data,
            Err(WeatherError::Unauthorized) => {
                tracing::warn!("Invalid API key. Using demo weather data.");
                generate_demo()
            }
            Err(e) => {
                tracing::warn!("Weather API unavailable ({}). Using demo weather data.", e);
                generate_demo()
            }
        }
    }

    /// Fetch current conditions and the forecast together; either failing fails both.
    pub async fn fetch_live(
        &self,
        location_query: &str,
        api_key: &str,
    ) -> Result<WeatherData, WeatherError> {
        let fetched_at = Utc::now();

        let (current, forecast) = tokio::try_join!(
            self.fetch_current(location_query, api_key, fetched_at),
            self.fetch_forecast_set(location_query, api_key, fetched_at),
        )?;

        tracing::info!(
            "Fetched live weather for {} ({} forecast points)",
            forecast.location(),
            forecast.len()
        );

        Ok(WeatherData {
            current,
            forecast,
            fetched_at,
        })
    }

    async fn fetch_current(
        &self,
        location_query: &str,
        api_key: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<CurrentConditions, WeatherError> {
        let query = [("q", location_query), ("appid", api_key), ("units", UNITS)];
        let response: ApiCurrentResponse = self.get_json(CURRENT_PATH, &query).await?;

        let (sunrise, sunset) = match response.sys {
            Some(sys) => (
                sys.sunrise.map(from_unix).transpose()?,
                sys.sunset.map(from_unix).transpose()?,
            ),
            None => (None, None),
        };

        Ok(CurrentConditions {
            observation: response.sample.into_observation(fetched_at)?,
            sunrise,
            sunset,
        })
    }

    async fn fetch_forecast_set(
        &self,
        location_query: &str,
        api_key: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<ForecastSet, WeatherError> {
        let count = self.forecast_count.to_string();
        let query = [
            ("q", location_query),
            ("appid", api_key),
            ("units", UNITS),
            ("cnt", count.as_str()),
        ];
        let response: ApiForecastResponse = self.get_json(FORECAST_PATH, &query).await?;

        if response.list.is_empty() {
            return Err(WeatherError::Parse("forecast list is empty".to_string()));
        }

        let observations = response
            .list
            .into_iter()
            .map(|sample| sample.into_observation(fetched_at))
            .collect::<Result<Vec<_>, _>>()?;

        let (location, country) = match response.city {
            Some(city) => (city.name, city.country),
            None => (location_query.to_string(), None),
        };

        Ok(ForecastSet::new(
            location,
            country,
            ForecastSource::Live,
            observations,
        ))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(WeatherError::Unauthorized);
        }
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))
    }
}
