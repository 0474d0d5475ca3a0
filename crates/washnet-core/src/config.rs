use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the OpenWeatherMap API key
pub const WEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Environment variable holding the order API base URL
pub const ORDERS_API_URL_ENV: &str = "WASHNET_API_URL";

/// Value shipped in sample configs in place of a real key
pub const WEATHER_API_KEY_PLACEHOLDER: &str = "YOUR_API_KEY_HERE";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather widget settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Order backend settings
    #[serde(default)]
    pub orders: OrdersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key. Demo data is shown when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Provider location query, e.g. "Manila,PH"
    #[serde(default = "default_location_query")]
    pub location_query: String,

    /// Provider base URL
    #[serde(default = "default_provider_url")]
    pub provider_url: String,

    /// Number of 3-hour forecast points to request (max 40)
    #[serde(default = "default_forecast_count")]
    pub forecast_count: u8,
}

fn default_location_query() -> String {
    "Manila,PH".to_string()
}

fn default_provider_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_forecast_count() -> u8 {
    40
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            location_query: default_location_query(),
            provider_url: default_provider_url(),
            forecast_count: default_forecast_count(),
        }
    }
}

impl WeatherConfig {
    /// Check if a usable API key is configured (not blank, not the placeholder)
    pub fn is_configured(&self) -> bool {
        self.usable_api_key().is_some()
    }

    /// The API key, if it is one worth sending to the provider
    pub fn usable_api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty() && *k != WEATHER_API_KEY_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersConfig {
    /// Base URL of the laundry backend
    #[serde(default = "default_orders_api_url")]
    pub api_url: String,
}

fn default_orders_api_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            api_url: default_orders_api_url(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Apply environment-style overrides. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(WEATHER_API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.weather.api_key = Some(key.trim().to_string());
        }

        if let Some(url) = lookup(ORDERS_API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.orders.api_url = url.trim().to_string();
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.orders.api_url, "orders.api_url", &mut result);
        validate_url(
            &self.weather.provider_url,
            "weather.provider_url",
            &mut result,
        );

        if self.weather.location_query.trim().is_empty() {
            result.add_error("weather.location_query", "Location query cannot be empty");
        }

        if self.weather.forecast_count == 0 || self.weather.forecast_count > 40 {
            result.add_error(
                "weather.forecast_count",
                "Forecast count must be between 1 and 40",
            );
        }

        if !self.weather.is_configured() {
            result.add_warning(
                "weather.api_key",
                "Weather API key not configured - demo forecast will be shown",
            );
        }

        result
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("washnet");

        Ok(config_dir.join("config.toml"))
    }
}

fn validate_url(url_str: &str, field_name: &str, result: &mut ValidationResult) {
    match Url::parse(url_str) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                result.add_error(
                    field_name,
                    format!("URL must use http or https scheme, got: {}", url.scheme()),
                );
            }

            if url.host().is_none() {
                result.add_error(field_name, "URL must have a host");
            }
        }
        Err(e) => {
            result.add_error(field_name, format!("Invalid URL: {}", e));
        }
    }
}
