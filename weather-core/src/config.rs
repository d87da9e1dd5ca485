use std::time::Duration;

use crate::error::WeatherError;

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// OpenWeather current-weather endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Locale used for the provider's description text.
pub const DEFAULT_LANG: &str = "sv";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime settings for a lookup.
///
/// Only the API key comes from the environment; everything else is fixed
/// unless overridden in code.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub lang: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            lang: DEFAULT_LANG.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Load settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// A blank key counts as unset.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Self { api_key, ..Self::default() }
    }

    /// Returns the API key, or `MissingCredential` if there is none.
    pub fn require_api_key(&self) -> Result<&str, WeatherError> {
        self.api_key.as_deref().ok_or(WeatherError::MissingCredential { var: API_KEY_VAR })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
