use serde::{Deserialize, Serialize};

/// One lookup: which city, and the key to authorize it with.
#[derive(Debug, Clone)]
pub struct WeatherQuery {
    pub city: String,
    pub credential: String,
}

impl WeatherQuery {
    pub fn new(city: impl Into<String>, credential: impl Into<String>) -> Self {
        Self { city: city.into(), credential: credential.into() }
    }
}

/// Current conditions as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Short description with its first letter capitalized, e.g. "Clear sky".
    pub description: String,
}
