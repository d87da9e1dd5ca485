use crate::{WeatherError, WeatherQuery, WeatherResult};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// A source of current weather conditions.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Performs one request for `query.city` and normalizes the answer.
    async fn lookup(&self, query: &WeatherQuery) -> Result<WeatherResult, WeatherError>;
}
