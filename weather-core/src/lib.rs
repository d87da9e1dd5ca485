//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The error taxonomy of a weather lookup
//! - Abstraction over weather providers, with an OpenWeatherMap implementation
//! - Shared domain models (queries, results)
//! - Credential resolution from the environment
//!
//! The lookup never reads the environment itself; the caller resolves the
//! API key through [`Config`] and passes it in a [`WeatherQuery`].

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod text;

pub use config::Config;
pub use error::WeatherError;
pub use model::{WeatherQuery, WeatherResult};
pub use provider::{OpenWeatherProvider, WeatherProvider};
