use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use inquire::{Text, validator::Validation};
use tracing::{debug, info};
use weather_core::{
    Config, OpenWeatherProvider, WeatherError, WeatherProvider, WeatherQuery, WeatherResult,
};

/// Top-level CLI struct. Takes no arguments: running it prompts for a city.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Show the current weather for a city")]
pub struct Cli {}

/// How a run ended, as far as the exit status is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A report or a lookup error was printed.
    Reported,
    /// No API key; nothing was asked and nothing was sent.
    MissingCredential,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Reported => ExitCode::SUCCESS,
            Outcome::MissingCredential => ExitCode::from(1),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<Outcome> {
        let config = Config::from_env();
        execute(&config, prompt_city, &mut io::stdout()).await
    }
}

/// One prompt-and-print cycle.
///
/// The credential is checked before anything else, so a missing key never
/// reaches the prompt or the network.
pub async fn execute<F, W>(config: &Config, ask_city: F, out: &mut W) -> anyhow::Result<Outcome>
where
    F: FnOnce() -> anyhow::Result<String>,
    W: Write,
{
    let api_key = match config.require_api_key() {
        Ok(key) => key.to_owned(),
        Err(err) => {
            writeln!(out, "{err}")?;
            return Ok(Outcome::MissingCredential);
        }
    };

    let city = ask_city()?;
    let provider = OpenWeatherProvider::new(config)?;
    let query = WeatherQuery::new(city, api_key);

    let message = match provider.lookup(&query).await {
        Ok(result) => render_report(&query.city, &result),
        Err(err) => {
            debug!(error = %err, "lookup failed");
            render_error(&err)
        }
    };

    writeln!(out, "{message}")?;
    Ok(Outcome::Reported)
}

fn prompt_city() -> anyhow::Result<String> {
    let city = Text::new("City name:")
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("Please enter a city name.".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()?;

    let city = city.trim().to_string();
    info!(%city, "city selected");
    Ok(city)
}

fn render_report(city: &str, result: &WeatherResult) -> String {
    format!("Weather in {city}: {}, {:.1} °C", result.description, result.temperature)
}

fn render_error(err: &WeatherError) -> String {
    match err {
        WeatherError::CityNotFound
        | WeatherError::InvalidCredential
        | WeatherError::MissingCredential { .. } => err.to_string(),
        _ => format!("Failed to contact the weather service: {err}"),
    }
}
