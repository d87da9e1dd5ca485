use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::WeatherError,
    model::{WeatherQuery, WeatherResult},
    text::{capitalize, truncate_body},
};

use super::WeatherProvider;

/// Current weather from the OpenWeatherMap API, in metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    endpoint: String,
    lang: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// Builds a provider whose client enforces `config.timeout` on every request.
    pub fn new(config: &Config) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { endpoint: config.endpoint.clone(), lang: config.lang.clone(), http })
    }

    async fn fetch_current(&self, query: &WeatherQuery) -> Result<OwCurrentResponse, WeatherError> {
        debug!(city = %query.city, endpoint = %self.endpoint, "requesting current weather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query.city.as_str()),
                ("appid", query.credential.as_str()),
                ("units", "metric"),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            debug!(city = %query.city, "city not found");
            return Err(WeatherError::CityNotFound);
        }
        if status == StatusCode::UNAUTHORIZED {
            warn!("OpenWeather rejected the API key");
            return Err(WeatherError::InvalidCredential);
        }
        if !status.is_success() {
            warn!(status = status.as_u16(), "OpenWeather current request failed");
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::Decode(format!("{e} in body: {}", truncate_body(&body)))
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl TryFrom<OwCurrentResponse> for WeatherResult {
    type Error = WeatherError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let description = parsed
            .weather
            .first()
            .map(|w| capitalize(&w.description))
            .ok_or_else(|| WeatherError::Decode("response contained no weather conditions".into()))?;

        Ok(WeatherResult { temperature: parsed.main.temp, description })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn lookup(&self, query: &WeatherQuery) -> Result<WeatherResult, WeatherError> {
        let parsed = self.fetch_current(query).await?;
        let result = WeatherResult::try_from(parsed)?;

        debug!(city = %query.city, temperature = result.temperature, "weather lookup succeeded");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const WEATHER_PATH: &str = "/data/2.5/weather";

    fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        let config = Config::default().with_endpoint(format!("{}{WEATHER_PATH}", server.uri()));
        OpenWeatherProvider::new(&config).expect("client should build")
    }

    async fn respond_with(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn returns_temperature_and_capitalized_description() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(WEATHER_PATH))
            .and(query_param("q", "Stockholm"))
            .and(query_param("appid", "k"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "sv"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "main": { "temp": 21.3 },
                "weather": [{ "description": "clear sky" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .lookup(&WeatherQuery::new("Stockholm", "k"))
            .await
            .expect("lookup should succeed");

        assert_eq!(result, WeatherResult { temperature: 21.3, description: "Clear sky".into() });
    }

    #[tokio::test]
    async fn description_casing_is_normalized() {
        let server = respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "main": { "temp": 4.0, "humidity": 90 },
            "weather": [{ "description": "LIGHT RAIN" }, { "description": "mist" }],
            "name": "Göteborg"
        })))
        .await;

        let result = provider_for(&server)
            .lookup(&WeatherQuery::new("Göteborg", "k"))
            .await
            .expect("lookup should succeed");

        assert_eq!(result.description, "Light rain");
        assert_eq!(result.temperature, 4.0);
    }

    #[tokio::test]
    async fn not_found_maps_to_city_not_found() {
        let server = respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
        )
        .await;

        let err = provider_for(&server).lookup(&WeatherQuery::new("Atlantis", "k")).await.unwrap_err();

        assert!(matches!(err, WeatherError::CityNotFound));
    }

    #[tokio::test]
    async fn unauthorized_maps_to_invalid_credential() {
        let server = respond_with(ResponseTemplate::new(401)).await;

        let err = provider_for(&server).lookup(&WeatherQuery::new("Stockholm", "bad")).await.unwrap_err();

        assert!(matches!(err, WeatherError::InvalidCredential));
    }

    #[tokio::test]
    async fn other_statuses_carry_the_code() {
        let server = respond_with(ResponseTemplate::new(503).set_body_string("maintenance")).await;

        let err = provider_for(&server).lookup(&WeatherQuery::new("Stockholm", "k")).await.unwrap_err();

        match err {
            WeatherError::Provider { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_response_is_a_network_error() {
        let server = respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "main": { "temp": 1.0 }, "weather": [{ "description": "snow" }] }))
                .set_delay(Duration::from_secs(2)),
        )
        .await;
        let config = Config::default()
            .with_endpoint(format!("{}{WEATHER_PATH}", server.uri()))
            .with_timeout(Duration::from_millis(100));
        let provider = OpenWeatherProvider::new(&config).expect("client should build");

        let err = provider.lookup(&WeatherQuery::new("Kiruna", "k")).await.unwrap_err();

        match err {
            WeatherError::Network(e) => assert!(e.is_timeout()),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>")).await;

        let err = provider_for(&server).lookup(&WeatherQuery::new("Stockholm", "k")).await.unwrap_err();

        assert!(matches!(err, WeatherError::Decode(_)));
    }

    #[tokio::test]
    async fn empty_conditions_is_a_decode_error() {
        let server = respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "main": { "temp": 10.0 }, "weather": [] })),
        )
        .await;

        let err = provider_for(&server).lookup(&WeatherQuery::new("Stockholm", "k")).await.unwrap_err();

        match err {
            WeatherError::Decode(msg) => assert!(msg.contains("no weather conditions")),
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
