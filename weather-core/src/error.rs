use thiserror::Error;

/// Everything that can go wrong while looking up the current weather.
///
/// Callers branch on the variant; the messages are only meant for humans.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered 404: there is no city by that name.
    #[error("City not found.")]
    CityNotFound,

    /// The provider answered 401: the API key was rejected.
    #[error("Invalid API key.")]
    InvalidCredential,

    /// Any other non-success status.
    #[error("provider responded with status {status}: {body}")]
    Provider { status: u16, body: String },

    /// Timeout, connection failure, or an interrupted body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not have the expected shape.
    #[error("unexpected response from provider: {0}")]
    Decode(String),

    /// No API key available to the caller.
    #[error("Missing API key. Set it in the {var} environment variable.")]
    MissingCredential { var: &'static str },
}

impl WeatherError {
    /// HTTP status carried by the error, if the provider answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::CityNotFound => Some(404),
            WeatherError::InvalidCredential => Some(401),
            WeatherError::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }
}
