use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Every way a forecast lookup can fail. None of them are recoverable.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Failed to load config file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: dotenv::Error,
    },

    #[error(
        "API key not present in {}.\n\
         Hint: add a line `WEATHER_API=<your key>` to that file.",
        path.display()
    )]
    MissingApiKey { path: PathBuf },

    #[error("Invalid forecast endpoint URL")]
    InvalidUrl(#[source] url::ParseError),

    #[error("Failed to send request to WeatherAPI.com")]
    Network(#[source] reqwest::Error),

    #[error("WeatherAPI forecast request failed with status {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("Failed to read WeatherAPI forecast response body")]
    BodyRead(#[source] reqwest::Error),

    #[error("Failed to parse WeatherAPI forecast JSON")]
    Decode(#[source] serde_json::Error),

    #[error("WeatherAPI response contained no forecastday data")]
    EmptyForecast,
}

impl WeatherError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            WeatherError::ConfigFile { .. } | WeatherError::MissingApiKey { .. } => 2,
            WeatherError::InvalidUrl(_) | WeatherError::Network(_) => 3,
            WeatherError::HttpStatus { .. } => 4,
            WeatherError::BodyRead(_) => 5,
            WeatherError::Decode(_) => 6,
            WeatherError::EmptyForecast => 7,
        }
    }
}
