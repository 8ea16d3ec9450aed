use std::fmt;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::{
    Config, WeatherError,
    model::{CurrentConditions, HourlyForecastEntry, Location, WeatherReport},
};

use super::ForecastProvider;

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

#[derive(Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key().to_owned())
    }

    /// Point the provider at another host, e.g. a local test server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self::with_client(api_key, base_url, Client::new())
    }

    pub fn with_client(api_key: String, base_url: impl Into<String>, http: Client) -> Self {
        Self { api_key, base_url: base_url.into(), http }
    }

    /// One day of hourly data, no air quality, no alerts.
    pub fn forecast_url(&self, location: &str) -> Result<Url, url::ParseError> {
        Url::parse_with_params(
            &format!("{}/forecast.json", self.base_url.trim_end_matches('/')),
            &[
                ("key", self.api_key.as_str()),
                ("q", location),
                ("days", "1"),
                ("aqi", "no"),
                ("alerts", "no"),
            ],
        )
    }
}

impl fmt::Debug for WeatherApiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherApiProvider")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiProvider {
    async fn forecast(&self, location: &str) -> Result<WeatherReport, WeatherError> {
        let url = self.forecast_url(location).map_err(WeatherError::InvalidUrl)?;

        // reqwest errors render their URL; swap in the one without the key.
        let shown = redact_key(&url);
        tracing::debug!(url = %shown, "requesting forecast");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| WeatherError::Network(e.with_url(shown.clone())))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| WeatherError::BodyRead(e.with_url(shown)))?;
        tracing::debug!(%status, bytes = body.len(), "received forecast response");

        decode_forecast(status, &body)
    }
}

/// Turn a forecast response into a report.
///
/// Non-success statuses, schema mismatches and responses without a forecast
/// day are all errors. Only the first forecast day is used.
pub fn decode_forecast(status: StatusCode, body: &str) -> Result<WeatherReport, WeatherError> {
    if !status.is_success() {
        return Err(WeatherError::HttpStatus { status, body: truncate_body(body) });
    }

    let parsed: WaForecastResponse = serde_json::from_str(body).map_err(WeatherError::Decode)?;

    let day = parsed.forecast.forecastday.into_iter().next().ok_or(WeatherError::EmptyForecast)?;

    let hours: Vec<HourlyForecastEntry> = day
        .hour
        .into_iter()
        .map(|h| HourlyForecastEntry {
            time_epoch: h.time_epoch,
            temperature_c: h.temp_c,
            condition: h.condition.text,
            chance_of_rain: h.chance_of_rain,
        })
        .collect();
    tracing::debug!(hours = hours.len(), "decoded forecast");

    Ok(WeatherReport {
        location: Location { name: parsed.location.name, country: parsed.location.country },
        current: CurrentConditions {
            temperature_c: parsed.current.temp_c,
            condition: parsed.current.condition.text,
        },
        hours,
    })
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastHour {
    time_epoch: i64,
    temp_c: f64,
    condition: WaCondition,
    chance_of_rain: f64,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    hour: Vec<WaForecastHour>,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    location: WaLocation,
    current: WaCurrent,
    forecast: WaForecast,
}

fn redact_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
