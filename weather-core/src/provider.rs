use crate::{Config, WeatherError, WeatherReport, provider::weatherapi::WeatherApiProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Location used when none is given on the command line.
pub const DEFAULT_CITY: &str = "Hubli";

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch current conditions and today's hourly forecast for `location`.
    async fn forecast(&self, location: &str) -> Result<WeatherReport, WeatherError>;
}

/// Construct the WeatherAPI.com provider from loaded credentials.
pub fn provider_from_config(config: &Config) -> Box<dyn ForecastProvider> {
    Box::new(WeatherApiProvider::from_config(config))
}
