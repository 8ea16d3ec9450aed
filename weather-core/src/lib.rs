//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Loading the WeatherAPI.com key from a local dotenv file
//! - The forecast provider abstraction and its WeatherAPI.com implementation
//! - Shared domain models (location, current conditions, hourly entries)
//! - The error taxonomy and its exit codes
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::WeatherError;
pub use model::{CurrentConditions, HourlyForecastEntry, Location, WeatherReport};
pub use provider::{DEFAULT_CITY, ForecastProvider, provider_from_config};
pub use reqwest::StatusCode;
