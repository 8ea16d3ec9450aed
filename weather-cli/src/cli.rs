use std::{fmt::Display, io::Write, path::Path};

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone, Utc};
use clap::Parser;
use weather_core::{Config, DEFAULT_CITY, ForecastProvider, WeatherError, provider_from_config};

use crate::output::{self, Palette};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and today's hourly forecast")]
pub struct Cli {
    /// City or location name to look up.
    #[arg(default_value = DEFAULT_CITY)]
    pub city: String,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_with_config(&Config::default_path()).await
    }

    async fn run_with_config(self, config_path: &Path) -> anyhow::Result<()> {
        // Must fail before any request goes out.
        let config = Config::load(config_path)?;
        let provider = provider_from_config(&config);

        // Unlocked handle: each line takes the lock only while it is written.
        let mut out = std::io::stdout();
        show(provider.as_ref(), &self.city, Utc::now(), &Local, Palette::detect(), &mut out).await
    }
}

/// Fetch the forecast for `city` and print it. Nothing is printed on failure.
pub async fn show<Tz, W>(
    provider: &dyn ForecastProvider,
    city: &str,
    now: DateTime<Utc>,
    tz: &Tz,
    palette: Palette,
    out: &mut W,
) -> anyhow::Result<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    tracing::info!(city, "fetching forecast");
    let report = provider.forecast(city).await?;

    output::render(&report, now, tz, palette, out).context("Failed to write forecast")?;
    out.flush().context("Failed to write forecast")?;
    Ok(())
}

/// Map a top-level failure to a process exit status.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<WeatherError>().map_or(1, WeatherError::exit_code)
}
