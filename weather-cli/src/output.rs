//! Human-friendly rendering of a forecast report.

use std::{
    fmt::Display,
    io::{self, IsTerminal, Write},
};

use chrono::{DateTime, TimeZone, Utc};
use weather_core::{HourlyForecastEntry, WeatherReport};

/// Chance of rain (percent) at or above which an hour is highlighted.
pub const RAIN_ALERT_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Likely rain; rendered red.
    Attention,
    /// Rendered cyan.
    Neutral,
}

impl Tint {
    /// Compares the raw probability, not the rounded one shown to the user.
    pub fn for_chance_of_rain(chance_of_rain: f64) -> Self {
        if chance_of_rain >= RAIN_ALERT_THRESHOLD { Tint::Attention } else { Tint::Neutral }
    }

    fn ansi_code(self) -> u8 {
        match self {
            Tint::Attention => 31,
            Tint::Neutral => 36,
        }
    }
}

/// Whether ANSI colors are written at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub const fn new(enabled: bool) -> Self {
        Palette { enabled }
    }

    /// Colors only for a terminal, and never when `NO_COLOR` is set.
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Palette::new(io::stdout().is_terminal() && !no_color)
    }

    pub fn paint(self, text: &str, tint: Tint) -> String {
        if self.enabled {
            format!("\u{1b}[{}m{}\u{1b}[0m", tint.ansi_code(), text)
        } else {
            text.to_string()
        }
    }
}

/// Round half away from zero for display. `-0.4` shows as `0`, not `-0`.
pub fn display_round(value: f64) -> i64 {
    value.round() as i64
}

/// `<country>, <city>: <temp>C, <condition>`
pub fn header_line(report: &WeatherReport) -> String {
    format!(
        "{}, {}: {}C, {}",
        report.location.country,
        report.location.name,
        display_round(report.current.temperature_c),
        report.current.condition,
    )
}

/// `<HH:MM> - <temp>C, <rain>%, <condition>`
pub fn hour_line<Tz>(entry: &HourlyForecastEntry, at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{} - {}C, {}%, {}",
        at.format("%H:%M"),
        display_round(entry.temperature_c),
        display_round(entry.chance_of_rain),
        entry.condition,
    )
}

/// Print the header and every hour strictly after `now`, in order.
///
/// Returns the number of hourly lines written.
pub fn render<Tz, W>(
    report: &WeatherReport,
    now: DateTime<Utc>,
    tz: &Tz,
    palette: Palette,
    out: &mut W,
) -> io::Result<usize>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    writeln!(out, "{}", header_line(report))?;

    let mut printed = 0;
    for entry in report.upcoming_hours(now) {
        let Some(at) = entry.time() else {
            tracing::warn!(time_epoch = entry.time_epoch, "skipping hour with invalid timestamp");
            continue;
        };
        let line = hour_line(entry, &at.with_timezone(tz));
        writeln!(out, "{}", palette.paint(&line, Tint::for_chance_of_rain(entry.chance_of_rain)))?;
        printed += 1;
    }

    tracing::debug!(total = report.hours.len(), printed, "rendered forecast");
    Ok(printed)
}
