use chrono::{DateTime, Utc};

/// Where the forecast applies. Display only.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature_c: f64,
    pub condition: String,
}

/// One hour of the forecast day.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyForecastEntry {
    /// Seconds since the Unix epoch.
    pub time_epoch: i64,
    pub temperature_c: f64,
    pub condition: String,
    /// Probability of precipitation, 0 to 100.
    pub chance_of_rain: f64,
}

impl HourlyForecastEntry {
    /// The entry's timestamp, or `None` if it is outside chrono's range.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time_epoch, 0)
    }

    /// Whether this hour starts strictly after `now`.
    pub fn is_after(&self, now: DateTime<Utc>) -> bool {
        self.time_epoch > now.timestamp()
    }
}

/// Everything decoded from one forecast response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: Location,
    pub current: CurrentConditions,
    pub hours: Vec<HourlyForecastEntry>,
}

impl WeatherReport {
    /// Hours strictly after `now`, in their original order.
    pub fn upcoming_hours(&self, now: DateTime<Utc>) -> impl Iterator<Item = &HourlyForecastEntry> {
        self.hours.iter().filter(move |h| h.is_after(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(time_epoch: i64) -> HourlyForecastEntry {
        HourlyForecastEntry {
            time_epoch,
            temperature_c: 20.0,
            condition: "Sunny".into(),
            chance_of_rain: 0.0,
        }
    }

    #[test]
    fn upcoming_hours_excludes_now_and_past() {
        let report = WeatherReport {
            location: Location { name: "Hubli".into(), country: "India".into() },
            current: CurrentConditions { temperature_c: 25.0, condition: "Clear".into() },
            hours: vec![hour(3_600), hour(7_200), hour(10_800), hour(14_400)],
        };
        let now = DateTime::from_timestamp(7_200, 0).expect("valid timestamp");

        let kept: Vec<i64> = report.upcoming_hours(now).map(|h| h.time_epoch).collect();
        assert_eq!(kept, vec![10_800, 14_400]);
    }

    #[test]
    fn out_of_range_timestamp_has_no_time() {
        assert!(hour(i64::MAX).time().is_none());
        assert!(hour(0).time().is_some());
    }
}
