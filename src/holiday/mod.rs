pub mod cache;

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

/// Capability interface for the public-holiday lookup.
///
/// The production implementation talks to Calendarific; tests substitute a
/// stub. Callers own the fail-open policy — an `Err` here means "lookup
/// unavailable", not "is a holiday".
#[allow(async_fn_in_trait)]
pub trait HolidayOracle {
    async fn is_holiday(&self, date: NaiveDate, country: &str) -> Result<bool>;
}

#[derive(Clone)]
pub struct CalendarificClient {
    api_key: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ApiEnvelope {
    response: ApiHolidayList,
}

#[derive(Deserialize)]
struct ApiHolidayList {
    #[serde(default)]
    holidays: Vec<ApiHoliday>,
}

#[derive(Deserialize)]
struct ApiHoliday {
    date: ApiDate,
}

#[derive(Deserialize)]
struct ApiDate {
    iso: String,
}

impl CalendarificClient {
    pub fn new(api_key: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self { api_key, http }
    }

    /// Fetch every public holiday for a country/year as a set of dates.
    pub async fn fetch_calendar(&self, country: &str, year: i32) -> Result<HashSet<NaiveDate>> {
        let url = format!(
            "https://calendarific.com/api/v2/holidays?api_key={}&country={}&year={}",
            self.api_key, country, year
        );

        let envelope: ApiEnvelope = self
            .http
            .get(&url)
            .send()
            .await
            .context("holiday API request failed")?
            .error_for_status()
            .context("holiday API returned an error status")?
            .json()
            .await
            .context("holiday API returned a malformed body")?;

        let mut days = HashSet::new();
        for holiday in envelope.response.holidays {
            // `date.iso` may carry a time component for observances; the
            // leading ten characters are always the calendar date.
            let iso = holiday.date.iso.get(..10).unwrap_or(&holiday.date.iso);
            if let Ok(day) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
                days.insert(day);
            }
        }

        Ok(days)
    }
}

impl HolidayOracle for CalendarificClient {
    async fn is_holiday(&self, date: NaiveDate, country: &str) -> Result<bool> {
        let calendar = cache::calendar_for(self, country, date.year()).await?;
        Ok(calendar.contains(&date))
    }
}
