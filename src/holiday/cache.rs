use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use moka::future::Cache;
use once_cell::sync::Lazy;

use super::CalendarificClient;

/// Holiday calendars keyed by "{country}-{year}".
///
/// One external call covers a whole year, so validation stays a local set
/// lookup after the first resignation submitted for that year.
pub static HOLIDAY_CACHE: Lazy<Cache<String, Arc<HashSet<NaiveDate>>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(64)
        .time_to_live(Duration::from_secs(86400)) // 24h TTL
        .build()
});

fn cache_key(country: &str, year: i32) -> String {
    format!("{}-{}", country.to_uppercase(), year)
}

/// Get the holiday calendar for a country/year, fetching it on a cache miss.
pub async fn calendar_for(
    client: &CalendarificClient,
    country: &str,
    year: i32,
) -> Result<Arc<HashSet<NaiveDate>>> {
    let key = cache_key(country, year);

    if let Some(calendar) = HOLIDAY_CACHE.get(&key).await {
        return Ok(calendar);
    }

    let calendar = Arc::new(client.fetch_calendar(country, year).await?);
    HOLIDAY_CACHE.insert(key, calendar.clone()).await;

    Ok(calendar)
}

/// Prefetch the current and next year so the first submissions after startup
/// skip the external round trip. A last working day routinely lands in the
/// following calendar year.
pub async fn warmup_holiday_cache(client: &CalendarificClient, country: &str) -> Result<()> {
    let current_year = Utc::now().year();
    let mut total = 0usize;

    for year in [current_year, current_year + 1] {
        let calendar = calendar_for(client, country, year).await?;
        total += calendar.len();
    }

    tracing::info!(
        country,
        years = ?[current_year, current_year + 1],
        holidays = total,
        "Holiday calendar warmup complete"
    );

    Ok(())
}
