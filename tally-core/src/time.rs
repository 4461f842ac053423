//! Period labels: the `"March 2024"` keys history is stored under.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

/// Render a date's month as a period label, e.g. "March 2024".
pub fn period_label(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Label for the current month in an IANA timezone like "Asia/Kolkata".
pub fn current_period_label(tz: &str) -> Result<String> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
    let today = Utc::now().with_timezone(&tz).date_naive();
    Ok(period_label(today))
}

/// Accept a user-supplied period as `YYYY-MM` or `Month YYYY` and return
/// the canonical label.
pub fn parse_period(input: &str) -> Result<String> {
    let s = input.trim();
    let date = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("1 {s}"), "%d %B %Y"))
        .with_context(|| format!("invalid period '{s}', expected YYYY-MM or 'March 2024'"))?;
    Ok(period_label(date))
}
