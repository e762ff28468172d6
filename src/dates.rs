//! Short date labels for the results panel and forecast cards

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Timestamp layout of forecast entries (`dt_txt`)
pub const FORECAST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Weekday, day and month: "Mon, 17 Aug"
pub fn current_date_label<D: Datelike>(now: &D) -> String {
    let date = NaiveDate::from_ymd_opt(now.year(), now.month(), now.day());
    match date {
        Some(date) => date.format("%a, %d %b").to_string(),
        None => String::new(),
    }
}

/// Day and month of a forecast timestamp: "17 Aug"
pub fn forecast_date_label(timestamp: &str) -> Option<String> {
    parse_forecast_timestamp(timestamp).map(|dt| dt.format("%d %b").to_string())
}

pub fn parse_forecast_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp.trim(), FORECAST_TIMESTAMP_FORMAT).ok()
}
