//! Reduce the 3-hour forecast to one midday entry per upcoming day

use std::collections::HashSet;
use std::slice;

use chrono::{NaiveDate, NaiveTime};

use crate::dates::parse_forecast_timestamp;
use crate::state::ForecastEntry;

/// Lazily yields at most one entry per calendar day.
///
/// An entry qualifies when its time is exactly 12:00:00, its date is not
/// `today`, and no earlier entry for the same date was yielded. Days without
/// an exact noon record are skipped, as are unparseable timestamps.
pub struct DailySelection<'a> {
    entries: slice::Iter<'a, ForecastEntry>,
    today: NaiveDate,
    seen: HashSet<NaiveDate>,
}

impl<'a> Iterator for DailySelection<'a> {
    type Item = &'a ForecastEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let noon = NaiveTime::from_hms_opt(12, 0, 0)?;
        for entry in self.entries.by_ref() {
            let Some(at) = parse_forecast_timestamp(&entry.timestamp) else {
                continue;
            };
            let date = at.date();
            if at.time() == noon && date != self.today && self.seen.insert(date) {
                return Some(entry);
            }
        }
        None
    }
}

pub fn select_daily(entries: &[ForecastEntry], today: NaiveDate) -> DailySelection<'_> {
    DailySelection {
        entries: entries.iter(),
        today,
        seen: HashSet::new(),
    }
}
