//! Per-day listing of a trip's date range.

use chrono::{Datelike, NaiveDate};

use crate::api::{DayEntry, WeekdayLocale};

/// One entry per calendar day from `start` to `end`, both inclusive.
///
/// Entries are named `Day1`, `Day2`, ... Returns an empty list when `end` is
/// before `start`.
pub fn generate_date_list(start: NaiveDate, end: NaiveDate, locale: WeekdayLocale) -> Vec<DayEntry> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .enumerate()
        .map(|(i, day)| DayEntry {
            name: format!("Day{}", i + 1),
            date1: day.format("%Y/%-m/%-d").to_string(),
            date2: day.format("%Y-%m-%d").to_string(),
            display_date: format!(
                "{}/{} {}",
                day.month(),
                day.day(),
                locale.label(day.weekday())
            ),
        })
        .collect()
}
