//! Per-day entries of an itinerary view.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One labelled day of a trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    /// `Day1`, `Day2`, ...
    pub name: String,
    /// Unpadded slash form, e.g. `2024/9/5`.
    pub date1: String,
    /// ISO form, e.g. `2024-09-05`.
    pub date2: String,
    /// Month/day with weekday label, e.g. `9/5 木`.
    #[serde(rename = "displayDate")]
    pub display_date: String,
}

/// Language used for weekday labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekdayLocale {
    #[default]
    Ja,
    En,
}

const JA_WEEKDAYS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];
const EN_WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl WeekdayLocale {
    /// Short weekday label, Sunday-first tables.
    pub fn label(self, weekday: Weekday) -> &'static str {
        let idx = weekday.num_days_from_sunday() as usize;
        match self {
            WeekdayLocale::Ja => JA_WEEKDAYS[idx],
            WeekdayLocale::En => EN_WEEKDAYS[idx],
        }
    }
}

impl FromStr for WeekdayLocale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ja" | "ja-jp" => Ok(Self::Ja),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(WeekdayLocale::Ja.label(Weekday::Sun), "日");
        assert_eq!(WeekdayLocale::Ja.label(Weekday::Thu), "木");
        assert_eq!(WeekdayLocale::En.label(Weekday::Sat), "Sat");
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("JA".parse::<WeekdayLocale>().unwrap(), WeekdayLocale::Ja);
        assert_eq!("en-US".parse::<WeekdayLocale>().unwrap(), WeekdayLocale::En);
        assert!("fr".parse::<WeekdayLocale>().is_err());
        assert_eq!(WeekdayLocale::default(), WeekdayLocale::Ja);
    }
}
