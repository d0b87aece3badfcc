//! Itinerary (trip) records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

crate::define_row_id!(ItineraryId, "Itinerary identifier (database primary key).");

/// A stored trip.
///
/// Serialized in camelCase because that is the shape the client store keeps
/// in memory (`itineraryId`, `startDate`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub itinerary_id: ItineraryId,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_email: String,
}

/// Itinerary payload before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItinerary {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_email: String,
}

impl NewItinerary {
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            start_date,
            end_date,
            user_email: user_email.into(),
        }
    }

    /// Check the fields a trip needs before it can be stored.
    ///
    /// # Errors
    /// Returns a human-readable message for the first failing rule.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Itinerary title must not be empty".to_string());
        }
        let email = self.user_email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(format!("Invalid owner e-mail '{}'", self.user_email));
        }
        if self.end_date < self.start_date {
            return Err(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            ));
        }
        Ok(())
    }

    /// Attach an id, producing the stored form.
    pub fn with_id(self, itinerary_id: ItineraryId) -> Itinerary {
        Itinerary {
            itinerary_id,
            title: self.title,
            start_date: self.start_date,
            end_date: self.end_date,
            user_email: self.user_email,
        }
    }
}

impl Itinerary {
    /// Number of calendar days covered, both ends included.
    pub fn day_count(&self) -> usize {
        let days = (self.end_date - self.start_date).num_days();
        if days < 0 {
            0
        } else {
            days as usize + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trip() -> NewItinerary {
        NewItinerary::new("Kyoto", date(2024, 9, 5), date(2024, 9, 7), "a@example.com")
    }

    #[test]
    fn test_validate_accepts_well_formed_trip() {
        assert!(trip().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let mut it = trip();
        it.title = "   ".to_string();
        assert!(it.validate().unwrap_err().contains("title"));
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let mut it = trip();
        it.user_email = "nobody".to_string();
        assert!(it.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let mut it = trip();
        it.end_date = date(2024, 9, 1);
        assert!(it.validate().unwrap_err().contains("before"));
    }

    #[test]
    fn test_single_day_trip_is_valid() {
        let mut it = trip();
        it.end_date = it.start_date;
        assert!(it.validate().is_ok());
        assert_eq!(it.with_id(ItineraryId::new(1)).day_count(), 1);
    }

    #[test]
    fn test_camel_case_wire_format() {
        let it = trip().with_id(ItineraryId::new(7));
        let json = serde_json::to_value(&it).unwrap();
        assert_eq!(json["itineraryId"], 7);
        assert_eq!(json["startDate"], "2024-09-05");
        assert_eq!(json["endDate"], "2024-09-07");
        assert_eq!(json["userEmail"], "a@example.com");
        assert_eq!(it.day_count(), 3);
    }

    #[test]
    fn test_id_parses_from_path_segment() {
        let id: ItineraryId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert!("abc".parse::<ItineraryId>().is_err());
    }
}
