//! The `Student` entity snapshot and its age arithmetic.
//!
//! A snapshot is plain data: every field is optional because a candidate
//! record may be incomplete, and deciding whether that is acceptable is the
//! validation engine's job.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Minimum age, in calendar years, for a student to be accepted.
pub const AGE_MINIMUM_YEARS: u32 = 16;

/// Age threshold, in days, used by the dog/age correctness rule.
pub const DOG_AGE_MINIMUM_DAYS: i64 = 44;

/// Highest dog count the dog/age correctness rule accepts.
pub const DOG_MAXIMUM: i32 = 1;

/// The one name the dog/age correctness rule rejects.
pub const REJECTED_NAME: &str = "Xavier";

/// In-memory field values of a student at validation time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub name: Option<String>,
    pub surnames: Option<String>,
    pub birthday: Option<Timestamp>,
    pub website: Option<String>,
    pub number_of_dogs: Option<i32>,
}

impl Student {
    /// Whether the student was born strictly before `years` calendar years
    /// prior to `now`. `None` when the birthday is unknown.
    pub fn is_older_than_years(&self, years: u32, now: Timestamp) -> Option<bool> {
        self.birthday.map(|b| b < years_before(now, years))
    }

    /// Whether the student was born strictly before `days` days prior to
    /// `now`. `None` when the birthday is unknown.
    pub fn is_older_than_days(&self, days: i64, now: Timestamp) -> Option<bool> {
        self.birthday.map(|b| b < days_before(now, days))
    }
}

/// `now` shifted back by whole calendar years.
///
/// Feb 29 clamps to Feb 28 in non-leap target years. Saturates at the
/// earliest representable instant.
pub fn years_before(now: Timestamp, years: u32) -> Timestamp {
    years
        .checked_mul(12)
        .and_then(|months| now.checked_sub_months(Months::new(months)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// `now` shifted back by whole days. Saturates at the earliest
/// representable instant.
pub fn days_before(now: Timestamp, days: i64) -> Timestamp {
    Duration::try_days(days)
        .and_then(|delta| now.checked_sub_signed(delta))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn years_before_uses_calendar_years() {
        assert_eq!(years_before(at(2024, 6, 15), 16), at(2008, 6, 15));
    }

    #[test]
    fn years_before_clamps_leap_day() {
        assert_eq!(years_before(at(2024, 2, 29), 1), at(2023, 2, 28));
    }

    #[test]
    fn days_before_counts_days() {
        assert_eq!(days_before(at(2024, 3, 1), 44), at(2024, 1, 17));
    }

    #[test]
    fn exact_boundary_is_not_older() {
        let now = at(2024, 6, 15);
        let student = Student {
            birthday: Some(at(2008, 6, 15)),
            ..Default::default()
        };
        assert_eq!(student.is_older_than_years(16, now), Some(false));

        let student = Student {
            birthday: Some(at(2008, 6, 14)),
            ..Default::default()
        };
        assert_eq!(student.is_older_than_years(16, now), Some(true));
    }

    #[test]
    fn missing_birthday_has_no_age() {
        let now = at(2024, 6, 15);
        let student = Student::default();
        assert_eq!(student.is_older_than_years(16, now), None);
        assert_eq!(student.is_older_than_days(44, now), None);
    }
}
