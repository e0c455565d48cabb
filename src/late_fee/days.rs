use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::errors::{DocumentError, Result};

const SECONDS_PER_DAY: i64 = 86_400;

/// parse a form date; an empty field means "not set"
pub fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DocumentError::InvalidDate {
            input: input.to_string(),
        })
}

/// whole days in a duration, any partial day counts as a full one
pub fn ceil_days(elapsed: Duration) -> u32 {
    let seconds = elapsed.num_seconds();
    if seconds <= 0 {
        return 0;
    }
    let days = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
    u32::try_from(days).unwrap_or(u32::MAX)
}

/// days late between two instants, zero unless `paid` is strictly after `due`
pub fn days_late_between(due: NaiveDateTime, paid: NaiveDateTime) -> u32 {
    if paid <= due {
        return 0;
    }
    ceil_days(paid - due)
}

/// days late between two calendar dates
pub fn days_late(due: NaiveDate, paid: NaiveDate) -> u32 {
    if paid <= due {
        return 0;
    }
    ceil_days(paid.signed_duration_since(due))
}

/// true when both dates are set and payment came strictly after the due date
pub fn is_overdue(due: Option<NaiveDate>, paid: Option<NaiveDate>) -> bool {
    matches!((due, paid), (Some(due), Some(paid)) if paid > due)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date("").unwrap(), None);
        assert_eq!(parse_optional_date("   ").unwrap(), None);
        assert_eq!(parse_optional_date("2024-01-11").unwrap(), Some(date(2024, 1, 11)));

        assert!(matches!(
            parse_optional_date("11/01/2024"),
            Err(DocumentError::InvalidDate { .. })
        ));
        assert!(parse_optional_date("2024-02-30").is_err());
    }

    #[test]
    fn test_days_late_whole_days() {
        assert_eq!(days_late(date(2024, 1, 1), date(2024, 1, 11)), 10);
        // leap day counted
        assert_eq!(days_late(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_late(date(2023, 12, 31), date(2024, 1, 1)), 1);
    }

    #[test]
    fn test_same_day_is_not_late() {
        assert_eq!(days_late(date(2024, 1, 1), date(2024, 1, 1)), 0);
        assert_eq!(days_late(date(2024, 1, 10), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_partial_day_rounds_up() {
        assert_eq!(ceil_days(Duration::hours(1)), 1);
        assert_eq!(ceil_days(Duration::hours(24)), 1);
        assert_eq!(ceil_days(Duration::hours(25)), 2);
        assert_eq!(ceil_days(Duration::seconds(-5)), 0);

        let due = date(2024, 1, 1).and_hms_opt(18, 0, 0).unwrap();
        let paid = date(2024, 1, 2).and_hms_opt(9, 0, 0).unwrap();
        assert_eq!(days_late_between(due, paid), 1);
    }

    #[test]
    fn test_is_overdue_needs_both_dates() {
        assert!(is_overdue(Some(date(2024, 1, 1)), Some(date(2024, 1, 2))));
        assert!(!is_overdue(Some(date(2024, 1, 1)), Some(date(2024, 1, 1))));
        assert!(!is_overdue(Some(date(2024, 1, 1)), None));
        assert!(!is_overdue(None, Some(date(2024, 1, 2))));
    }
}
