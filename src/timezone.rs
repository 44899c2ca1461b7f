use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Calendar date parts of a day observed in a specific timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedDateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 0 = Sunday .. 6 = Saturday.
    pub weekday: usize,
}

pub fn resolve_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| Error::UnknownTimeZone(name.to_string()))
}

/// Interprets a calendar date at UTC midnight and reads it back in `tz`.
///
/// The contribution calendar carries bare ISO dates pinned to UTC, so a day
/// can land on a different local date depending on the report timezone. All
/// month/weekday bucketing goes through here, never the system timezone.
pub fn date_parts_in_zone(date: NaiveDate, tz: Tz) -> ZonedDateParts {
    let utc_midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    let local = utc_midnight.with_timezone(&tz);

    ZonedDateParts {
        year: local.year(),
        month: local.month(),
        day: local.day(),
        weekday: local.weekday().num_days_from_sunday() as usize,
    }
}

pub fn current_year_in_zone(tz: Tz) -> i32 {
    Utc::now().with_timezone(&tz).year()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_time_zone() {
        assert!(resolve_time_zone("Asia/Shanghai").is_ok());
        assert!(resolve_time_zone("UTC").is_ok());
        assert!(resolve_time_zone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_ahead_of_utc_keeps_date() {
        let tz = resolve_time_zone("Asia/Shanghai").unwrap();
        let parts = date_parts_in_zone(date(2024, 1, 15), tz);
        assert_eq!((parts.year, parts.month, parts.day), (2024, 1, 15));
    }

    #[test]
    fn test_behind_utc_shifts_back_a_day() {
        let tz = resolve_time_zone("America/New_York").unwrap();
        let parts = date_parts_in_zone(date(2024, 1, 1), tz);
        assert_eq!((parts.year, parts.month, parts.day), (2023, 12, 31));
    }

    #[test]
    fn test_weekday_index_is_sunday_based() {
        let tz = resolve_time_zone("UTC").unwrap();
        // 2024-01-07 was a Sunday, 2024-01-08 a Monday.
        assert_eq!(date_parts_in_zone(date(2024, 1, 7), tz).weekday, 0);
        assert_eq!(date_parts_in_zone(date(2024, 1, 8), tz).weekday, 1);
        assert_eq!(date_parts_in_zone(date(2024, 1, 13), tz).weekday, 6);
    }
}
