//! Calendar-day arithmetic for streaks.
//!
//! Streaks count calendar days, not elapsed 24h periods. A [`DayBoundary`]
//! fixes the UTC offset at which one day rolls into the next; the default is
//! UTC midnight.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundary {
    offset: FixedOffset,
}

impl DayBoundary {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// `None` when the offset is 24 hours or more in either direction.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(minutes.checked_mul(60)?)?;
        Some(Self { offset })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// The calendar day `now` falls on.
    pub fn day_of(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.offset).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.day_of(Utc::now())
    }

    /// Parse a client-supplied date.
    ///
    /// Accepts a bare `YYYY-MM-DD` (taken literally) or an RFC 3339 timestamp
    /// (mapped to its calendar day under this boundary).
    pub fn parse_date(&self, input: &str) -> Option<NaiveDate> {
        let input = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(input)
            .ok()
            .map(|dt| self.day_of(dt.with_timezone(&Utc)))
    }
}

impl Default for DayBoundary {
    fn default() -> Self {
        Self::utc()
    }
}

/// Signed number of calendar days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Strict `YYYY-MM-DD` parse, used for values read back from storage.
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn midnight_crossing_is_one_day() {
        let boundary = DayBoundary::utc();
        let late = Utc.with_ymd_and_hms(2024, 1, 10, 23, 59, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 1, 11, 0, 1, 0).unwrap();
        assert_eq!(days_between(boundary.day_of(late), boundary.day_of(early)), 1);
    }

    #[test]
    fn same_day_is_zero_even_hours_apart() {
        let boundary = DayBoundary::utc();
        let morning = Utc.with_ymd_and_hms(2024, 1, 10, 0, 30, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 1, 10, 23, 30, 0).unwrap();
        assert_eq!(boundary.day_of(morning), boundary.day_of(night));
    }

    #[test]
    fn offset_shifts_the_day() {
        let new_york = DayBoundary::from_offset_minutes(-300).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 1, 11, 3, 0, 0).unwrap();
        assert_eq!(new_york.day_of(instant), date(2024, 1, 10));
        assert_eq!(DayBoundary::utc().day_of(instant), date(2024, 1, 11));
        assert_eq!(new_york.offset_minutes(), -300);
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(DayBoundary::from_offset_minutes(24 * 60).is_none());
        assert!(DayBoundary::from_offset_minutes(i32::MAX).is_none());
    }

    #[test]
    fn parse_date_accepts_plain_and_rfc3339() {
        let boundary = DayBoundary::utc();
        assert_eq!(boundary.parse_date("2024-01-10"), Some(date(2024, 1, 10)));
        assert_eq!(
            boundary.parse_date("2024-01-10T22:00:00-05:00"),
            Some(date(2024, 1, 11))
        );
        assert_eq!(boundary.parse_date("not a date"), None);
        assert_eq!(boundary.parse_date("2024-02-30"), None);
        assert_eq!(boundary.parse_date(""), None);
    }

    #[test]
    fn days_between_is_signed() {
        assert_eq!(days_between(date(2024, 1, 10), date(2024, 1, 14)), 4);
        assert_eq!(days_between(date(2024, 1, 14), date(2024, 1, 10)), -4);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
    }

    #[test]
    fn stored_dates_round_trip_through_format() {
        let d = date(2024, 12, 31);
        assert_eq!(parse_stored_date(&format_date(d)), Some(d));
    }
}
