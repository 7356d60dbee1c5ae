// Time-related operations.
use serde::{Deserialize, Serialize};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date, Duration, Weekday};

use crate::error::{LeagueError, Result};

// Use this format for formatting and parsing dates.
static ISO_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// JSON serialisation and deserialisation for ISO dates.
pub mod iso_date_format {
    use serde::{de, ser, Deserialize, Deserializer, Serializer};
    use time::Date;

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        let s = super::date_to_string(*date).map_err(ser::Error::custom)?;
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where D: Deserializer<'de> {
        let s = String::deserialize(deserializer)?;
        super::parse_date(&s).map_err(de::Error::custom)
    }
}

// An inclusive span of days, such as a holiday weekend or a championship window.
#[derive(Debug, Serialize, Deserialize)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[serde(from = "RawDateRange")]
pub struct DateRange {
    #[serde(with = "iso_date_format")]
    pub start: Date,
    #[serde(with = "iso_date_format")]
    pub end: Date,
}

// The boundaries as the backend sends them, possibly the wrong way around.
#[derive(Deserialize)]
struct RawDateRange {
    #[serde(with = "iso_date_format")]
    start: Date,
    #[serde(with = "iso_date_format")]
    end: Date,
}

impl From<RawDateRange> for DateRange {
    fn from(raw: RawDateRange) -> Self {
        Self::build(raw.start, raw.end)
    }
}

impl DateRange {
    // Build the range. The boundaries are swapped if given the wrong way around.
    pub fn build(start: Date, end: Date) -> Self {
        match start <= end {
            true => Self { start: start, end: end },
            false => Self { start: end, end: start },
        }
    }

    // A range covering a single day.
    pub fn single_day(date: Date) -> Self {
        Self::build(date, date)
    }

    // Check if the date falls within the range, boundaries included.
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    // How many days the range covers.
    pub fn days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }
}

// Convert a Date object to an ISO string.
pub fn date_to_string(date: Date) -> Result<String> {
    date.format(ISO_FORMAT)
        .map_err(|e| LeagueError::invalid_input(format!("cannot format {date}: {e}")))
}

// Convert an ISO string to a Date object.
pub fn parse_date(date: &str) -> Result<Date> {
    Date::parse(date.trim(), ISO_FORMAT)
        .map_err(|e| LeagueError::invalid_input(format!("unparseable date '{date}': {e}")))
}

// Step exactly one calendar week forward.
pub fn next_week(date: Date) -> Result<Date> {
    date.checked_add(Duration::weeks(1))
        .ok_or_else(|| LeagueError::invalid_input(format!("no calendar week after {date}")))
}

// Get the first date on or after the given date that falls on the weekday.
pub fn roll_to_weekday(date: Date, weekday: Weekday) -> Result<Date> {
    let mut rolled = date;
    while rolled.weekday() != weekday {
        rolled = rolled.next_day()
            .ok_or_else(|| LeagueError::invalid_input(format!("no {weekday} after {date}")))?;
    }

    return Ok(rolled);
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parses_and_formats_iso_dates() {
        let d = parse_date("2025-01-08").unwrap();
        assert_eq!(d, date!(2025 - 01 - 08));
        assert_eq!(date_to_string(d).unwrap(), "2025-01-08");
        assert_eq!(parse_date(" 2025-01-08 ").unwrap(), d);
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(matches!(parse_date("2025-13-40"), Err(LeagueError::InvalidInput { .. })));
        assert!(matches!(parse_date("next wednesday"), Err(LeagueError::InvalidInput { .. })));
    }

    #[test]
    fn week_steps_cross_year_boundaries() {
        assert_eq!(next_week(date!(2024 - 12 - 25)).unwrap(), date!(2025 - 01 - 01));
        assert_eq!(next_week(date!(2024 - 02 - 26)).unwrap(), date!(2024 - 03 - 04));
    }

    #[test]
    fn rolls_forward_to_weekday() {
        // 2025-01-06 is a Monday.
        let rolled = roll_to_weekday(date!(2025 - 01 - 06), Weekday::Wednesday).unwrap();
        assert_eq!(rolled, date!(2025 - 01 - 08));

        let same = roll_to_weekday(date!(2025 - 01 - 08), Weekday::Wednesday).unwrap();
        assert_eq!(same, date!(2025 - 01 - 08));
    }

    #[test]
    fn ranges_are_inclusive() {
        let range = DateRange::build(date!(2025 - 12 - 26), date!(2025 - 12 - 24));
        assert_eq!(range.start, date!(2025 - 12 - 24));
        assert!(range.contains(date!(2025 - 12 - 24)));
        assert!(range.contains(date!(2025 - 12 - 26)));
        assert!(!range.contains(date!(2025 - 12 - 27)));
        assert_eq!(range.days(), 3);
    }

    #[test]
    fn ranges_serialise_as_iso_strings() {
        let range = DateRange::single_day(date!(2025 - 07 - 04));
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"start":"2025-07-04","end":"2025-07-04"}"#);
        assert_eq!(serde_json::from_str::<DateRange>(&json).unwrap(), range);
    }

    #[test]
    fn reversed_ranges_are_swapped_when_read() {
        let range: DateRange = serde_json::from_str(r#"{"start":"2025-12-26","end":"2025-12-24"}"#).unwrap();
        assert_eq!(range, DateRange::build(date!(2025 - 12 - 24), date!(2025 - 12 - 26)));
        assert!(range.contains(date!(2025 - 12 - 25)));
    }
}
