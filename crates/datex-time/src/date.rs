//! `Date` — a proleptic-Gregorian calendar date stored as a day count.
//!
//! Internally a `Date` is a signed day offset from 1970-01-01 (a Thursday),
//! following the well-known civil-calendar <-> day-count conversion (the
//! same algorithm underlying most modern date libraries). The day-count
//! representation keeps comparison, subtraction, and day-granular arithmetic
//! to simple integer operations, while `year`/`month`/`day` are computed on
//! demand from the serial.

use datex_core::errors::{ensure, Error, Result};
use std::fmt;

use crate::weekday::Weekday;

/// A calendar date on the proleptic Gregorian calendar.
///
/// `Date` does not bound itself to any particular era; [`Date::MIN`] and
/// [`Date::MAX`] mark the sentinels the date-expression engine uses to
/// represent an open-ended window, not the edges of a supported range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(i64);

/// Days between 0000-03-01 and 1970-01-01, used to re-base the day count
/// onto the era boundaries the civil-calendar algorithm expects.
const EPOCH_OFFSET: i64 = 719_468;

impl Date {
    /// Sentinel standing in for "no lower bound". Not a meaningful calendar
    /// date on its own; only used as an open-window marker.
    pub const MIN: Date = Date(-365_250_000_000);

    /// Sentinel standing in for "no upper bound".
    pub const MAX: Date = Date(365_250_000_000);

    /// Construct a date from a proleptic-Gregorian year/month/day triple.
    ///
    /// `year` may be any value representable by `i64` (including zero and
    /// negative years, read as BCE in the proleptic sense). `month` must be
    /// 1..=12 and `day` must be a valid day for that year/month.
    pub fn from_ymd(year: i64, month: u32, day: u32) -> Result<Self> {
        ensure!(
            (1..=12).contains(&month),
            Error::InvalidDate,
            "month {month} out of range 1..=12"
        );
        ensure!(
            day >= 1 && day <= days_in_month(year, month),
            Error::InvalidDate,
            "day {day} out of range for {year}-{month:02}"
        );
        Ok(Date(days_from_civil(year, month, day)))
    }

    /// Parse an ISO-8601 `YYYY-MM-DD` literal.
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('-').collect();
        let (year_str, month_str, day_str) = match parts.as_slice() {
            [y, m, d] => (*y, *m, *d),
            // A leading '-' on a BCE year splits into an empty first part.
            ["", y, m, d] => {
                let year: i64 = y
                    .parse::<i64>()
                    .map(|v| -v)
                    .map_err(|_| Error::InvalidDate(format!("invalid date literal: {text}")))?;
                let month: u32 = m
                    .parse()
                    .map_err(|_| Error::InvalidDate(format!("invalid date literal: {text}")))?;
                let day: u32 = d
                    .parse()
                    .map_err(|_| Error::InvalidDate(format!("invalid date literal: {text}")))?;
                return Date::from_ymd(year, month, day);
            }
            _ => return Err(Error::InvalidDate(format!("invalid date literal: {text}"))),
        };
        let year: i64 = year_str
            .parse()
            .map_err(|_| Error::InvalidDate(format!("invalid date literal: {text}")))?;
        let month: u32 = month_str
            .parse()
            .map_err(|_| Error::InvalidDate(format!("invalid date literal: {text}")))?;
        let day: u32 = day_str
            .parse()
            .map_err(|_| Error::InvalidDate(format!("invalid date literal: {text}")))?;
        Date::from_ymd(year, month, day)
    }

    /// Raw day count, relative to 1970-01-01.
    pub fn serial(&self) -> i64 {
        self.0
    }

    /// Construct a date directly from a day-count serial. Exposed for
    /// crate-internal window arithmetic; prefer [`Date::from_ymd`] or
    /// [`Date::parse`] from outside the `datex` workspace.
    pub fn from_serial(serial: i64) -> Self {
        Date(serial)
    }

    /// Proleptic-Gregorian year.
    pub fn year(&self) -> i64 {
        civil_from_days(self.0).0
    }

    /// Month, 1..=12.
    pub fn month(&self) -> u32 {
        civil_from_days(self.0).1
    }

    /// Day of month, 1..=31.
    pub fn day(&self) -> u32 {
        civil_from_days(self.0).2
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        // 1970-01-01 (serial 0) is a Thursday, index 3 in the Monday=0 scheme.
        let idx = (self.0 + 3).rem_euclid(7);
        Weekday::from_index(idx as u8).expect("rem_euclid(7) is always 0..=6")
    }

    /// `true` if this is the `MIN` or `MAX` open-window sentinel.
    pub fn is_sentinel(&self) -> bool {
        *self == Date::MIN || *self == Date::MAX
    }

    /// Add a whole number of days.
    pub fn add_days(self, n: i64) -> Self {
        Date(self.0 + n)
    }

    /// Last day of this date's month.
    pub fn end_of_month(&self) -> Self {
        let (y, m, _) = civil_from_days(self.0);
        Date::from_ymd(y, m, days_in_month(y, m)).expect("computed day is always in range")
    }

    /// `true` if this date is the last day of its month.
    pub fn is_end_of_month(&self) -> bool {
        *self == self.end_of_month()
    }

    /// First day of the month this date falls in.
    pub fn start_of_month(&self) -> Self {
        let (y, m, _) = civil_from_days(self.0);
        Date::from_ymd(y, m, 1).expect("day 1 is always valid")
    }

    /// First day of the year this date falls in.
    pub fn start_of_year(&self) -> Self {
        Date::from_ymd(self.year(), 1, 1).expect("Jan 1 is always valid")
    }

    /// Shift by whole calendar years, preserving month and clamping the day
    /// to the target month's length (e.g. Feb 29 - 1y clamps to Feb 28).
    pub fn add_years(self, n: i64) -> Self {
        let (y, m, d) = civil_from_days(self.0);
        let new_year = y + n;
        let clamped_day = d.min(days_in_month(new_year, m));
        Date::from_ymd(new_year, m, clamped_day).expect("clamped day is always valid")
    }

    /// Shift by whole calendar months, preserving day-of-month where
    /// possible and clamping to the target month's length otherwise.
    pub fn add_months(self, n: i64) -> Self {
        let (y, m, d) = civil_from_days(self.0);
        let total = y * 12 + (m as i64 - 1) + n;
        let new_year = total.div_euclid(12);
        let new_month = (total.rem_euclid(12) + 1) as u32;
        let clamped_day = d.min(days_in_month(new_year, new_month));
        Date::from_ymd(new_year, new_month, clamped_day).expect("clamped day is always valid")
    }
}

/// `true` if `year` is a leap year on the proleptic Gregorian calendar.
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `year`-`month`.
pub fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Convert a proleptic-Gregorian year/month/day into a day count relative to
/// 1970-01-01.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let year_of_era = y - era * 400;
    let month_index = if month > 2 { month - 3 } else { month + 9 } as i64;
    let day_of_year = (153 * month_index + 2) / 5 + day as i64 - 1;
    let day_of_era =
        year_of_era * 365 + year_of_era.div_euclid(4) - year_of_era.div_euclid(100) + day_of_year;
    era * 146_097 + day_of_era - EPOCH_OFFSET
}

/// Inverse of [`days_from_civil`]: recover year/month/day from a day count.
fn civil_from_days(serial: i64) -> (i64, u32, u32) {
    let z = serial + EPOCH_OFFSET;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let day_of_era = z - era * 146_097;
    let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096)
        / 365;
    let year = year_of_era + era * 400;
    let day_of_year =
        day_of_era - (365 * year_of_era + year_of_era.div_euclid(4) - year_of_era.div_euclid(100));
    let month_index = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * month_index + 2) / 5 + 1) as u32;
    let month = if month_index < 10 {
        month_index + 3
    } else {
        month_index - 9
    } as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Date::MIN {
            return write!(f, "-inf");
        }
        if *self == Date::MAX {
            return write!(f, "+inf");
        }
        let (y, m, d) = civil_from_days(self.0);
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

impl std::ops::Add<i64> for Date {
    type Output = Date;
    fn add(self, days: i64) -> Date {
        self.add_days(days)
    }
}

impl std::ops::Sub<i64> for Date {
    type Output = Date;
    fn sub(self, days: i64) -> Date {
        self.add_days(-days)
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i64;
    fn sub(self, other: Date) -> i64 {
        self.0 - other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_civil() {
        for (y, m, d) in [
            (1970, 1, 1),
            (2024, 2, 29),
            (1, 1, 1),
            (-1, 12, 31),
            (1900, 1, 1),
            (9999, 12, 31),
        ] {
            let date = Date::from_ymd(y, m, d).unwrap();
            assert_eq!((date.year(), date.month(), date.day()), (y, m, d));
        }
    }

    #[test]
    fn epoch_is_thursday() {
        assert_eq!(Date::from_ymd(1970, 1, 1).unwrap().weekday(), Weekday::Thursday);
    }

    #[test]
    fn known_weekday() {
        // 1998-01-01 was a Thursday; 1998-02-03 is 33 days later.
        assert_eq!(Date::from_ymd(1998, 2, 3).unwrap().weekday(), Weekday::Tuesday);
    }

    #[test]
    fn leap_day_clamps_on_year_add() {
        let feb29 = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(feb29.add_years(1), Date::from_ymd(2025, 2, 28).unwrap());
    }

    #[test]
    fn month_add_clamps_day() {
        let jan31 = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(jan31.add_months(1), Date::from_ymd(2024, 2, 29).unwrap());
    }

    #[test]
    fn display_is_iso() {
        assert_eq!(Date::from_ymd(2024, 1, 5).unwrap().to_string(), "2024-01-05");
    }

    #[test]
    fn parse_round_trips_display() {
        let d = Date::from_ymd(2024, 7, 4).unwrap();
        assert_eq!(Date::parse(&d.to_string()).unwrap(), d);
    }

    #[test]
    fn rejects_invalid_day() {
        assert!(Date::from_ymd(2023, 2, 29).is_err());
    }
}
