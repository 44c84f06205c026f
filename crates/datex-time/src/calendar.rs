//! `Calendar` — business-day classification for tenor and expression
//! evaluation.
//!
//! Two concrete shapes cover the engine's needs: [`WeekendCalendar`] (only
//! a weekend-day set) and [`HolidayCalendar`] (a weekend-day set plus an
//! ordered holiday set). Both implement the [`Calendar`] trait, so
//! downstream code can hold either behind `&dyn Calendar` / `Arc<dyn
//! Calendar>`.

use std::collections::BTreeSet;
use std::fmt;

use crate::date::Date;
use crate::weekday::Weekday;

/// Business-day classification and business-day arithmetic.
///
/// The default implementations of [`Calendar::add_business_days`],
/// [`Calendar::roll_fwd`], and [`Calendar::roll_bwd`] are built entirely on
/// [`Calendar::is_business_day`], so a new calendar only needs to supply
/// `weekend_days` and (optionally) override `is_holiday`.
pub trait Calendar: fmt::Debug + Send + Sync {
    /// The set of weekdays this calendar treats as non-business days
    /// regardless of the holiday set.
    fn weekend_days(&self) -> &BTreeSet<Weekday>;

    /// `true` if `date` is a calendar holiday (not counting weekends).
    fn is_holiday(&self, date: Date) -> bool {
        let _ = date;
        false
    }

    /// `true` if `date`'s weekday is in [`Calendar::weekend_days`].
    fn is_weekend_day(&self, weekday: Weekday) -> bool {
        self.weekend_days().contains(&weekday)
    }

    /// `true` if `date` is neither a weekend day nor a holiday.
    fn is_business_day(&self, date: Date) -> bool {
        !self.is_weekend_day(date.weekday()) && !self.is_holiday(date)
    }

    /// Step `n` business days from `date`. The starting date never counts
    /// as one of the `n` steps: for `n == 0`, advances to the first
    /// business day at or after `date` (equivalent to [`roll_fwd`]). For
    /// `n != 0`, steps one calendar day at a time in the sign of `n`,
    /// counting a step only when it lands on a business day, until `n`
    /// business days have been counted.
    ///
    /// [`roll_fwd`]: Calendar::roll_fwd
    fn add_business_days(&self, date: Date, n: i64) -> Date {
        if n == 0 {
            return self.roll_fwd(date);
        }
        let step = if n > 0 { 1 } else { -1 };
        let mut remaining = n.abs();
        let mut d = date;
        while remaining > 0 {
            d = d.add_days(step);
            if self.is_business_day(d) {
                remaining -= 1;
            }
        }
        d
    }

    /// Step `n` business days backward from `date`.
    fn sub_business_days(&self, date: Date, n: i64) -> Date {
        self.add_business_days(date, -n)
    }

    /// The earliest business day at or after `date`.
    fn roll_fwd(&self, date: Date) -> Date {
        let mut d = date;
        while !self.is_business_day(d) {
            d = d.add_days(1);
        }
        d
    }

    /// The latest business day at or before `date`.
    fn roll_bwd(&self, date: Date) -> Date {
        let mut d = date;
        while !self.is_business_day(d) {
            d = d.add_days(-1);
        }
        d
    }
}

impl Calendar for &dyn Calendar {
    fn weekend_days(&self) -> &BTreeSet<Weekday> {
        (**self).weekend_days()
    }
    fn is_holiday(&self, date: Date) -> bool {
        (**self).is_holiday(date)
    }
}

/// A calendar with no holidays, only a weekend-day set. Defaults to
/// Saturday/Sunday.
#[derive(Debug, Clone)]
pub struct WeekendCalendar {
    weekend_days: BTreeSet<Weekday>,
}

impl WeekendCalendar {
    /// Construct with an explicit weekend-day set.
    pub fn new(weekend_days: impl IntoIterator<Item = Weekday>) -> Self {
        WeekendCalendar {
            weekend_days: weekend_days.into_iter().collect(),
        }
    }
}

impl Default for WeekendCalendar {
    fn default() -> Self {
        WeekendCalendar::new([Weekday::Saturday, Weekday::Sunday])
    }
}

impl Calendar for WeekendCalendar {
    fn weekend_days(&self) -> &BTreeSet<Weekday> {
        &self.weekend_days
    }
}

/// A calendar with a weekend-day set plus an ordered set of named holidays.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    weekend_days: BTreeSet<Weekday>,
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Construct from a weekend-day set and a holiday set.
    pub fn new(
        weekend_days: impl IntoIterator<Item = Weekday>,
        holidays: impl IntoIterator<Item = Date>,
    ) -> Self {
        let holidays: BTreeSet<Date> = holidays.into_iter().collect();
        log::debug!(
            "constructing HolidayCalendar with {} holiday(s)",
            holidays.len()
        );
        HolidayCalendar {
            weekend_days: weekend_days.into_iter().collect(),
            holidays,
        }
    }

    /// The underlying holiday set, in date order.
    pub fn holidays(&self) -> &BTreeSet<Date> {
        &self.holidays
    }
}

impl Calendar for HolidayCalendar {
    fn weekend_days(&self) -> &BTreeSet<Weekday> {
        &self.weekend_days
    }

    fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }
}

/// Anonymous Gregorian algorithm (Oudin's algorithm) for the date of
/// Easter Sunday in the Western (Gregorian) calendar.
pub fn easter_sunday(year: i64) -> Date {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd(year, month as u32, day as u32)
        .expect("Oudin's algorithm always yields a valid date")
}

/// Good Friday, two days before [`easter_sunday`].
pub fn good_friday(year: i64) -> Date {
    easter_sunday(year).add_days(-2)
}

/// Easter Monday, one day after [`easter_sunday`].
pub fn easter_monday(year: i64) -> Date {
    easter_sunday(year).add_days(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easter_known_dates() {
        assert_eq!(easter_sunday(2022), Date::from_ymd(2022, 4, 17).unwrap());
        assert_eq!(good_friday(2022), Date::from_ymd(2022, 4, 15).unwrap());
        assert_eq!(easter_monday(2022), Date::from_ymd(2022, 4, 18).unwrap());
        assert_eq!(easter_sunday(2024), Date::from_ymd(2024, 3, 31).unwrap());
    }

    #[test]
    fn weekend_calendar_default_is_sat_sun() {
        let cal = WeekendCalendar::default();
        assert!(cal.is_weekend_day(Weekday::Saturday));
        assert!(cal.is_weekend_day(Weekday::Sunday));
        assert!(!cal.is_weekend_day(Weekday::Monday));
    }

    #[test]
    fn add_business_days_from_quantlib_fixture() {
        let cal = WeekendCalendar::default();
        let d = Date::from_ymd(1998, 2, 3).unwrap(); // Tuesday
        assert_eq!(cal.add_business_days(d, 1), Date::from_ymd(1998, 2, 4).unwrap());
        assert_eq!(cal.add_business_days(d, 4), Date::from_ymd(1998, 2, 9).unwrap());
    }

    #[test]
    fn add_business_days_zero_rolls_forward() {
        let cal = WeekendCalendar::default();
        let saturday = Date::from_ymd(1998, 2, 7).unwrap();
        assert_eq!(cal.add_business_days(saturday, 0), Date::from_ymd(1998, 2, 9).unwrap());
    }

    #[test]
    fn holiday_calendar_skips_named_holidays() {
        let good_friday_2022 = good_friday(2022);
        let easter_monday_2022 = easter_monday(2022);
        let cal = HolidayCalendar::new(
            [Weekday::Saturday, Weekday::Sunday],
            [good_friday_2022, easter_monday_2022],
        );
        // Fri 2022-04-15 (Good Friday) is a holiday; Sat/Sun are weekend;
        // Mon 2022-04-18 (Easter Monday) is a holiday too.
        let thursday = Date::from_ymd(2022, 4, 14).unwrap();
        assert_eq!(cal.roll_fwd(thursday.add_days(1)), Date::from_ymd(2022, 4, 19).unwrap());
    }

    #[test]
    fn roll_bwd_finds_prior_business_day() {
        let cal = WeekendCalendar::default();
        let sunday = Date::from_ymd(2024, 1, 7).unwrap();
        assert_eq!(cal.roll_bwd(sunday), Date::from_ymd(2024, 1, 5).unwrap());
    }
}
