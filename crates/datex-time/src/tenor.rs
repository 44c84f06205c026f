//! `Tenor` — a composite signed calendar period (`2y3m1w4d`, `-5b`, ...).
//!
//! Unlike a single-unit `Period`, a `Tenor` can combine years, months,
//! weeks, and days in one shift, or stand alone as a business-day count.
//! The business-day unit never mixes with the other four: it always
//! requires a [`Calendar`](crate::calendar::Calendar) to resolve, while the
//! calendar units are applied directly to the proleptic Gregorian calendar.

use datex_core::errors::{ensure, Error, Result};
use std::fmt;

use crate::calendar::Calendar;
use crate::date::Date;

/// A signed composite period over years, months, weeks, days, and business
/// days.
///
/// At most one of the four calendar-unit fields combines with the others;
/// `business_days` never combines with any of them. Construct via
/// [`Tenor::parse`] or one of the single-unit helpers
/// ([`Tenor::years`], [`Tenor::months`], [`Tenor::weeks`], [`Tenor::days`],
/// [`Tenor::business_days`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tenor {
    negative: bool,
    years: u32,
    months: u32,
    weeks: u32,
    days: u32,
    business_days: u32,
}

impl Tenor {
    /// The zero tenor (`0d`), a no-op shift.
    pub const ZERO: Tenor = Tenor {
        negative: false,
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
        business_days: 0,
    };

    /// A tenor of `n` years (negative `n` produces a negative tenor).
    pub fn years(n: i64) -> Tenor {
        Tenor::single(n, |t, mag| t.years = mag)
    }

    /// A tenor of `n` months.
    pub fn months(n: i64) -> Tenor {
        Tenor::single(n, |t, mag| t.months = mag)
    }

    /// A tenor of `n` weeks.
    pub fn weeks(n: i64) -> Tenor {
        Tenor::single(n, |t, mag| t.weeks = mag)
    }

    /// A tenor of `n` days.
    pub fn days(n: i64) -> Tenor {
        Tenor::single(n, |t, mag| t.days = mag)
    }

    /// A tenor of `n` business days.
    pub fn business_days(n: i64) -> Tenor {
        Tenor::single(n, |t, mag| t.business_days = mag)
    }

    fn single(n: i64, set: impl FnOnce(&mut Tenor, u32)) -> Tenor {
        let mut t = Tenor::ZERO;
        t.negative = n < 0;
        set(&mut t, n.unsigned_abs() as u32);
        t
    }

    /// Parse a tenor literal: an optional leading `-`, followed by one or
    /// more `<digits><unit>` groups in strictly increasing unit order
    /// (`y` < `m` < `w` < `d` < `b`), each unit appearing at most once. `b`
    /// never combines with the other four units.
    pub fn parse(text: &str) -> Result<Tenor> {
        let mut chars = text.chars().peekable();
        let negative = if chars.peek() == Some(&'-') {
            chars.next();
            true
        } else {
            false
        };

        let mut t = Tenor::ZERO;
        t.negative = negative;
        let mut last_rank = 0u8;
        let mut saw_group = false;

        loop {
            let mut digits = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_digit() {
                    digits.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            ensure!(
                !digits.is_empty(),
                Error::TenorSyntax,
                "expected digits in tenor {text:?}"
            );
            let magnitude: u32 = digits
                .parse()
                .map_err(|_| Error::TenorSyntax(format!("tenor magnitude out of range: {text:?}")))?;

            let Some(unit) = chars.next() else {
                return Err(Error::TenorSyntax(format!(
                    "tenor {text:?} ends without a unit letter"
                )));
            };
            let rank = match unit {
                'y' => 1,
                'm' => 2,
                'w' => 3,
                'd' => 4,
                'b' => 5,
                other => {
                    return Err(Error::TenorSyntax(format!(
                        "unknown tenor unit {other:?} in {text:?}"
                    )))
                }
            };
            ensure!(
                rank > last_rank,
                Error::TenorSyntax,
                "tenor units out of order or repeated in {text:?}"
            );
            last_rank = rank;
            saw_group = true;
            match unit {
                'y' => t.years = magnitude,
                'm' => t.months = magnitude,
                'w' => t.weeks = magnitude,
                'd' => t.days = magnitude,
                'b' => t.business_days = magnitude,
                _ => unreachable!(),
            }

            if chars.peek().is_none() {
                break;
            }
        }
        ensure!(saw_group, Error::TenorSyntax, "empty tenor literal");
        ensure!(
            t.business_days == 0 || (t.years | t.months | t.weeks | t.days) == 0,
            Error::TenorConflict,
            "business-day tenor cannot combine with other units: {text:?}"
        );
        Ok(t)
    }

    /// `true` if every component is zero.
    pub fn is_zero(&self) -> bool {
        (self.years | self.months | self.weeks | self.days | self.business_days) == 0
    }

    /// `true` if this tenor shifts dates backward. The zero tenor is never
    /// negative regardless of how it was constructed.
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Years component magnitude (always non-negative; sign is carried
    /// separately by [`Tenor::is_negative`]).
    pub fn years_magnitude(&self) -> u32 {
        self.years
    }

    /// Months component magnitude.
    pub fn months_magnitude(&self) -> u32 {
        self.months
    }

    /// Weeks component magnitude.
    pub fn weeks_magnitude(&self) -> u32 {
        self.weeks
    }

    /// Days component magnitude.
    pub fn days_magnitude(&self) -> u32 {
        self.days
    }

    /// Business-days component magnitude.
    pub fn business_days_magnitude(&self) -> u32 {
        self.business_days
    }

    /// Flip the sign of every component uniformly. Negating the zero tenor
    /// is a no-op.
    pub fn negate(&self) -> Tenor {
        Tenor {
            negative: !self.negative,
            ..*self
        }
    }

    /// Canonical textual form: nonzero components only, in `y m w d b`
    /// order, or `"0d"` if every component is zero.
    pub fn format(&self) -> String {
        if self.is_zero() {
            return "0d".to_string();
        }
        let mut s = String::new();
        if self.negative {
            s.push('-');
        }
        if self.years > 0 {
            s.push_str(&format!("{}y", self.years));
        }
        if self.months > 0 {
            s.push_str(&format!("{}m", self.months));
        }
        if self.weeks > 0 {
            s.push_str(&format!("{}w", self.weeks));
        }
        if self.days > 0 {
            s.push_str(&format!("{}d", self.days));
        }
        if self.business_days > 0 {
            s.push_str(&format!("{}b", self.business_days));
        }
        s
    }

    /// Signed magnitude, applying [`Tenor::is_negative`].
    fn signed(&self, magnitude: u32) -> i64 {
        if self.is_negative() {
            -(magnitude as i64)
        } else {
            magnitude as i64
        }
    }

    /// Apply this tenor to `date`, shifting forward. Years and months are
    /// applied first (each independently, with month-end clamping), then
    /// weeks and days, then business days. Business days require a
    /// calendar; a nonzero business-day component without one fails with
    /// [`Error::NeedsCalendar`].
    pub fn add_to(&self, date: Date, calendar: Option<&dyn Calendar>) -> Result<Date> {
        let mut d = date;
        if self.years > 0 {
            d = d.add_years(self.signed(self.years));
        }
        if self.months > 0 {
            d = d.add_months(self.signed(self.months));
        }
        if self.weeks > 0 {
            d = d.add_days(self.signed(self.weeks) * 7);
        }
        if self.days > 0 {
            d = d.add_days(self.signed(self.days));
        }
        if self.business_days > 0 {
            let cal = calendar.ok_or_else(|| {
                Error::NeedsCalendar(format!(
                    "tenor {:?} needs a calendar for its business-day component",
                    self.format()
                ))
            })?;
            d = cal.add_business_days(d, self.signed(self.business_days));
        }
        Ok(d)
    }

    /// Apply this tenor to `date`, shifting backward. Equivalent to
    /// `self.negate().add_to(date, calendar)`.
    pub fn sub_from(&self, date: Date, calendar: Option<&dyn Calendar>) -> Result<Date> {
        self.negate().add_to(date, calendar)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

impl fmt::Debug for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tenor({})", self.format())
    }
}

impl std::ops::Neg for Tenor {
    type Output = Tenor;
    fn neg(self) -> Tenor {
        self.negate()
    }
}

impl std::str::FromStr for Tenor {
    type Err = Error;
    fn from_str(s: &str) -> Result<Tenor> {
        Tenor::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::WeekendCalendar;
    use proptest::prelude::*;

    #[test]
    fn parses_composite_tenor() {
        let t = Tenor::parse("2y3m1w6d").unwrap();
        assert_eq!(t.years_magnitude(), 2);
        assert_eq!(t.months_magnitude(), 3);
        assert_eq!(t.weeks_magnitude(), 1);
        assert_eq!(t.days_magnitude(), 6);
        assert!(!t.is_negative());
    }

    #[test]
    fn parses_negative_tenor() {
        let t = Tenor::parse("-5b").unwrap();
        assert!(t.is_negative());
        assert_eq!(t.business_days_magnitude(), 5);
    }

    #[test]
    fn rejects_out_of_order_units() {
        assert!(Tenor::parse("1m1y").is_err());
    }

    #[test]
    fn rejects_repeated_units() {
        assert!(Tenor::parse("1y2y").is_err());
    }

    #[test]
    fn rejects_business_day_mix() {
        assert!(Tenor::parse("2d3b").is_err());
    }

    #[test]
    fn formats_canonically_dropping_zero_groups() {
        let t = Tenor::parse("2y0m3d").unwrap();
        assert_eq!(t.format(), "2y3d");
    }

    #[test]
    fn zero_tenor_formats_positively() {
        assert_eq!(Tenor::ZERO.format(), "0d");
        assert_eq!(Tenor::ZERO.negate().format(), "0d");
    }

    #[test]
    fn parse_format_round_trips() {
        for text in ["1y", "2y3m1w6d", "-5b", "0d", "10d"] {
            let t = Tenor::parse(text).unwrap();
            assert_eq!(Tenor::parse(&t.format()).unwrap(), t);
        }
    }

    #[test]
    fn business_day_without_calendar_fails() {
        let t = Tenor::parse("2b").unwrap();
        let d = Date::from_ymd(2024, 1, 1).unwrap();
        assert!(matches!(t.add_to(d, None), Err(Error::NeedsCalendar(_))));
    }

    #[test]
    fn business_day_with_calendar_succeeds() {
        let t = Tenor::parse("2b").unwrap();
        let d = Date::from_ymd(2024, 1, 1).unwrap(); // Monday
        let cal = WeekendCalendar::default();
        let result = t.add_to(d, Some(&cal)).unwrap();
        assert_eq!(result, Date::from_ymd(2024, 1, 3).unwrap());
    }

    #[test]
    fn month_end_clamping_on_add() {
        let t = Tenor::parse("1m").unwrap();
        let d = Date::from_ymd(2024, 1, 31).unwrap();
        assert_eq!(t.add_to(d, None).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    }

    proptest! {
        #[test]
        fn parse_format_round_trips_for_any_composite_tenor(
            y in 0u32..50,
            m in 0u32..50,
            w in 0u32..50,
            d in 0u32..50,
            negative in any::<bool>(),
        ) {
            let mut text = String::new();
            if negative {
                text.push('-');
            }
            if y > 0 {
                text.push_str(&format!("{y}y"));
            }
            if m > 0 {
                text.push_str(&format!("{m}m"));
            }
            if w > 0 {
                text.push_str(&format!("{w}w"));
            }
            if d > 0 {
                text.push_str(&format!("{d}d"));
            }
            prop_assume!(y > 0 || m > 0 || w > 0 || d > 0);

            let t = Tenor::parse(&text).unwrap();
            prop_assert_eq!(Tenor::parse(&t.format()).unwrap(), t);
        }
    }
}
