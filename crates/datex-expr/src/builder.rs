//! Fluent construction of [`Expr`] trees.
//!
//! This is the only supported way to build an `Expr`: leaf functions
//! (`days`, `weeks`, `months`, `years`, ...), combinators (`join`, `meet`,
//! `diff`, `shift`, `after`, ...), and a handful of accessor-style
//! shortcuts mirroring the set operators and calendar idioms the original
//! date-generator library exposed.

use std::sync::Arc;

use datex_core::errors::Result;
use datex_time::{Calendar, Date, Tenor};

use crate::expr::{Bound, Expr, SliceRange};

/// Every date in the window.
pub fn days() -> Expr {
    Expr::Days
}

/// Every ISO week start (Monday) in the window.
pub fn weeks() -> Expr {
    Expr::Weeks
}

/// The first of every month in the window.
pub fn months() -> Expr {
    Expr::Months
}

/// January 1 of every year in the window.
pub fn years() -> Expr {
    Expr::Years
}

/// `g` filtered to non-weekend-calendar days.
pub fn weekdays(g: Expr) -> Expr {
    Expr::Weekdays(Box::new(g))
}

/// `g` filtered to weekend-calendar days.
pub fn weekends(g: Expr) -> Expr {
    Expr::Weekends(Box::new(g))
}

/// Every business day in the window (shorthand for `business_days_of(days())`).
pub fn business_days() -> Expr {
    business_days_of(days())
}

/// `g` filtered to business days.
pub fn business_days_of(g: Expr) -> Expr {
    Expr::BusinessDays(Box::new(g), None)
}

/// A single fixed date.
pub fn constant(d: Date) -> Expr {
    Expr::Const(d)
}

/// Parse an ISO-8601 `YYYY-MM-DD` literal into a `Const` expression. Date
/// literal conversion is eager: parsing happens here, at build time, not
/// each time the tree is evaluated.
pub fn date(text: &str) -> Result<Expr> {
    Ok(Expr::Const(Date::parse(text)?))
}

/// A fixed, explicitly enumerated set of dates.
pub fn seq(dates: impl IntoIterator<Item = Date>) -> Expr {
    let mut v: Vec<Date> = dates.into_iter().collect();
    v.sort();
    v.dedup();
    Expr::Seq(Arc::new(v))
}

/// The sorted, deduplicated union of `a` and `b`.
pub fn join(a: Expr, b: Expr) -> Expr {
    Expr::Join(Box::new(a), Box::new(b))
}

/// The sorted intersection of `a` and `b`.
pub fn meet(a: Expr, b: Expr) -> Expr {
    Expr::Meet(Box::new(a), Box::new(b))
}

/// The sorted set difference `a \ b`.
pub fn diff(a: Expr, b: Expr) -> Expr {
    Expr::Diff(Box::new(a), Box::new(b))
}

/// Shift `g` by tenor `t`, dispatching to `AddTenor` or `SubTenor` from the
/// sign of `t`.
pub fn shift(g: Expr, t: Tenor) -> Expr {
    if t.is_negative() {
        Expr::SubTenor(Box::new(g), t.negate())
    } else {
        Expr::AddTenor(Box::new(g), t)
    }
}

/// `g` restricted to dates strictly after `bound`.
pub fn after(g: Expr, bound: impl Into<Bound>) -> Expr {
    Expr::After(Box::new(g), bound.into())
}

/// `g` restricted to dates at or after `bound`.
pub fn after_or_on(g: Expr, bound: impl Into<Bound>) -> Expr {
    Expr::AfterOrOn(Box::new(g), bound.into())
}

/// `g` restricted to dates strictly before `bound`.
pub fn before(g: Expr, bound: impl Into<Bound>) -> Expr {
    Expr::Before(Box::new(g), bound.into())
}

/// `g` restricted to dates at or before `bound`.
pub fn before_or_on(g: Expr, bound: impl Into<Bound>) -> Expr {
    Expr::BeforeOrOn(Box::new(g), bound.into())
}

/// `g` restricted to `[lo, hi]`, replacing the chained-comparison idiom
/// (`lo <= g <= hi`) that Rust's `PartialOrd` cannot express for
/// tree-building operators.
pub fn between(g: Expr, lo: impl Into<Bound>, hi: impl Into<Bound>) -> Expr {
    after_or_on(before_or_on(g, hi), lo)
}

/// `g` restricted to the given index range (supporting negative indices
/// and strides, Python-`slice`-style).
pub fn slice(g: Expr, range: SliceRange) -> Expr {
    Expr::Slice(Box::new(g), range)
}

/// `g` restricted to a single (possibly negative) index.
pub fn index(g: Expr, i: isize) -> Expr {
    Expr::Slice(Box::new(g), SliceRange::index(i))
}

/// For each element of `outer` (which must have a cadence coarser than one
/// day), the elements of `inner` within that period.
pub fn sub_sequence(outer: Expr, inner: Expr) -> Expr {
    Expr::SubSequence(Box::new(outer), Box::new(inner), None)
}

/// The earliest business day at or after each element of `g`.
pub fn roll_fwd(g: Expr) -> Expr {
    Expr::RollFwd(Box::new(g), None)
}

/// The latest business day at or before each element of `g`.
pub fn roll_bwd(g: Expr) -> Expr {
    Expr::RollBwd(Box::new(g), None)
}

impl Expr {
    /// Attach an explicit calendar to a `BusinessDays`/`RollFwd`/`RollBwd`
    /// node, overriding the ambient window calendar for this node only.
    /// A no-op on any other node kind.
    pub fn over<C: Calendar + 'static>(self, calendar: C) -> Expr {
        let calendar: Arc<dyn Calendar> = Arc::new(calendar);
        match self {
            Expr::BusinessDays(g, _) => Expr::BusinessDays(g, Some(calendar)),
            Expr::RollFwd(g, _) => Expr::RollFwd(g, Some(calendar)),
            Expr::RollBwd(g, _) => Expr::RollBwd(g, Some(calendar)),
            other => other,
        }
    }

    /// `g` restricted to dates strictly after `bound`.
    pub fn after(self, bound: impl Into<Bound>) -> Expr {
        after(self, bound)
    }

    /// `g` restricted to dates at or after `bound`.
    pub fn after_or_on(self, bound: impl Into<Bound>) -> Expr {
        after_or_on(self, bound)
    }

    /// `g` restricted to dates strictly before `bound`.
    pub fn before(self, bound: impl Into<Bound>) -> Expr {
        before(self, bound)
    }

    /// `g` restricted to dates at or before `bound`.
    pub fn before_or_on(self, bound: impl Into<Bound>) -> Expr {
        before_or_on(self, bound)
    }

    /// `self` restricted to `[lo, hi]`.
    pub fn between(self, lo: impl Into<Bound>, hi: impl Into<Bound>) -> Expr {
        between(self, lo, hi)
    }

    /// `self` restricted to a single (possibly negative) index.
    pub fn index(self, i: isize) -> Expr {
        index(self, i)
    }

    /// `self` restricted to an index range.
    pub fn slice(self, range: SliceRange) -> Expr {
        slice(self, range)
    }

    /// Last day of each period in `self` (month or year), i.e. `shift(-1d)`
    /// of the next period's start.
    pub fn end(self) -> Expr {
        shift(self, Tenor::days(-1))
    }

    /// Sub-sequence shortcut: every day within each period of `self`.
    pub fn days(self) -> Expr {
        sub_sequence(self, days())
    }

    /// Sub-sequence shortcut: every week start within each period of `self`.
    pub fn weeks(self) -> Expr {
        sub_sequence(self, weeks())
    }

    /// Sub-sequence shortcut: every weekday within each period of `self`.
    pub fn weekdays(self) -> Expr {
        sub_sequence(self, weekdays(days()))
    }

    /// Sub-sequence shortcut: every weekend day within each period of `self`.
    pub fn weekends(self) -> Expr {
        sub_sequence(self, weekends(days()))
    }

    /// Sub-sequence shortcut (years only): every month start within each
    /// year of `self`.
    pub fn months(self) -> Expr {
        sub_sequence(self, months())
    }

    /// Restrict this node's `SubSequence` per-period slice, e.g.
    /// `years.weeks().sliced_per_period(SliceRange::index(-2))`.
    pub fn sliced_per_period(self, range: SliceRange) -> Expr {
        match self {
            Expr::SubSequence(o, i, _) => Expr::SubSequence(o, i, Some(range)),
            other => other,
        }
    }

    /// The earliest business day at or after each element of `self`.
    pub fn roll_fwd(self) -> Expr {
        roll_fwd(self)
    }

    /// The latest business day at or before each element of `self`.
    pub fn roll_bwd(self) -> Expr {
        roll_bwd(self)
    }

    /// Weekday accessor: the Monday of each week in `self` (a no-op shift).
    pub fn mon(self) -> Expr {
        weekday_shift(self, 0)
    }
    /// Weekday accessor: the Tuesday of each week in `self`.
    pub fn tue(self) -> Expr {
        weekday_shift(self, 1)
    }
    /// Weekday accessor: the Wednesday of each week in `self`.
    pub fn wed(self) -> Expr {
        weekday_shift(self, 2)
    }
    /// Weekday accessor: the Thursday of each week in `self`.
    pub fn thu(self) -> Expr {
        weekday_shift(self, 3)
    }
    /// Weekday accessor: the Friday of each week in `self`.
    pub fn fri(self) -> Expr {
        weekday_shift(self, 4)
    }
    /// Weekday accessor: the Saturday of each week in `self`.
    pub fn sat(self) -> Expr {
        weekday_shift(self, 5)
    }
    /// Weekday accessor: the Sunday of each week in `self`.
    pub fn sun(self) -> Expr {
        weekday_shift(self, 6)
    }

    /// Month-selector accessor: January of each year in `self` (a no-op
    /// shift).
    pub fn jan(self) -> Expr {
        month_shift(self, 0)
    }
    /// Month-selector accessor: February of each year in `self`.
    pub fn feb(self) -> Expr {
        month_shift(self, 1)
    }
    /// Month-selector accessor: March of each year in `self`.
    pub fn mar(self) -> Expr {
        month_shift(self, 2)
    }
    /// Month-selector accessor: April of each year in `self`.
    pub fn apr(self) -> Expr {
        month_shift(self, 3)
    }
    /// Month-selector accessor: May of each year in `self`.
    pub fn may(self) -> Expr {
        month_shift(self, 4)
    }
    /// Month-selector accessor: June of each year in `self`.
    pub fn jun(self) -> Expr {
        month_shift(self, 5)
    }
    /// Month-selector accessor: July of each year in `self`.
    pub fn jul(self) -> Expr {
        month_shift(self, 6)
    }
    /// Month-selector accessor: August of each year in `self`.
    pub fn aug(self) -> Expr {
        month_shift(self, 7)
    }
    /// Month-selector accessor: September of each year in `self`.
    pub fn sep(self) -> Expr {
        month_shift(self, 8)
    }
    /// Month-selector accessor: October of each year in `self`.
    pub fn oct(self) -> Expr {
        month_shift(self, 9)
    }
    /// Month-selector accessor: November of each year in `self`.
    pub fn nov(self) -> Expr {
        month_shift(self, 10)
    }
    /// Month-selector accessor: December of each year in `self`.
    pub fn dec(self) -> Expr {
        month_shift(self, 11)
    }
}

fn weekday_shift(g: Expr, offset: i64) -> Expr {
    if offset == 0 {
        g
    } else {
        shift(g, Tenor::days(offset))
    }
}

fn month_shift(g: Expr, offset: i64) -> Expr {
    if offset == 0 {
        g
    } else {
        shift(g, Tenor::months(offset))
    }
}

impl std::ops::BitOr for Expr {
    type Output = Expr;
    fn bitor(self, rhs: Expr) -> Expr {
        join(self, rhs)
    }
}

impl std::ops::BitAnd for Expr {
    type Output = Expr;
    fn bitand(self, rhs: Expr) -> Expr {
        meet(self, rhs)
    }
}

impl std::ops::Sub<Expr> for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        diff(self, rhs)
    }
}

impl std::ops::Add<Tenor> for Expr {
    type Output = Expr;
    fn add(self, rhs: Tenor) -> Expr {
        shift(self, rhs)
    }
}

impl std::ops::Sub<Tenor> for Expr {
    type Output = Expr;
    fn sub(self, rhs: Tenor) -> Expr {
        shift(self, rhs.negate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::collect;
    use crate::window::Window;
    use datex_time::WeekendCalendar;

    fn window(start: &str, end: &str) -> Window {
        Window {
            start: Date::parse(start).unwrap(),
            end: Date::parse(end).unwrap(),
            after: Date::MIN,
            before: Date::MAX,
            calendar: Arc::new(WeekendCalendar::default()),
        }
    }

    #[test]
    fn join_dedups_and_sorts() {
        let w = window("2024-01-01", "2024-01-10");
        let a = date("2024-01-03").unwrap();
        let b = date("2024-01-03").unwrap() | date("2024-01-05").unwrap();
        let got = collect(&join(a, b), &w).unwrap();
        assert_eq!(got, vec![Date::parse("2024-01-03").unwrap(), Date::parse("2024-01-05").unwrap()]);
    }

    #[test]
    fn meet_intersects() {
        let w = window("2024-01-01", "2024-01-31");
        let a = weekdays(days());
        let b = weeks();
        let got = collect(&(a & b), &w).unwrap();
        assert_eq!(got, vec![Date::parse("2024-01-01").unwrap(), Date::parse("2024-01-08").unwrap(), Date::parse("2024-01-15").unwrap(), Date::parse("2024-01-22").unwrap(), Date::parse("2024-01-29").unwrap()]);
    }

    #[test]
    fn diff_removes_matching_dates() {
        let w = window("2024-01-01", "2024-01-10");
        let a = days();
        let b = date("2024-01-05").unwrap();
        let got = collect(&(a - b), &w).unwrap();
        assert!(!got.contains(&Date::parse("2024-01-05").unwrap()));
        assert_eq!(got.len(), 9);
    }

    #[test]
    fn april_month_selector_shifts_years() {
        let w = window("2020-01-01", "2024-12-31");
        let got = collect(&years().apr(), &w).unwrap();
        assert!(got.iter().all(|d| d.month() == 4 && d.day() == 1));
    }

    #[test]
    fn between_matches_after_or_on_before_or_on() {
        let w = window("2024-01-01", "2024-01-31");
        let lo = Date::parse("2024-01-10").unwrap();
        let hi = Date::parse("2024-01-20").unwrap();
        let got = collect(&between(days(), lo, hi), &w).unwrap();
        assert_eq!(got.first().unwrap(), &lo);
        assert_eq!(got.last().unwrap(), &hi);
    }
}
