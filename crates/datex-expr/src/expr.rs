//! `Expr` — the closed tagged union every date-generating expression
//! compiles down to, plus its structural properties (`cadence`).
//!
//! A single evaluator (`crate::eval`) pattern-matches on this tree; there
//! is no per-node virtual dispatch. Builder functions in `crate::builder`
//! are the only supported way to construct one.

use std::fmt;
use std::sync::Arc;

use datex_time::{Calendar, Date, Tenor};

/// The right-hand side of a comparison combinator (`After`, `Before`, ...):
/// either a concrete date or a generator whose first produced date is used.
#[derive(Clone)]
pub enum Bound {
    /// A concrete, already-resolved date.
    Date(Date),
    /// A generator expression; only its first evaluated date is used.
    Expr(Box<Expr>),
}

impl fmt::Debug for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Date(d) => write!(f, "Bound::Date({d:?})"),
            Bound::Expr(e) => write!(f, "Bound::Expr({e:?})"),
        }
    }
}

impl PartialEq for Bound {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Bound::Date(a), Bound::Date(b)) => a == b,
            (Bound::Expr(a), Bound::Expr(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Date> for Bound {
    fn from(d: Date) -> Self {
        Bound::Date(d)
    }
}

impl From<Expr> for Bound {
    fn from(e: Expr) -> Self {
        Bound::Expr(Box::new(e))
    }
}

/// A Python-`slice`-like index range: `start`/`stop` are optional and may be
/// negative (counted from the end); `step` may be negative (reverses
/// direction). Negative values require the sliced sequence to be provably
/// finite within its window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SliceRange {
    /// Inclusive start index, Python-slice style.
    pub start: Option<isize>,
    /// Exclusive stop index, Python-slice style.
    pub stop: Option<isize>,
    /// Step; must be nonzero.
    pub step: isize,
}

impl SliceRange {
    /// The range selecting a single element at (possibly negative) index
    /// `i`.
    pub fn index(i: isize) -> SliceRange {
        let stop = if i >= 0 {
            Some(i + 1)
        } else if i + 1 == 0 {
            None
        } else {
            Some(i + 1)
        };
        SliceRange {
            start: Some(i),
            stop,
            step: 1,
        }
    }

    /// `true` if any component requires the child sequence to be fully
    /// materialized to resolve (a negative start, stop, or step).
    pub fn needs_full_materialization(&self) -> bool {
        self.start.is_some_and(|s| s < 0) || self.stop.is_some_and(|s| s < 0) || self.step < 0
    }
}

/// A closed tagged union of every date-generating expression shape the
/// engine supports.
///
/// `Calendar`-bearing variants hold an `Arc<dyn Calendar>` rather than a
/// plain value since calendars are shared, potentially large (holiday
/// sets), and compared only by identity (see the `PartialEq` impl below).
#[derive(Clone)]
pub enum Expr {
    /// A single fixed date.
    Const(Date),
    /// A fixed, explicitly enumerated set of dates (sorted, deduplicated at
    /// construction).
    Seq(Arc<Vec<Date>>),
    /// Every date in the window.
    Days,
    /// Every Monday (ISO week start) in the window.
    Weeks,
    /// The first of every month in the window.
    Months,
    /// January 1 of every year in the window.
    Years,
    /// `g` filtered to non-weekend-calendar days.
    Weekdays(Box<Expr>),
    /// `g` filtered to weekend-calendar days.
    Weekends(Box<Expr>),
    /// `g` filtered to business days, against an explicit calendar if one
    /// was attached via `.over`, else the ambient window calendar.
    BusinessDays(Box<Expr>, Option<Arc<dyn Calendar>>),
    /// `g` shifted forward by a tenor.
    AddTenor(Box<Expr>, Tenor),
    /// `g` shifted backward by a tenor.
    SubTenor(Box<Expr>, Tenor),
    /// `g` restricted to dates strictly after `bound`.
    After(Box<Expr>, Bound),
    /// `g` restricted to dates at or after `bound`.
    AfterOrOn(Box<Expr>, Bound),
    /// `g` restricted to dates strictly before `bound`.
    Before(Box<Expr>, Bound),
    /// `g` restricted to dates at or before `bound`.
    BeforeOrOn(Box<Expr>, Bound),
    /// The sorted, deduplicated union of `a` and `b`.
    Join(Box<Expr>, Box<Expr>),
    /// The sorted intersection of `a` and `b`.
    Meet(Box<Expr>, Box<Expr>),
    /// The sorted set difference `a \ b`.
    Diff(Box<Expr>, Box<Expr>),
    /// `g` restricted to the given (possibly negative, possibly strided)
    /// index range.
    Slice(Box<Expr>, SliceRange),
    /// For each element `x` of `outer` (whose cadence defines the period
    /// boundary `y`), the elements of `inner` within `[x, y)`, optionally
    /// sliced per period.
    SubSequence(Box<Expr>, Box<Expr>, Option<SliceRange>),
    /// `g` rolled forward to a business day, against an explicit calendar
    /// if attached via `.over`, else the ambient window calendar.
    RollFwd(Box<Expr>, Option<Arc<dyn Calendar>>),
    /// `g` rolled backward to a business day.
    RollBwd(Box<Expr>, Option<Arc<dyn Calendar>>),
}

impl Expr {
    /// The natural step between consecutive elements, if this expression
    /// has one. Leaves Days/Weeks/Months/Years define a cadence; most
    /// combinators pass their child's cadence through; set operations
    /// (`Join`/`Meet`/`Diff`), `SubSequence`, `Const`, and `Seq` have none.
    pub fn cadence(&self) -> Option<Tenor> {
        match self {
            Expr::Days => Some(Tenor::days(1)),
            Expr::Weeks => Some(Tenor::weeks(1)),
            Expr::Months => Some(Tenor::months(1)),
            Expr::Years => Some(Tenor::years(1)),
            Expr::Weekdays(g) | Expr::Weekends(g) => g.cadence(),
            Expr::BusinessDays(g, _) => g.cadence(),
            Expr::AddTenor(g, _) | Expr::SubTenor(g, _) => g.cadence(),
            Expr::After(g, _) | Expr::AfterOrOn(g, _) | Expr::Before(g, _) | Expr::BeforeOrOn(g, _) => {
                g.cadence()
            }
            Expr::Slice(g, _) => g.cadence(),
            Expr::RollFwd(g, _) | Expr::RollBwd(g, _) => g.cadence(),
            Expr::Const(_) | Expr::Seq(_) | Expr::Join(_, _) | Expr::Meet(_, _) | Expr::Diff(_, _) => None,
            Expr::SubSequence(_, _, _) => None,
        }
    }

    /// `true` if [`Expr::cadence`] is strictly coarser than a single day,
    /// the requirement for serving as a `SubSequence` outer generator.
    pub fn has_subsequence_cadence(&self) -> bool {
        match self.cadence() {
            None => false,
            Some(t) => {
                t.business_days_magnitude() == 0
                    && (t.years_magnitude() > 0 || t.months_magnitude() > 0 || t.weeks_magnitude() > 0 || t.days_magnitude() >= 2)
            }
        }
    }
}

fn calendar_eq(a: &Option<Arc<dyn Calendar>>, b: &Option<Arc<dyn Calendar>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => Arc::ptr_eq(x, y),
        _ => false,
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Const(a), Expr::Const(b)) => a == b,
            (Expr::Seq(a), Expr::Seq(b)) => a == b,
            (Expr::Days, Expr::Days) => true,
            (Expr::Weeks, Expr::Weeks) => true,
            (Expr::Months, Expr::Months) => true,
            (Expr::Years, Expr::Years) => true,
            (Expr::Weekdays(a), Expr::Weekdays(b)) => a == b,
            (Expr::Weekends(a), Expr::Weekends(b)) => a == b,
            (Expr::BusinessDays(a, ca), Expr::BusinessDays(b, cb)) => a == b && calendar_eq(ca, cb),
            (Expr::AddTenor(a, ta), Expr::AddTenor(b, tb)) => a == b && ta == tb,
            (Expr::SubTenor(a, ta), Expr::SubTenor(b, tb)) => a == b && ta == tb,
            (Expr::After(a, da), Expr::After(b, db)) => a == b && da == db,
            (Expr::AfterOrOn(a, da), Expr::AfterOrOn(b, db)) => a == b && da == db,
            (Expr::Before(a, da), Expr::Before(b, db)) => a == b && da == db,
            (Expr::BeforeOrOn(a, da), Expr::BeforeOrOn(b, db)) => a == b && da == db,
            (Expr::Join(a1, a2), Expr::Join(b1, b2)) => a1 == b1 && a2 == b2,
            (Expr::Meet(a1, a2), Expr::Meet(b1, b2)) => a1 == b1 && a2 == b2,
            (Expr::Diff(a1, a2), Expr::Diff(b1, b2)) => a1 == b1 && a2 == b2,
            (Expr::Slice(a, ra), Expr::Slice(b, rb)) => a == b && ra == rb,
            (Expr::SubSequence(o1, i1, s1), Expr::SubSequence(o2, i2, s2)) => o1 == o2 && i1 == i2 && s1 == s2,
            (Expr::RollFwd(a, ca), Expr::RollFwd(b, cb)) => a == b && calendar_eq(ca, cb),
            (Expr::RollBwd(a, ca), Expr::RollBwd(b, cb)) => a == b && calendar_eq(ca, cb),
            _ => false,
        }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(d) => write!(f, "Const({d:?})"),
            Expr::Seq(v) => write!(f, "Seq({} dates)", v.len()),
            Expr::Days => write!(f, "Days"),
            Expr::Weeks => write!(f, "Weeks"),
            Expr::Months => write!(f, "Months"),
            Expr::Years => write!(f, "Years"),
            Expr::Weekdays(g) => write!(f, "Weekdays({g:?})"),
            Expr::Weekends(g) => write!(f, "Weekends({g:?})"),
            Expr::BusinessDays(g, c) => write!(f, "BusinessDays({g:?}, has_calendar={})", c.is_some()),
            Expr::AddTenor(g, t) => write!(f, "AddTenor({g:?}, {t})"),
            Expr::SubTenor(g, t) => write!(f, "SubTenor({g:?}, {t})"),
            Expr::After(g, d) => write!(f, "After({g:?}, {d:?})"),
            Expr::AfterOrOn(g, d) => write!(f, "AfterOrOn({g:?}, {d:?})"),
            Expr::Before(g, d) => write!(f, "Before({g:?}, {d:?})"),
            Expr::BeforeOrOn(g, d) => write!(f, "BeforeOrOn({g:?}, {d:?})"),
            Expr::Join(a, b) => write!(f, "Join({a:?}, {b:?})"),
            Expr::Meet(a, b) => write!(f, "Meet({a:?}, {b:?})"),
            Expr::Diff(a, b) => write!(f, "Diff({a:?}, {b:?})"),
            Expr::Slice(g, r) => write!(f, "Slice({g:?}, {r:?})"),
            Expr::SubSequence(o, i, s) => write!(f, "SubSequence({o:?}, {i:?}, {s:?})"),
            Expr::RollFwd(g, c) => write!(f, "RollFwd({g:?}, has_calendar={})", c.is_some()),
            Expr::RollBwd(g, c) => write!(f, "RollBwd({g:?}, has_calendar={})", c.is_some()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_cadences() {
        assert_eq!(Expr::Days.cadence(), Some(Tenor::days(1)));
        assert_eq!(Expr::Weeks.cadence(), Some(Tenor::weeks(1)));
        assert_eq!(Expr::Months.cadence(), Some(Tenor::months(1)));
        assert_eq!(Expr::Years.cadence(), Some(Tenor::years(1)));
    }

    #[test]
    fn days_is_not_subsequence_eligible() {
        assert!(!Expr::Days.has_subsequence_cadence());
        assert!(Expr::Weeks.has_subsequence_cadence());
        assert!(Expr::Months.has_subsequence_cadence());
        assert!(Expr::Years.has_subsequence_cadence());
    }

    #[test]
    fn set_ops_have_no_cadence() {
        assert_eq!(Expr::Join(Box::new(Expr::Days), Box::new(Expr::Weeks)).cadence(), None);
    }
}
