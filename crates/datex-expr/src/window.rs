//! `Window` — the evaluation bounds threaded through every node.
//!
//! A window carries two independent clamps: `start`/`end` (the user-facing
//! bound set once via [`crate::eval::evaluate`]) and `after`/`before` (the
//! bound combinators like `AddTenor` or `SubSequence` propagate downward to
//! their children). Both pairs default to the open-window sentinels
//! [`Date::MIN`]/[`Date::MAX`]; a node's effective lower/upper bound is the
//! tighter of each pair.

use std::sync::Arc;

use datex_time::{Calendar, Date, WeekendCalendar};

/// Evaluation bounds and calendar passed down an expression tree.
#[derive(Clone)]
pub struct Window {
    /// User-facing lower bound, set once at the top of `evaluate`.
    pub start: Date,
    /// User-facing upper bound.
    pub end: Date,
    /// Combinator-propagated lower bound.
    pub after: Date,
    /// Combinator-propagated upper bound.
    pub before: Date,
    /// Calendar in effect for this subtree.
    pub calendar: Arc<dyn Calendar>,
}

impl Window {
    /// The effective lower bound: the later of `start` and `after`.
    pub fn lower(&self) -> Date {
        self.start.max(self.after)
    }

    /// The effective upper bound: the earlier of `end` and `before`.
    pub fn upper(&self) -> Date {
        self.end.min(self.before)
    }

    /// `true` if neither side of the window has a real bound.
    pub fn is_unbounded(&self) -> bool {
        self.lower() == Date::MIN && self.upper() == Date::MAX
    }

    /// Return a copy with `after`/`before` replaced, leaving `start`/`end`
    /// and the calendar untouched. Used by combinators that widen the
    /// window passed down to a child.
    pub fn with_propagated(&self, after: Date, before: Date) -> Window {
        Window {
            after,
            before,
            ..self.clone()
        }
    }

    /// Return a copy restricted to exactly `[lo, hi]` on both bound pairs.
    /// Used by `SubSequence` to hand each child a fresh, tightly-scoped
    /// window.
    pub fn restricted_to(&self, lo: Date, hi: Date) -> Window {
        Window {
            start: lo,
            end: hi,
            after: lo,
            before: hi,
            calendar: self.calendar.clone(),
        }
    }

    /// Return a copy with the calendar overridden, used by `.over(cal)`.
    pub fn with_calendar(&self, calendar: Arc<dyn Calendar>) -> Window {
        Window {
            calendar,
            ..self.clone()
        }
    }
}

impl Default for Window {
    fn default() -> Self {
        Window {
            start: Date::MIN,
            end: Date::MAX,
            after: Date::MIN,
            before: Date::MAX,
            calendar: Arc::new(WeekendCalendar::default()),
        }
    }
}
