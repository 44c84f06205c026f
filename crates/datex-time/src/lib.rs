//! # datex-time
//!
//! Date, tenor, and calendar primitives for the `datex` date-expression
//! engine.
//!
//! This crate has no notion of expression trees or lazy sequences; it is
//! the concrete-value layer `datex-expr` builds its evaluator on top of.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Calendar` trait and built-in implementations.
pub mod calendar;

/// `Date` type.
pub mod date;

/// `Tenor` — a composite signed calendar period.
pub mod tenor;

/// `Weekday` — day of the week.
pub mod weekday;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calendar::{easter_monday, easter_sunday, good_friday, Calendar, HolidayCalendar, WeekendCalendar};
pub use date::{days_in_month, is_leap_year, Date};
pub use tenor::Tenor;
pub use weekday::Weekday;
