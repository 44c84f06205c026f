//! # datex-expr
//!
//! Composable, lazy date-expression trees: build an [`Expr`] with the
//! functions in [`builder`], evaluate it against a [`Window`] with
//! [`eval::evaluate`] or [`eval::collect`].
//!
//! A tree is built once and evaluated any number of times against
//! different windows; evaluation never mutates the tree. Every generator,
//! from a single leaf (`days()`) to a deeply nested combinator, produces
//! dates in non-decreasing order and fails fast (via `datex_core::errors::Error`)
//! on the first ill-formed operation it hits.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// The `Expr` tree and its structural properties.
pub mod expr;

/// The evaluator: `Expr` + `Window` -> lazy date stream.
pub mod eval;

/// Fluent construction of `Expr` trees.
pub mod builder;

/// `Window` — the evaluation bounds threaded through every node.
pub mod window;

pub use eval::{collect, evaluate, DateIter};
pub use expr::{Bound, Expr, SliceRange};
pub use window::Window;

pub use builder::{
    after, after_or_on, before, before_or_on, between, business_days, business_days_of, constant,
    date, days, diff, index, join, meet, months, roll_bwd, roll_fwd, seq, shift, slice,
    sub_sequence, weekdays, weekends, weeks, years,
};

/// Commonly used items, for a single glob import.
pub mod prelude {
    pub use crate::builder::*;
    pub use crate::eval::{collect, evaluate};
    pub use crate::expr::{Bound, Expr, SliceRange};
    pub use crate::window::Window;
    pub use datex_core::errors::{Error, Result};
    pub use datex_time::{Calendar, Date, HolidayCalendar, Tenor, Weekday, WeekendCalendar};
}
