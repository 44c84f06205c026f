//! # datex
//!
//! A composable date-expression engine: build lazy, holiday-aware calendar
//! generators out of small combinators (`days() & weeks()`, `years().apr()`,
//! `business_days().over(cal)`, ...) and evaluate them against a bounded
//! window.
//!
//! This crate is a **façade** that re-exports the underlying workspace
//! crates. Application code should depend on this crate rather than on
//! `datex-core`/`datex-time`/`datex-expr` directly.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! datex = "0.1"
//! ```
//!
//! ```rust
//! use datex::prelude::*;
//!
//! let w = Window {
//!     start: Date::from_ymd(2024, 1, 1).unwrap(),
//!     end: Date::from_ymd(2024, 1, 31).unwrap(),
//!     ..Window::default()
//! };
//! let business_days_in_january = collect(&business_days(), &w).unwrap();
//! assert_eq!(business_days_in_january.len(), 23);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error hierarchy and shared conventions.
pub use datex_core as core;

/// Date, tenor, and calendar primitives.
pub use datex_time as time;

/// Expression trees, the evaluator, and the fluent builder API.
pub use datex_expr as expr;

/// Commonly used items, for a single glob import.
pub mod prelude {
    pub use datex_expr::prelude::*;
}
