//! Error types for the `datex` date-expression engine.
//!
//! A single `thiserror`-derived enum covers every failure mode named in the
//! engine's error-handling design: tenor parsing/arithmetic, window bounds,
//! slicing, sub-sequencing, and comparison misuse. `ensure!`/`fail!` mirror
//! the precondition/fail-fast idiom used throughout the rest of the
//! workspace.

use thiserror::Error;

/// The error type returned by every fallible operation in `datex-time` and
/// `datex-expr`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// A tenor literal did not match the `-?([0-9]+[ymwdb])+` grammar, used
    /// an out-of-order unit, or repeated a unit.
    #[error("invalid tenor syntax: {0}")]
    TenorSyntax(String),

    /// A tenor mixed the business-day unit `b` with any other unit.
    #[error("business-day tenor cannot combine with other units: {0}")]
    TenorConflict(String),

    /// Business-day arithmetic (a `b` component, `BusinessDays`, `RollFwd`,
    /// `RollBwd`, or `add_business_days`/`sub_business_days`) was requested
    /// without a calendar.
    #[error("operation requires a calendar: {0}")]
    NeedsCalendar(String),

    /// An infinite leaf generator (`Days`/`Weeks`/`Months`/`Years`) was
    /// evaluated with no upper or lower bound on either side of the window.
    #[error("unbounded window: {0} has neither a start/after nor an end/before bound")]
    UnboundedWindow(String),

    /// A negative-index slice was requested against a child sequence that
    /// cannot be proven finite within the window.
    #[error("negative slice index requires a finite child sequence: {0}")]
    NegativeIndexUnbounded(String),

    /// A `SubSequence` was built on an outer generator with no cadence, or
    /// whose cadence did not advance past the previous outer element.
    #[error("illegal sub-sequence: {0}")]
    IllegalSubsequence(String),

    /// A chained comparison (`lo <= g <= hi`) was attempted where `g` is a
    /// multi-date generator being compared to another multi-date generator.
    #[error("cannot compare two stream generators: {0}")]
    ComparisonOnStream(String),

    /// A calendar date triple (year, month, day) does not denote a valid
    /// proleptic-Gregorian date, or a date literal failed to parse.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// Defensive: an expression tree node was encountered that the
    /// evaluator has no case for. Should be unreachable for any tree built
    /// through the public builder API.
    #[error("unknown node type: {0}")]
    UnknownNodeType(String),
}

/// Shorthand `Result` type used throughout the `datex` workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err($variant(format!($msg)))` if `$cond` is false.
///
/// # Example
/// ```
/// use datex_core::{ensure, errors::Error};
/// fn positive(x: i32) -> datex_core::errors::Result<i32> {
///     ensure!(x > 0, Error::InvalidDate, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1).is_ok());
/// assert!(positive(-1).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:path, $($msg:tt)*) => {
        if !$cond {
            return Err($variant(format!($($msg)*)));
        }
    };
}

/// Return `Err($variant(format!($msg)))` immediately.
///
/// # Example
/// ```
/// use datex_core::{fail, errors::Error};
/// fn always_err() -> datex_core::errors::Result<()> {
///     fail!(Error::UnknownNodeType, "unreachable node");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($variant:path, $($msg:tt)*) => {
        return Err($variant(format!($($msg)*)))
    };
}
