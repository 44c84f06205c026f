//! # datex-core
//!
//! Error hierarchy and shared conventions for the `datex` date-expression
//! engine.
//!
//! This crate provides the foundational building block shared across the
//! other crates in the workspace: the `Error` enum and `Result` alias that
//! every fallible `datex-time` / `datex-expr` operation returns.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error hierarchy and `ensure!`/`fail!` convenience macros.
pub mod errors;
