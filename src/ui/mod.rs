//! ui
//!
//! User-facing output for the `fmeta` binary.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! Diagnostics go through the `log` facade; this module is only for what
//! the user asked to see.

pub mod output;
