//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - solver configuration (`InversionConfig`)
//! - in-memory problems and solve outputs (`InversionProblem`, `InversionOutcome`)
//! - serializable file schemas (`ProblemFile`, `ResultFile`)

pub mod types;

pub use types::*;
