//! Input/output helpers.
//!
//! - problem JSON read (single and batch) (`problem`)
//! - result JSON write (`result`)

pub mod problem;
pub mod result;

pub use problem::*;
pub use result::*;
