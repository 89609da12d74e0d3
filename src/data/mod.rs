//! Synthetic problem generation.

pub mod synthetic;

pub use synthetic::*;
