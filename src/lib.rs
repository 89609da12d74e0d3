//! `l1-inversion` library crate.
//!
//! Estimates `m` in an over-determined system `d = G·m` under an L1
//! (least-absolute-deviation) misfit by recasting the problem as a linear
//! program. The binary (`l1inv`) is a thin wrapper around this library.
//!
//! ```no_run
//! use nalgebra::{DMatrix, DVector};
//!
//! let g = DMatrix::from_element(3, 1, 1.0);
//! let d = DVector::from_row_slice(&[1.0, 1.0, 100.0]);
//! let m = l1_inversion::inversion::solve(&g, &d, None).unwrap();
//! assert!((m[0] - 1.0).abs() < 1e-6);
//! ```

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod inversion;
pub mod io;
pub mod lp;
pub mod math;
pub mod report;

pub use error::{AppError, InversionError};
pub use inversion::{L1InversionSolver, solve};
