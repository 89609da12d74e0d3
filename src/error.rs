use std::fmt;

use crate::lp::LpError;

/// Application-level error carrying a process exit code.
///
/// Exit code convention:
/// - `2`: usage, configuration, or file I/O problems
/// - `3`: invalid input data (shapes, weights, non-finite values)
/// - `4`: numerical failure (singular system, LP failure)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Failure modes of an L1 inversion.
///
/// Input validation errors are detected before any matrix is assembled.
/// None of these are retried: the computation is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub enum InversionError {
    /// Shapes of `G`, `d` (or a problem file's rows) are incompatible or empty.
    DimensionMismatch(String),
    /// `sd` has the wrong length or a non-positive entry.
    InvalidWeight(String),
    /// `G` or `d` contains NaN or an infinity.
    NonFiniteInput(String),
    /// The least-squares fit used for the model bound is undefined.
    SingularSystem(String),
    /// Solver settings are unusable (e.g. a non-positive bound multiplier).
    InvalidConfig(String),
    /// The assembled LP has no feasible point.
    LpInfeasible,
    /// The assembled LP is unbounded.
    LpUnbounded,
    /// The LP back-end failed for another reason.
    LpFailed(String),
}

impl InversionError {
    /// Exit code used when this error terminates the CLI.
    pub fn exit_code(&self) -> u8 {
        match self {
            InversionError::DimensionMismatch(_)
            | InversionError::InvalidWeight(_)
            | InversionError::NonFiniteInput(_) => 3,
            InversionError::InvalidConfig(_) => 2,
            InversionError::SingularSystem(_)
            | InversionError::LpInfeasible
            | InversionError::LpUnbounded
            | InversionError::LpFailed(_) => 4,
        }
    }
}

impl fmt::Display for InversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InversionError::DimensionMismatch(msg) => write!(f, "Dimension mismatch: {msg}"),
            InversionError::InvalidWeight(msg) => write!(f, "Invalid weight: {msg}"),
            InversionError::NonFiniteInput(msg) => write!(f, "Non-finite input: {msg}"),
            InversionError::SingularSystem(msg) => write!(f, "Singular system: {msg}"),
            InversionError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
            InversionError::LpInfeasible => {
                write!(f, "LP reported infeasible (the formulation is always feasible; this is a construction bug)")
            }
            InversionError::LpUnbounded => {
                write!(f, "LP reported unbounded despite the explicit model bound")
            }
            InversionError::LpFailed(msg) => write!(f, "LP solver failed: {msg}"),
        }
    }
}

impl std::error::Error for InversionError {}

impl From<LpError> for InversionError {
    fn from(value: LpError) -> Self {
        match value {
            LpError::Infeasible => InversionError::LpInfeasible,
            LpError::Unbounded => InversionError::LpUnbounded,
            LpError::Failed(msg) => InversionError::LpFailed(msg),
        }
    }
}

impl From<InversionError> for AppError {
    fn from(value: InversionError) -> Self {
        AppError::new(value.exit_code(), value.to_string())
    }
}
