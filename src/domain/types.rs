//! Shared domain types.
//!
//! In-memory types hold `nalgebra` matrices and vectors; the file schemas hold
//! plain nested `Vec`s so JSON stays readable and hand-editable.

use chrono::{DateTime, Utc};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, InversionError};

/// Default multiplier applied to `max|m_ls|` to size the model box.
pub const DEFAULT_BOUND_MULTIPLIER: f64 = 10.0;

/// Environment variable overriding [`InversionConfig::bound_multiplier`].
pub const ENV_BOUND_MULTIPLIER: &str = "L1INV_BOUND_MULTIPLIER";

/// Solver settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InversionConfig {
    /// Each component of `m` is confined to `[-bound, bound]` with
    /// `bound = bound_multiplier * max|m_ls|`.
    ///
    /// This is a heuristic that keeps the LP bounded. If the true L1 optimum
    /// lies outside the box it will not be found; raise the multiplier then.
    /// When `d` is orthogonal to the range of `G` the least-squares fit is
    /// zero, the box collapses to `m = 0` for every multiplier, and the
    /// returned model is only the optimum over that point.
    pub bound_multiplier: f64,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            bound_multiplier: DEFAULT_BOUND_MULTIPLIER,
        }
    }
}

impl InversionConfig {
    /// Load settings from the environment (and `.env` if present).
    ///
    /// Unset variables fall back to defaults; set-but-unparseable ones are errors.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(ENV_BOUND_MULTIPLIER) {
            config.bound_multiplier = parse_multiplier(&raw).map_err(|e| AppError::new(2, e))?;
        }
        config.validate().map_err(AppError::from)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InversionError> {
        if !(self.bound_multiplier.is_finite() && self.bound_multiplier > 0.0) {
            return Err(InversionError::InvalidConfig(format!(
                "bound multiplier must be finite and positive, got {}",
                self.bound_multiplier
            )));
        }
        Ok(())
    }
}

fn parse_multiplier(raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid {ENV_BOUND_MULTIPLIER}='{raw}': {e}"))
}

/// A single inversion problem `d = G·m` with optional per-observation std.
#[derive(Debug, Clone, PartialEq)]
pub struct InversionProblem {
    pub name: String,
    pub g: DMatrix<f64>,
    pub d: DVector<f64>,
    pub sd: Option<DVector<f64>>,
}

/// Everything a successful L1 solve produces.
#[derive(Debug, Clone, PartialEq)]
pub struct InversionOutcome {
    /// Estimated model `m_est = m⁺ − m⁻`.
    pub model: DVector<f64>,
    /// Optimal LP vector `[m⁺, m⁻, α, x1, x2]`.
    pub lp_solution: DVector<f64>,
    /// Weighted L1 objective `Σ α_i / sd_i` at the optimum.
    pub objective: f64,
    /// Box half-width applied to each model component.
    pub bound: f64,
    /// Least-squares estimate used to derive `bound`.
    pub least_squares: DVector<f64>,
}

/// JSON problem schema.
///
/// ```json
/// { "name": "line", "g": [[1, 0], [1, 1]], "d": [1, 3], "sd": [1, 2] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemFile {
    #[serde(default)]
    pub name: Option<String>,
    pub g: Vec<Vec<f64>>,
    pub d: Vec<f64>,
    #[serde(default)]
    pub sd: Option<Vec<f64>>,
}

impl ProblemFile {
    /// Convert rows into dense matrices. Ragged rows are a shape error.
    pub fn into_problem(self, fallback_name: &str) -> Result<InversionProblem, InversionError> {
        let n = self.g.len();
        let m = self.g.first().map(Vec::len).unwrap_or(0);
        if let Some((i, row)) = self.g.iter().enumerate().find(|(_, row)| row.len() != m) {
            return Err(InversionError::DimensionMismatch(format!(
                "row {i} of G has {} entries, expected {m}",
                row.len()
            )));
        }

        let g = DMatrix::from_row_iterator(n, m, self.g.into_iter().flatten());
        Ok(InversionProblem {
            name: self.name.unwrap_or_else(|| fallback_name.to_string()),
            g,
            d: DVector::from_vec(self.d),
            sd: self.sd.map(DVector::from_vec),
        })
    }
}

/// JSON result schema written by `l1inv solve --export`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultFile {
    pub tool: String,
    pub generated: DateTime<Utc>,
    pub problem: String,
    pub bound_multiplier: f64,
    pub bound: f64,
    pub objective: f64,
    pub model: Vec<f64>,
    pub least_squares: Vec<f64>,
    pub residuals: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_tenfold_bound() {
        let config = InversionConfig::default();
        assert_eq!(config.bound_multiplier, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_positive_multiplier_is_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = InversionConfig { bound_multiplier: bad };
            assert!(matches!(config.validate(), Err(InversionError::InvalidConfig(_))));
        }
    }

    #[test]
    fn multiplier_parsing_reports_variable_name() {
        assert_eq!(parse_multiplier(" 25 "), Ok(25.0));
        let err = parse_multiplier("ten").unwrap_err();
        assert!(err.contains(ENV_BOUND_MULTIPLIER));
    }

    #[test]
    fn problem_file_converts_rows_to_matrix() {
        let file: ProblemFile =
            serde_json::from_str(r#"{ "g": [[1, 0], [1, 1], [1, 2]], "d": [1, 3, 5] }"#).unwrap();
        let problem = file.into_problem("fallback").unwrap();
        assert_eq!(problem.name, "fallback");
        assert_eq!(problem.g.shape(), (3, 2));
        assert_eq!(problem.g[(2, 1)], 2.0);
        assert!(problem.sd.is_none());
    }

    #[test]
    fn ragged_problem_file_is_a_dimension_error() {
        let file = ProblemFile {
            name: Some("ragged".into()),
            g: vec![vec![1.0, 2.0], vec![3.0]],
            d: vec![1.0, 2.0],
            sd: None,
        };
        assert!(matches!(
            file.into_problem("x"),
            Err(InversionError::DimensionMismatch(_))
        ));
    }
}
