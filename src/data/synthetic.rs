//! Reproducible straight-line problems with gross outliers.
//!
//! Observations follow `d_i = m0 + m1 * t_i + ε_i` on an even grid
//! `t_i ∈ [0, 1]`, with Gaussian `ε_i`. A fixed number of distinct rows then
//! get `± outlier_size` added, with the sign drawn at random. The same seed
//! always produces the same problem.

use nalgebra::{DMatrix, DVector};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::seq::index;
use rand_distr::Normal;

use crate::domain::InversionProblem;
use crate::error::AppError;

/// Settings for [`generate_line_problem`].
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    /// Number of observations.
    pub n: usize,
    /// True intercept and slope.
    pub m_true: [f64; 2],
    /// Gaussian noise std (0 disables noise).
    pub noise_sd: f64,
    /// Number of corrupted observations.
    pub outliers: usize,
    /// Magnitude added to each corrupted observation.
    pub outlier_size: f64,
    pub seed: u64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            n: 25,
            m_true: [1.0, 2.0],
            noise_sd: 0.05,
            outliers: 3,
            outlier_size: 20.0,
            seed: 42,
        }
    }
}

/// A generated problem and the model it was generated from.
#[derive(Debug, Clone)]
pub struct SyntheticProblem {
    pub problem: InversionProblem,
    pub m_true: DVector<f64>,
    /// Row indices that received an outlier, ascending.
    pub outlier_rows: Vec<usize>,
}

pub fn generate_line_problem(spec: &SyntheticSpec) -> Result<SyntheticProblem, AppError> {
    if spec.n < 2 {
        return Err(AppError::new(2, "Synthetic problems need at least 2 observations."));
    }
    if spec.outliers >= spec.n {
        return Err(AppError::new(2, "Outlier count must be smaller than the observation count."));
    }
    if !(spec.outlier_size.is_finite() && spec.m_true.iter().all(|v| v.is_finite())) {
        return Err(AppError::new(2, "Synthetic model and outlier size must be finite."));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, spec.noise_sd)
        .map_err(|e| AppError::new(2, format!("Noise distribution error: {e}")))?;

    let step = 1.0 / (spec.n as f64 - 1.0);
    let g = DMatrix::from_fn(spec.n, 2, |i, j| if j == 0 { 1.0 } else { i as f64 * step });
    let m_true = DVector::from_row_slice(&spec.m_true);

    let mut d = &g * &m_true;
    for v in d.iter_mut() {
        *v += normal.sample(&mut rng);
    }

    let mut outlier_rows = index::sample(&mut rng, spec.n, spec.outliers).into_vec();
    outlier_rows.sort_unstable();
    for &i in &outlier_rows {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        d[i] += sign * spec.outlier_size;
    }

    Ok(SyntheticProblem {
        problem: InversionProblem {
            name: format!("synthetic-line-seed{}", spec.seed),
            g,
            d,
            sd: None,
        },
        m_true,
        outlier_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_problem() {
        let spec = SyntheticSpec::default();
        let a = generate_line_problem(&spec).unwrap();
        let b = generate_line_problem(&spec).unwrap();
        assert_eq!(a.problem, b.problem);
        assert_eq!(a.outlier_rows, b.outlier_rows);
    }

    #[test]
    fn outliers_are_distinct_and_sized() {
        let spec = SyntheticSpec {
            noise_sd: 0.0,
            outliers: 4,
            ..SyntheticSpec::default()
        };
        let s = generate_line_problem(&spec).unwrap();
        assert_eq!(s.outlier_rows.len(), 4);
        assert!(s.outlier_rows.windows(2).all(|w| w[0] < w[1]));

        let clean = &s.problem.g * &s.m_true;
        for i in 0..spec.n {
            let dev = (s.problem.d[i] - clean[i]).abs();
            if s.outlier_rows.contains(&i) {
                assert!((dev - spec.outlier_size).abs() < 1e-9);
            } else {
                assert!(dev < 1e-12);
            }
        }
    }

    #[test]
    fn rejects_too_many_outliers() {
        let spec = SyntheticSpec {
            n: 3,
            outliers: 3,
            ..SyntheticSpec::default()
        };
        assert_eq!(generate_line_problem(&spec).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn l1_recovers_noiseless_line_despite_outliers() {
        let spec = SyntheticSpec {
            n: 21,
            noise_sd: 0.0,
            outliers: 3,
            outlier_size: 30.0,
            seed: 7,
            ..SyntheticSpec::default()
        };
        let s = generate_line_problem(&spec).unwrap();
        let m = crate::inversion::solve(&s.problem.g, &s.problem.d, None).unwrap();
        assert!((m - &s.m_true).amax() < 1e-5);
    }
}
