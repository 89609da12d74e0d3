//! Write result JSON files (schema: `domain::ResultFile`).

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{InversionConfig, InversionOutcome, InversionProblem, ResultFile};
use crate::error::AppError;
use crate::report::compute_residuals;

/// Build the serializable record for a solved problem.
pub fn result_file(
    problem: &InversionProblem,
    outcome: &InversionOutcome,
    config: &InversionConfig,
) -> ResultFile {
    ResultFile {
        tool: "l1inv".to_string(),
        generated: Utc::now(),
        problem: problem.name.clone(),
        bound_multiplier: config.bound_multiplier,
        bound: outcome.bound,
        objective: outcome.objective,
        model: outcome.model.iter().copied().collect(),
        least_squares: outcome.least_squares.iter().copied().collect(),
        residuals: compute_residuals(&problem.g, &problem.d, &outcome.model)
            .iter()
            .copied()
            .collect(),
    }
}

/// Write a result JSON file.
pub fn write_result_json(path: &Path, result: &ResultFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, result)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::{DMatrix, DVector};

    use super::*;

    #[test]
    fn result_round_trips_through_disk() {
        let problem = InversionProblem {
            name: "median".to_string(),
            g: DMatrix::from_element(3, 1, 1.0),
            d: DVector::from_row_slice(&[1.0, 1.0, 100.0]),
            sd: None,
        };
        let outcome = InversionOutcome {
            model: DVector::from_row_slice(&[1.0]),
            lp_solution: DVector::zeros(11),
            objective: 99.0,
            bound: 340.0,
            least_squares: DVector::from_row_slice(&[34.0]),
        };
        let record = result_file(&problem, &outcome, &InversionConfig::default());
        assert_eq!(record.residuals, vec![0.0, 0.0, 99.0]);

        let path = std::env::temp_dir().join(format!("l1inv-{}-result.json", std::process::id()));
        write_result_json(&path, &record).unwrap();
        let back: ResultFile = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(back.problem, "median");
        assert_eq!(back.model, vec![1.0]);
        assert_eq!(back.bound_multiplier, 10.0);
    }
}
