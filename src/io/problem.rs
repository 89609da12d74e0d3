//! Read problem JSON files.
//!
//! A problem file holds `G` as a list of rows, `d`, and optionally `sd`
//! (schema: `domain::ProblemFile`). A batch file is a JSON array of those.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::domain::{InversionProblem, ProblemFile};
use crate::error::AppError;

/// Read a single problem file.
pub fn read_problem_json(path: &Path) -> Result<InversionProblem, AppError> {
    let file: ProblemFile = read_json(path)?;
    file.into_problem(&file_stem(path)).map_err(AppError::from)
}

/// Read a batch file. Unnamed entries are called `<stem>[<index>]`.
pub fn read_batch_json(path: &Path) -> Result<Vec<InversionProblem>, AppError> {
    let files: Vec<ProblemFile> = read_json(path)?;
    let stem = file_stem(path);
    files
        .into_iter()
        .enumerate()
        .map(|(i, f)| f.into_problem(&format!("{stem}[{i}]")).map_err(AppError::from))
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open problem JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid problem JSON '{}': {e}", path.display())))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "problem".to_string())
}
