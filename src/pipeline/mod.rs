pub mod fields;
pub mod registry;
pub mod runner; // Ordered task execution with per-task isolation
pub mod fuzzy;
pub mod dates;
pub mod tasks;


pub use fields::*;
pub use registry::*;
pub use runner::*;

use thiserror::Error;

/// Failures while building or serializing a field table.
///
/// These are the only errors a caller ever sees: task failures are absorbed
/// by the runner.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Input is not a JSON object: {0}")]
    InvalidInput(String),

    #[error("Duplicate field in record list: {0}")]
    DuplicateField(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure inside a single normalization task.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Invalid value in field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Task panicked: {0}")]
    Panicked(String),
}
