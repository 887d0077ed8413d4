use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pipeline::NormalizeError;

/// Application-level constants
pub const APP_NAME: &str = "field-normalizer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,field_normalizer_lib=info"
}

/// Tunables for the normalization tasks.
///
/// Every field has a default matching the behavior of the reference tables,
/// so `NormalizerConfig::default()` is what production callers use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Minimum Jaro score for a fuzzy caste-name match to be accepted.
    pub caste_match_threshold: f64,
    /// Two-digit years above this pivot map to 19xx in month-name dates.
    pub two_digit_year_pivot: u32,
    /// Upper bound (inclusive) for a division value to be read as a CGPA.
    pub cgpa_max: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            caste_match_threshold: 0.70,
            two_digit_year_pivot: 50,
            cgpa_max: 10.0,
        }
    }
}

impl NormalizerConfig {
    /// Load a config from a JSON file. Missing keys fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, NormalizeError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
