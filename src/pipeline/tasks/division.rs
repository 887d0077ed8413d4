//! Division / grade normalization.
//!
//! Produces one of "1st division", "2nd division", "3rd division" or a
//! "{x.y} CGPA" value. Anything unrecognised is kept as-is.

use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

/// Lookup table, in match priority order for substring lookups.
const DIVISION_MAPPINGS: &[(&str, &str)] = &[
    ("first", "1st division"),
    ("second", "2nd division"),
    ("third", "3rd division"),
    ("i", "1st division"),
    ("ii", "2nd division"),
    ("iii", "3rd division"),
    ("I", "1st division"),
    ("II", "2nd division"),
    ("III", "3rd division"),
    ("1st", "1st division"),
    ("2nd", "2nd division"),
    ("3rd", "3rd division"),
    ("1", "1st division"),
    ("2", "2nd division"),
    ("3", "3rd division"),
];

static CANONICAL_CGPA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+\.[0-9]) CGPA$").unwrap());

fn lookup_exact(key: &str) -> Option<&'static str> {
    DIVISION_MAPPINGS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

fn lookup_contained(text: &str) -> Option<&'static str> {
    DIVISION_MAPPINGS
        .iter()
        .find(|(k, _)| text.contains(k))
        .map(|(_, v)| *v)
}

/// Read a value as a CGPA. A space stands in for the decimal point ("8 5").
fn parse_cgpa(value: &str, max: f64) -> Option<f64> {
    let num: f64 = value.replace(' ', ".").parse().ok()?;
    (0.0..=max).contains(&num).then_some(num)
}

/// Already-normalized "x.y CGPA" values within range.
fn is_canonical_cgpa(value: &str, max: f64) -> bool {
    CANONICAL_CGPA
        .captures(value)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .is_some_and(|num| (0.0..=max).contains(&num))
}

/// Lower-case, drop punctuation and the word "division".
fn simplify(value: &str) -> String {
    let lowered: String = value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    lowered
        .replace("division", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a division value. Returns `None` when nothing matched.
pub fn normalize_division(raw: &str, cgpa_max: f64) -> Option<String> {
    let original = raw.trim();

    if let Some(mapped) = lookup_exact(original) {
        return Some(mapped.to_string());
    }
    if is_canonical_cgpa(original, cgpa_max) {
        return Some(original.to_string());
    }
    if let Some(num) = parse_cgpa(original, cgpa_max) {
        return Some(format!("{num:.1} CGPA"));
    }

    let simplified = simplify(original);
    lookup_exact(&simplified)
        .or_else(|| lookup_contained(&simplified))
        .map(str::to_string)
}

pub fn apply(table: &mut FieldTable, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let cgpa_max = ctx.config.cgpa_max;
    table.update("division", |value| match normalize_division(value, cgpa_max) {
        Some(normalized) => normalized,
        None => {
            tracing::warn!(len = value.len(), "Could not normalize division value");
            tracing::debug!(value = %value, "Unnormalized division value");
            value.trim().to_string()
        }
    });
    Ok(())
}
