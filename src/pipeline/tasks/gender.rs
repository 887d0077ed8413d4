use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[/,\s]+").unwrap());

/// Reduce a gender value to its first distinct token, capitalized.
///
/// "M/ M" → "M", "Female female" → "Female". No controlled vocabulary.
pub fn normalize_gender(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut tokens: Vec<&str> = Vec::new();
    for token in SEPARATORS.split(&lowered).filter(|t| !t.is_empty()) {
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }

    match tokens.first() {
        Some(first) => capitalize(first),
        None => raw.to_string(),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn apply(table: &mut FieldTable, _ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    if table.update("gender", normalize_gender) {
        tracing::info!("Normalized gender value");
    }
    Ok(())
}
