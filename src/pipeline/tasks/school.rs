use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

static FROM_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(?:\s*from+)+").unwrap());

fn is_school_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || c.is_whitespace()
        || matches!(c, ',' | '.' | '\'' | '(' | ')' | '-' | '&')
}

/// Clean a school name: drop digits, stray symbols and any leading run of
/// "from" words.
pub fn clean_school_name(raw: &str) -> String {
    let kept: String = raw.chars().filter(|c| is_school_char(*c)).collect();
    let without_prefix = FROM_PREFIX.replace(&kept, "");
    let collapsed = without_prefix.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

pub fn apply(table: &mut FieldTable, _ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    if table.update("school", clean_school_name) {
        tracing::info!("Cleaned school name");
    }
    Ok(())
}
