use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n\r\t]+").unwrap());
static REPEATED_DOTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.{2,}").unwrap());
static REPEATED_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\({2,}").unwrap());
static REPEATED_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\){2,}").unwrap());

/// Characters whose neighbouring whitespace is left as-is.
fn is_anchor(c: char) -> bool {
    matches!(c, '.' | '(' | ')' | '[' | ']')
}

/// Collapse whitespace runs to a single space. The whitespace character that
/// touches an anchor on either side of a run is kept verbatim.
fn collapse_whitespace(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_whitespace() {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        let run = &chars[start..i];

        let mut lo = 0;
        let mut hi = run.len();
        if start > 0 && is_anchor(chars[start - 1]) {
            out.push(run[0]);
            lo = 1;
        }
        let trailing = if i < chars.len() && is_anchor(chars[i]) && hi > lo {
            hi -= 1;
            Some(run[hi])
        } else {
            None
        };
        if hi > lo {
            out.push(' ');
        }
        if let Some(c) = trailing {
            out.push(c);
        }
    }

    out
}

/// Normalize whitespace and repeated punctuation in any field value.
pub fn clean_special_chars(raw: &str) -> String {
    let text = LINE_BREAKS.replace_all(raw, " ");
    let text = collapse_whitespace(&text);
    let text = REPEATED_DOTS.replace_all(&text, ".");
    let text = REPEATED_OPEN.replace_all(&text, "(");
    let text = REPEATED_CLOSE.replace_all(&text, ")");

    text.trim()
        .trim_end_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

pub fn apply(table: &mut FieldTable, _ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    for record in table.records_mut() {
        if let Some(value) = record.value.as_mut() {
            *value = clean_special_chars(value);
        }
    }
    tracing::info!("Cleaned special characters while preserving dots and parentheses");
    Ok(())
}
