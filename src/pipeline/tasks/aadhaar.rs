//! Aadhaar number placement.
//!
//! On Aadhaar cards the 12-digit number is often recognised inside another
//! field. This task moves it to `aadhaarno` and scrubs it from everywhere else.

use std::sync::LazyLock;

use regex::Regex;

use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

pub const AADHAAR_DOCUMENT: &str = "aadhaar";
pub const AADHAAR_FIELD: &str = "aadhaarno";

static AADHAAR_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4} [0-9]{4} [0-9]{4}$").unwrap());
pub(crate) static AADHAAR_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4} [0-9]{4} [0-9]{4}").unwrap());

/// First grouped 12-digit number in table order.
fn find_number(table: &FieldTable) -> Option<String> {
    table
        .records()
        .iter()
        .filter_map(|r| r.value.as_deref())
        .find_map(|v| AADHAAR_ANYWHERE.find(v))
        .map(|m| m.as_str().to_string())
}

/// The number this document's `aadhaarno` ends up holding: a well-formed
/// existing value, otherwise the first grouped number anywhere in the table.
pub(crate) fn target_number(table: &FieldTable) -> Option<String> {
    table
        .get(AADHAAR_FIELD)
        .map(str::trim)
        .filter(|v| AADHAAR_EXACT.is_match(v))
        .map(str::to_string)
        .or_else(|| find_number(table))
}

pub fn apply(table: &mut FieldTable, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    if ctx.document_type != AADHAAR_DOCUMENT {
        return Ok(());
    }

    let Some(number) = target_number(table) else {
        tracing::debug!("No Aadhaar number found in any field");
        return Ok(());
    };

    if table.get(AADHAAR_FIELD) != Some(number.as_str()) {
        table.set(AADHAAR_FIELD, number.clone());
        tracing::info!("Moved Aadhaar number into '{AADHAAR_FIELD}'");
    }

    for record in table.records_mut() {
        if record.name == AADHAAR_FIELD {
            continue;
        }
        if let Some(value) = record.value.as_mut() {
            if value.contains(&number) {
                *value = value.replace(&number, "").trim().to_string();
                tracing::info!(field = %record.name, "Scrubbed Aadhaar number from field");
            }
        }
    }

    Ok(())
}
