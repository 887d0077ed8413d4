use crate::pipeline::dates::format_dob;
use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

use super::aadhaar::AADHAAR_FIELD;

/// Keep a date of birth only on documents that carry an Aadhaar number.
///
/// The check looks at the live table, so an `aadhaarno` created earlier in the
/// same run counts.
pub fn apply(table: &mut FieldTable, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    if !table.contains("dob") {
        return Ok(());
    }

    if !table.contains(AADHAAR_FIELD) {
        table.remove("dob");
        tracing::info!("Removed 'dob': no Aadhaar number on this document");
        return Ok(());
    }

    let pivot = ctx.config.two_digit_year_pivot;
    table.update("dob", |value| {
        if value.trim().is_empty() {
            String::new()
        } else {
            format_dob(value, pivot)
        }
    });
    tracing::info!("Formatted 'dob' as dd-mm-yyyy");
    Ok(())
}
