use crate::pipeline::dates::normalize_passout_year;
use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

pub fn apply(table: &mut FieldTable, _ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let changed = table.update("passout", |value| {
        if value.trim().is_empty() {
            String::new()
        } else {
            normalize_passout_year(value)
        }
    });
    if changed {
        tracing::info!("Normalized passout year with character substitutions");
    }
    Ok(())
}
