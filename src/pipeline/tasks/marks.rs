use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

/// Drop raw marks text. It is never carried past normalization.
pub fn apply(table: &mut FieldTable, _ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    if table.remove("marks").is_some() {
        tracing::info!("Removed 'marks' field");
    }
    Ok(())
}
