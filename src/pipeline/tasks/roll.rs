use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

pub fn clean_roll_number(value: &str) -> String {
    value.replace('.', "")
}

pub fn apply(table: &mut FieldTable, _ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    if table.update("roll_number", clean_roll_number) {
        tracing::info!("Removed dots from roll number");
    }
    Ok(())
}
