use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

/// Replace every absent value with an empty string.
pub fn apply(table: &mut FieldTable, _ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let mut filled = 0usize;
    for record in table.records_mut() {
        if record.value.is_none() {
            record.value = Some(String::new());
            filled += 1;
        }
    }
    tracing::info!(filled, "Converted null values to empty strings");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;

    #[test]
    fn fills_absent_values_only() {
        let config = NormalizerConfig::default();
        let ctx = TaskContext { document_type: "aadhaar", config: &config };
        let mut table = FieldTable::from_pairs(vec![
            ("name", Some("RAM".to_string())),
            ("aadhaarno", None),
        ])
        .unwrap();

        apply(&mut table, &ctx).unwrap();

        assert_eq!(table.get("name"), Some("RAM"));
        assert_eq!(table.get("aadhaarno"), Some(""));
    }
}
