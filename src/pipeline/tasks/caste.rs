//! Caste name standardization and category mapping.

use crate::pipeline::fields::FieldTable;
use crate::pipeline::fuzzy::{match_caste_name, MatchKind};
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

pub const OBC_CASTES: &[&str] = &["MEITEI", "MEETEI", "MEITEI PANGAL"];
pub const SC_CASTES: &[&str] = &["LOIS"];

/// Reserved category of a caste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasteCategory {
    Obc,
    ScheduledCaste,
    ScheduledTribe,
}

impl CasteCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Obc => "OBC",
            Self::ScheduledCaste => "Scheduled Caste",
            Self::ScheduledTribe => "Scheduled Tribe",
        }
    }
}

/// Classify a (standardized) caste name. Anything not OBC or SC is ST.
pub fn determine_category(caste_name: &str) -> CasteCategory {
    let name = caste_name.trim().to_uppercase();
    if OBC_CASTES.iter().any(|c| name.contains(c)) {
        CasteCategory::Obc
    } else if SC_CASTES.iter().any(|c| name.contains(c)) {
        CasteCategory::ScheduledCaste
    } else {
        CasteCategory::ScheduledTribe
    }
}

/// Replace `caste_name` with its gazetteer form.
pub fn standardize(table: &mut FieldTable, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let threshold = ctx.config.caste_match_threshold;
    table.update("caste_name", |value| {
        let matched = match_caste_name(value, threshold);
        match matched.kind {
            MatchKind::Unmatched(score) => {
                tracing::info!(best_score = score, "No gazetteer match, keeping caste name");
            }
            kind => {
                tracing::info!(matched = %matched.value, ?kind, "Standardized caste name");
            }
        }
        matched.value
    });
    Ok(())
}

/// Write the category of `caste_name` into `caste`. Needs both fields.
pub fn map_category(table: &mut FieldTable, _ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    if !table.contains("caste_name") || !table.contains("caste") {
        tracing::warn!("Fields 'caste_name' and 'caste' are both required for category mapping");
        return Ok(());
    }

    let Some(name) = table.get("caste_name") else {
        return Err(TaskError::InvalidValue {
            field: "caste_name".to_string(),
            reason: "no value to classify".to_string(),
        });
    };

    let category = determine_category(name);
    tracing::info!(category = category.as_str(), "Mapped caste category");
    table.set("caste", category.as_str());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;

    fn run(task: crate::pipeline::registry::TaskFn, pairs: Vec<(&str, Option<String>)>) -> (FieldTable, Result<(), TaskError>) {
        let config = NormalizerConfig::default();
        let ctx = TaskContext { document_type: "caste_certificate", config: &config };
        let mut table = FieldTable::from_pairs(pairs).unwrap();
        let result = task(&mut table, &ctx);
        (table, result)
    }

    #[test]
    fn categories() {
        assert_eq!(determine_category("MEETEI"), CasteCategory::Obc);
        assert_eq!(determine_category("meitei pangal"), CasteCategory::Obc);
        assert_eq!(determine_category("LOIS"), CasteCategory::ScheduledCaste);
        assert_eq!(determine_category("TANGKHUL"), CasteCategory::ScheduledTribe);
        assert_eq!(determine_category(""), CasteCategory::ScheduledTribe);
    }

    #[test]
    fn standardize_rewrites_caste_name() {
        let (table, result) = run(standardize, vec![("caste_name", Some("tangkul".into()))]);
        assert!(result.is_ok());
        assert_eq!(table.get("caste_name"), Some("TANGKHUL"));
    }

    #[test]
    fn category_written_into_caste() {
        let (table, result) = run(
            map_category,
            vec![("caste_name", Some("MEETEI".into())), ("caste", Some("ST".into()))],
        );
        assert!(result.is_ok());
        assert_eq!(table.get("caste"), Some("OBC"));
    }

    #[test]
    fn category_needs_both_fields() {
        let (table, result) = run(map_category, vec![("caste_name", Some("LOIS".into()))]);
        assert!(result.is_ok());
        assert!(!table.contains("caste"));
    }

    #[test]
    fn absent_caste_name_value_is_an_error() {
        let (_, result) = run(map_category, vec![("caste_name", None), ("caste", Some("SC".into()))]);
        assert!(matches!(result, Err(TaskError::InvalidValue { .. })));
    }
}
