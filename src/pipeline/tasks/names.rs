//! Person-name cleanup.
//!
//! Removes relation markers ("S/O", "D/O", ...) and honorific prefixes, maps
//! digits OCR produces for look-alike letters, and drops everything that
//! cannot be part of a printed name.

use crate::pipeline::fields::FieldTable;
use crate::pipeline::registry::TaskContext;
use crate::pipeline::TaskError;

use super::aadhaar::{target_number, AADHAAR_ANYWHERE, AADHAAR_DOCUMENT};

/// Fields cleaned by this task.
pub const NAME_FIELDS: &[&str] = &["fathername", "name", "relative", "mother_name", "father_name"];

const RELATION_MARKERS: &[&str] = &["S/O", "D/O", "W/O", "H/O"];

/// Leading tokens, checked in order. Each is removed at most once.
const LEADING_PREFIXES: &[&str] = &[
    "DIO ", "SIO ", "WIO ", "HIO ", "MISS ", "MR. ", "MRS. ", "MS. ", "SMT. ", "SHRI ", "Km. ",
    "SO ", "DO ", "WO ", "HO ", "CO ", "Co ", "MR ", "MRS ", "MS ", "SMT ", "MR.", "MRS.", "MS.",
    "SMT.", "Km.",
];

fn digit_to_letter(c: char) -> char {
    match c {
        '0' => 'O',
        '1' => 'I',
        '5' => 'S',
        other => other,
    }
}

/// Clean a single name value.
pub fn clean_name(raw: &str) -> String {
    // Look-alike digits first, so "S0 " is seen as the "SO " prefix.
    let mut value: String = raw.chars().map(digit_to_letter).collect();

    for marker in RELATION_MARKERS {
        value = value.replace(marker, "").trim().to_string();
    }

    for prefix in LEADING_PREFIXES {
        if let Some(rest) = value.strip_prefix(prefix) {
            value = rest.trim().to_string();
        }
    }

    let filtered: String = value
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '(' | ')' | '.'))
        .collect();

    let collapsed = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed
        .trim_end_matches(|c: char| c == '.' || c == ',' || c.is_whitespace())
        .to_string()
}

/// Clean a name but keep occurrences of `keep` (a grouped Aadhaar number)
/// intact, so the Aadhaar handler can still move it out of the field. Any
/// other digit group is cleaned like the rest of the name.
pub fn clean_name_keeping_aadhaar(raw: &str, keep: &str) -> String {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in AADHAAR_ANYWHERE.find_iter(raw).filter(|m| m.as_str() == keep) {
        parts.push(clean_name(&raw[last..m.start()]));
        parts.push(keep.to_string());
        last = m.end();
    }
    parts.push(clean_name(&raw[last..]));

    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

pub fn apply(table: &mut FieldTable, ctx: &TaskContext<'_>) -> Result<(), TaskError> {
    let keep = if ctx.document_type == AADHAAR_DOCUMENT {
        target_number(table)
    } else {
        None
    };

    for field in NAME_FIELDS {
        let cleaned = table.update(field, |value| match keep.as_deref() {
            Some(number) => clean_name_keeping_aadhaar(value, number),
            None => clean_name(value),
        });
        if cleaned {
            tracing::debug!(field, "Cleaned name field");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizerConfig;

    #[test]
    fn strips_relation_markers() {
        assert_eq!(clean_name("S/O RAMESH KUMAR"), "RAMESH KUMAR");
        assert_eq!(clean_name("SITA D/O"), "SITA");
    }

    #[test]
    fn strips_honorifics() {
        assert_eq!(clean_name("MR. RAM KUMAR"), "RAM KUMAR");
        assert_eq!(clean_name("SMT. LAXMI DEVI"), "LAXMI DEVI");
        assert_eq!(clean_name("Km. PRIYA"), "PRIYA");
        assert_eq!(clean_name("MRS.SUNITA"), "SUNITA");
        assert_eq!(clean_name("MR. SHRI RAM"), "RAM");
    }

    #[test]
    fn keeps_names_that_only_look_like_prefixes() {
        assert_eq!(clean_name("SONU"), "SONU");
        assert_eq!(clean_name("DOLLY"), "DOLLY");
    }

    #[test]
    fn maps_lookalike_digits_and_drops_others() {
        assert_eq!(clean_name("R0HAN"), "ROHAN");
        assert_eq!(clean_name("V1JAY"), "VIJAY");
        assert_eq!(clean_name("5URESH"), "SURESH");
        assert_eq!(clean_name("AMIT2 KUMAR9"), "AMIT KUMAR");
    }

    #[test]
    fn drops_special_characters_and_trailing_punctuation() {
        assert_eq!(clean_name("RAJ@ KUMAR#  SINGH."), "RAJ KUMAR SINGH");
        assert_eq!(clean_name("P. K. SHARMA (LATE)"), "P. K. SHARMA (LATE)");
        assert_eq!(clean_name("MOHAN,"), "MOHAN");
    }

    #[test]
    fn cleaning_is_idempotent() {
        for raw in ["MR. RAM KUMAR", "S/O 5URESH.", "P. K. SHARMA (LATE)", "RAJ@ KUMAR#", "S0 RAMESH", "D0 SITA"] {
            let once = clean_name(raw);
            assert_eq!(clean_name(&once), once, "not a fixed point for {raw:?}");
        }
    }

    #[test]
    fn prefixes_with_lookalike_digits_are_stripped() {
        assert_eq!(clean_name("S0 RAMESH"), "RAMESH");
        assert_eq!(clean_name("W0 SUNITA"), "SUNITA");
    }

    #[test]
    fn kept_aadhaar_number_survives_on_aadhaar_cards() {
        let keep = "1234 5678 9012";
        assert_eq!(clean_name_keeping_aadhaar("RAM 1234 5678 9012", keep), "RAM 1234 5678 9012");
        assert_eq!(clean_name_keeping_aadhaar("MR. R0HAN 1234 5678 9012 ", keep), "ROHAN 1234 5678 9012");
        assert_eq!(clean_name_keeping_aadhaar("SITA 42", keep), "SITA");
    }

    #[test]
    fn other_digit_groups_are_cleaned() {
        assert_eq!(clean_name_keeping_aadhaar("SITA 1111 2222 3333", "9999 8888 7777"), "SITA IIII");
        assert_eq!(
            clean_name_keeping_aadhaar("RAM 1234 5678 9012 1111 2222 3333", "1234 5678 9012"),
            "RAM 1234 5678 9012 IIII"
        );
    }

    #[test]
    fn existing_aadhaarno_decides_which_number_is_kept() {
        let config = NormalizerConfig::default();
        let ctx = TaskContext { document_type: "aadhaar", config: &config };
        let mut table = FieldTable::from_pairs(vec![
            ("name", Some("SITA 1111 2222 3333".to_string())),
            ("father_name", Some("S/O RAM 9999 8888 7777".to_string())),
            ("aadhaarno", Some("9999 8888 7777".to_string())),
        ])
        .unwrap();

        apply(&mut table, &ctx).unwrap();

        assert_eq!(table.get("name"), Some("SITA IIII"));
        assert_eq!(table.get("father_name"), Some("RAM 9999 8888 7777"));
    }

    #[test]
    fn digits_are_dropped_on_other_documents() {
        let config = NormalizerConfig::default();
        let ctx = TaskContext { document_type: "class10cbse", config: &config };
        let mut table = FieldTable::from_pairs(vec![("name", Some("RAM 1234 5678 9012".to_string()))]).unwrap();
        apply(&mut table, &ctx).unwrap();
        assert_eq!(table.get("name"), Some("RAM I S OI"));
    }

    #[test]
    fn only_name_fields_are_touched() {
        let config = NormalizerConfig::default();
        let ctx = TaskContext { document_type: "aadhaar", config: &config };
        let mut table = FieldTable::from_pairs(vec![
            ("name", Some("MR. R0HAN".to_string())),
            ("father_name", Some("S/O VIJAY".to_string())),
            ("school", Some("ST. MARY'S 2".to_string())),
        ])
        .unwrap();

        apply(&mut table, &ctx).unwrap();

        assert_eq!(table.get("name"), Some("ROHAN"));
        assert_eq!(table.get("father_name"), Some("VIJAY"));
        assert_eq!(table.get("school"), Some("ST. MARY'S 2"));
    }
}
