//! Per-document field table.
//!
//! A `FieldTable` is built once from the extraction engine's field map, owned
//! exclusively by one pipeline run, mutated in place by every task and finally
//! serialized back to a map. Record order follows the input order; records
//! created during the run are appended.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::NormalizeError;

/// Field name → value map as exchanged with callers (insertion-ordered).
pub type FieldMap = serde_json::Map<String, Value>;

/// One named value. `None` means the extraction engine reported nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub name: String,
    pub value: Option<String>,
}

/// Ordered, unique-by-name collection of field records for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTable {
    records: Vec<FieldRecord>,
}

// ═══════════════════════════════════════════════════════════
// Building and serialization
// ═══════════════════════════════════════════════════════════

/// Coerce a raw input value to its string form.
///
/// This is the single place heterogeneous input typing is resolved: numbers and
/// booleans become their display form, nested structures their compact JSON
/// text. `null` stays absent.
pub fn coerce_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

impl FieldTable {
    /// Build a table from a field map, stringifying every value up front.
    pub fn from_map(map: &FieldMap) -> Self {
        let records = map
            .iter()
            .map(|(name, value)| FieldRecord {
                name: name.clone(),
                value: coerce_value(value),
            })
            .collect();
        Self { records }
    }

    /// Build a table from a JSON value, which must be an object.
    pub fn from_json(value: &Value) -> Result<Self, NormalizeError> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(NormalizeError::InvalidInput(json_kind(other).to_string())),
        }
    }

    /// Build a table from typed pairs. Repeated names are rejected.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, NormalizeError>
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for (name, value) in pairs {
            let name = name.into();
            if !seen.insert(name.clone()) {
                return Err(NormalizeError::DuplicateField(name));
            }
            records.push(FieldRecord { name, value });
        }
        Ok(Self { records })
    }

    /// Serialize back to a field map. Absent and blank values become `null`.
    pub fn into_map(self) -> FieldMap {
        self.records
            .into_iter()
            .map(|record| {
                let value = match record.value {
                    Some(v) if !v.is_empty() => Value::String(v),
                    _ => Value::Null,
                };
                (record.name, value)
            })
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ═══════════════════════════════════════════════════════════
// Access and mutation
// ═══════════════════════════════════════════════════════════

impl FieldTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FieldRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut FieldRecord> {
        self.records.iter_mut()
    }

    /// Field names in table order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.name == name)
    }

    /// Value of a field; `None` when the field is missing or has no value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .and_then(|r| r.value.as_deref())
    }

    /// Set a field's value, appending a new record when the field is missing.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = Some(value.into());
        match self.records.iter_mut().find(|r| r.name == name) {
            Some(record) => record.value = value,
            None => self.records.push(FieldRecord {
                name: name.to_string(),
                value,
            }),
        }
    }

    /// Drop a field. Returns the removed record, if any.
    pub fn remove(&mut self, name: &str) -> Option<FieldRecord> {
        let idx = self.records.iter().position(|r| r.name == name)?;
        Some(self.records.remove(idx))
    }

    /// Rewrite the value of one field in place. Absent values are left alone.
    pub fn update<F>(&mut self, name: &str, f: F) -> bool
    where
        F: FnOnce(&str) -> String,
    {
        match self.records.iter_mut().find(|r| r.name == name) {
            Some(record) => match record.value.as_deref() {
                Some(current) => {
                    record.value = Some(f(current));
                    true
                }
                None => false,
            },
            None => false,
        }
    }
}
