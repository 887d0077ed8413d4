//! Pipeline runner.
//!
//! Single entry point that drives one document's fields through the task
//! registry: build table → snapshot available fields → run eligible tasks in
//! order → serialize. A task that fails (error or panic) is logged and its
//! changes are discarded; the run always continues to the next task.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use serde_json::Value;

use super::fields::{FieldMap, FieldTable};
use super::registry::{available_fields, TaskContext, TaskSpec, TASKS};
use super::{NormalizeError, TaskError};
use crate::config::NormalizerConfig;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A task whose changes were rolled back.
#[derive(Debug, Clone, Serialize)]
pub struct TaskFailure {
    pub task: &'static str,
    pub error: String,
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub fields: FieldMap,
    /// Tasks that ran to completion, in execution order.
    pub applied: Vec<&'static str>,
    /// Tasks whose gate was closed.
    pub skipped: Vec<&'static str>,
    pub failed: Vec<TaskFailure>,
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Runs the normalization tasks over one document at a time.
///
/// Holds only read-only state, so one `Normalizer` can serve concurrent
/// invocations; each run owns its `FieldTable` exclusively.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: NormalizerConfig,
    tasks: Vec<TaskSpec>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self::with_tasks(config, TASKS.to_vec())
    }

    /// Runner over a custom task list, executed in the given order.
    pub fn with_tasks(config: NormalizerConfig, tasks: Vec<TaskSpec>) -> Self {
        Self { config, tasks }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a field map and return the corrected map.
    pub fn normalize(&self, raw: &FieldMap, document_type: &str) -> FieldMap {
        self.run(raw, document_type).fields
    }

    /// Normalize a JSON value, which must be an object.
    pub fn normalize_json(
        &self,
        raw: &Value,
        document_type: &str,
    ) -> Result<FieldMap, NormalizeError> {
        let table = FieldTable::from_json(raw)?;
        Ok(self.run_table(table, document_type).fields)
    }

    /// Normalize JSON text.
    pub fn normalize_str(&self, text: &str, document_type: &str) -> Result<FieldMap, NormalizeError> {
        let raw: Value = serde_json::from_str(text)?;
        self.normalize_json(&raw, document_type)
    }

    /// Normalize typed pairs. Repeated field names are a processing failure.
    pub fn normalize_pairs<I, K>(&self, pairs: I, document_type: &str) -> Result<FieldMap, NormalizeError>
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: Into<String>,
    {
        let table = FieldTable::from_pairs(pairs)?;
        Ok(self.run_table(table, document_type).fields)
    }

    /// Normalize, falling back to the unprocessed input when the table cannot
    /// be built. No normalization guarantee holds for the fallback.
    pub fn normalize_or_raw(&self, raw: &Value, document_type: &str) -> Value {
        match self.normalize_json(raw, document_type) {
            Ok(fields) => Value::Object(fields),
            Err(e) => {
                tracing::error!(
                    document_type = %document_type,
                    error = %e,
                    "Error processing document, returning raw fields"
                );
                raw.clone()
            }
        }
    }

    /// Normalize a field map and report which tasks ran.
    pub fn run(&self, raw: &FieldMap, document_type: &str) -> RunReport {
        self.run_table(FieldTable::from_map(raw), document_type)
    }

    fn run_table(&self, mut table: FieldTable, document_type: &str) -> RunReport {
        let available = available_fields(&table);
        let ctx = TaskContext {
            document_type,
            config: &self.config,
        };

        let mut applied = Vec::new();
        let mut skipped = Vec::new();
        let mut failed = Vec::new();

        for spec in &self.tasks {
            if !spec.is_eligible(&available) {
                tracing::debug!(task = spec.name, "Task gate closed, skipping");
                skipped.push(spec.name);
                continue;
            }

            let before = table.clone();
            match run_isolated(spec, &mut table, &ctx) {
                Ok(()) => {
                    tracing::info!(
                        task = spec.name,
                        document_type = %document_type,
                        "Applied task"
                    );
                    applied.push(spec.name);
                }
                Err(e) => {
                    tracing::error!(
                        task = spec.name,
                        document_type = %document_type,
                        error = %e,
                        "Task failed, changes discarded"
                    );
                    table = before;
                    failed.push(TaskFailure {
                        task: spec.name,
                        error: e.to_string(),
                    });
                }
            }
        }

        RunReport {
            fields: table.into_map(),
            applied,
            skipped,
            failed,
        }
    }
}

/// Run one task, converting a panic into a `TaskError`.
fn run_isolated(
    spec: &TaskSpec,
    table: &mut FieldTable,
    ctx: &TaskContext<'_>,
) -> Result<(), TaskError> {
    match panic::catch_unwind(AssertUnwindSafe(|| (spec.apply)(table, ctx))) {
        Ok(result) => result,
        Err(payload) => Err(TaskError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
