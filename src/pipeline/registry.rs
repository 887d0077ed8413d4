//! Static task registry.
//!
//! Tasks run in the order of `TASKS`. Eligibility is decided against a field
//! snapshot taken once before the first task, so a field created mid-run never
//! opens a later task's gate. Task bodies still inspect the live table.

use std::collections::HashSet;

use super::fields::FieldTable;
use super::tasks;
use super::TaskError;
use crate::config::NormalizerConfig;

/// Read-only inputs shared by every task of one run.
#[derive(Debug, Clone, Copy)]
pub struct TaskContext<'a> {
    pub document_type: &'a str,
    pub config: &'a NormalizerConfig,
}

pub type TaskFn = fn(&mut FieldTable, &TaskContext<'_>) -> Result<(), TaskError>;

/// When a task is allowed to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Always,
    /// Runs when at least one of these fields was present at run start.
    AnyOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    pub name: &'static str,
    pub gate: Gate,
    pub apply: TaskFn,
}

impl TaskSpec {
    pub fn is_eligible(&self, available: &HashSet<String>) -> bool {
        match self.gate {
            Gate::Always => true,
            Gate::AnyOf(fields) => fields.iter().any(|f| available.contains(*f)),
        }
    }
}

/// Field names present in the table, taken once before any task runs.
pub fn available_fields(table: &FieldTable) -> HashSet<String> {
    table.names().map(str::to_string).collect()
}

pub const TASKS: &[TaskSpec] = &[
    TaskSpec {
        name: "handle_null_values",
        gate: Gate::Always,
        apply: tasks::null_values::apply,
    },
    TaskSpec {
        name: "clean_names",
        gate: Gate::AnyOf(&[
            "fathername",
            "name",
            "relative",
            "mother_name",
            "father_name",
            "exam_name",
            "degree",
        ]),
        apply: tasks::names::apply,
    },
    TaskSpec {
        name: "handle_special_chars",
        gate: Gate::Always,
        apply: tasks::special_chars::apply,
    },
    TaskSpec {
        name: "normalize_division",
        gate: Gate::AnyOf(&["division"]),
        apply: tasks::division::apply,
    },
    TaskSpec {
        name: "handle_aadhaar",
        gate: Gate::Always,
        apply: tasks::aadhaar::apply,
    },
    TaskSpec {
        name: "normalize_gender",
        gate: Gate::AnyOf(&["gender"]),
        apply: tasks::gender::apply,
    },
    TaskSpec {
        name: "handle_dob",
        gate: Gate::AnyOf(&["dob"]),
        apply: tasks::dob::apply,
    },
    TaskSpec {
        name: "clean_school_name",
        gate: Gate::AnyOf(&["school"]),
        apply: tasks::school::apply,
    },
    TaskSpec {
        name: "remove_marks",
        gate: Gate::Always,
        apply: tasks::marks::apply,
    },
    TaskSpec {
        name: "standardize_caste_name",
        gate: Gate::AnyOf(&["caste_name"]),
        apply: tasks::caste::standardize,
    },
    TaskSpec {
        name: "map_caste_category",
        gate: Gate::AnyOf(&["caste_name", "caste"]),
        apply: tasks::caste::map_category,
    },
    TaskSpec {
        name: "normalize_passout",
        gate: Gate::AnyOf(&["passout"]),
        apply: tasks::passout::apply,
    },
    TaskSpec {
        name: "clean_roll",
        gate: Gate::AnyOf(&["roll_number"]),
        apply: tasks::roll::apply,
    },
];
