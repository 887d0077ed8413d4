//! Normalization tasks, one module per task.
//!
//! Every task has the signature of `registry::TaskFn`: it mutates the field
//! table in place and may inspect the live table to react to fields created
//! by earlier tasks.

pub mod null_values;
pub mod names;
pub mod special_chars;
pub mod division;
pub mod aadhaar;
pub mod gender;
pub mod dob;
pub mod school;
pub mod marks;
pub mod caste;
pub mod passout;
pub mod roll;
