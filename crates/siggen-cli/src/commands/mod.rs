//! CLI command implementations

pub mod analyze;
pub mod coherent;
pub mod generate;
pub mod validate;

mod reporting;
