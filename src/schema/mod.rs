//! Schema module - Configuration and report types for ICA runs.

mod config;
mod objective;
mod report;

pub use config::*;
pub use objective::*;
pub use report::*;
