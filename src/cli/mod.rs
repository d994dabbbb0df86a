//! CLI command handlers.
//!
//! Testable command handlers invoked by main.rs.

mod diff;

pub use diff::run_diff;

// Re-export config types used by handlers
pub use crate::config::DiffConfig;
