//! Pipeline orchestration for a comparison run.
//!
//! Shared parse → diff → report stages used by the CLI command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::compute_diff;
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::parse_document_with_context;
pub use report_stage::{output_report, render_report};

/// Process exit codes
pub mod exit_codes {
    /// Run completed (discrepancies alone do not fail the run by default)
    pub const SUCCESS: i32 = 0;
    /// Discrepancies were found and `--fail-on-change` was given
    pub const CHANGES_DETECTED: i32 = 1;
    /// Dangling links were found and `--fail-on-warning` was given
    pub const WARNINGS: i32 = 2;
    /// An error occurred, including documents that cannot be aligned
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::WARNINGS, 2);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
