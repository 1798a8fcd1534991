//! Pipeline stages shared by the CLI handlers.
//!
//! Read (in parallel) → merge or diff → encode → write. Errors are
//! `anyhow` here, with the offending path in the context chain.

mod output;
mod parse;

pub use output::{render_bom, write_bom, write_output, OutputTarget};
pub use parse::{parse_bom_with_context, parse_boms_parallel, read_bom, ParsedBom};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success (or no changes detected)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected and `--fail-on-change` was set
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_values() {
        assert_eq!(exit_codes::SUCCESS, 0);
        assert_eq!(exit_codes::CHANGES_DETECTED, 1);
        assert_eq!(exit_codes::ERROR, 3);
    }
}
