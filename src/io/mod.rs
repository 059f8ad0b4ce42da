//! Input/Output handling for the CLI.
//!
//! This module provides:
//! - Process exit codes
//! - The pipeline diagnostics reporter (stdout notices, stderr variables)

pub mod exit_code;
pub mod reporter;

pub use exit_code::ExitCode;
pub use reporter::PipelineReporter;
