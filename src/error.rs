//! Error types for the configuration generator.
//!
//! One structured error enum covers the whole pipeline; every variant knows
//! the process exit code it maps to, so the CLI entry point never has to
//! guess.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

use crate::io::ExitCode;

/// Main error type for the generation pipeline.
#[derive(Error, Debug)]
pub enum AgwError {
    /// Input file errors
    #[error("File does not exist at the given path '{}'", .path.display())]
    InputFileMissing { path: PathBuf },

    #[error("Failed to read input file '{}': {source}", .path.display())]
    InputFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Input file '{}' is not a JSON object: {source}", .path.display())]
    InputFileParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Key validation errors
    #[error("You didn't provide '{key}' inside the json, which is mandatory")]
    MissingKey { key: &'static str },

    #[error("Expected '{key}' in the json to be a {expected}")]
    InvalidKeyType {
        key: &'static str,
        expected: &'static str,
    },

    /// External lookup errors
    #[error("Failed to launch '{program}': {source}")]
    GatewayLookupSpawn {
        program: &'static str,
        source: std::io::Error,
    },

    #[error("Gateway lookup failed ({status}): {stderr}")]
    GatewayLookupFailed { status: ExitStatus, stderr: String },

    #[error("Gateway lookup did not return a resource id (got {output:?})")]
    GatewayIdUnparseable { output: String },

    /// Output errors
    #[error("Failed to write '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write diagnostics: {0}")]
    DiagnosticsWrite(#[from] std::io::Error),
}

impl AgwError {
    /// Process exit code for this error.
    ///
    /// A failed gateway lookup propagates the subprocess's own exit code so
    /// pipeline steps can react to `az` failures directly; a lookup killed by
    /// a signal, and every other fatal condition, exits 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AgwError::GatewayLookupFailed { status, .. } => {
                status.code().unwrap_or_else(|| ExitCode::GeneralError.into())
            }
            _ => ExitCode::GeneralError.into(),
        }
    }
}

/// Result type alias for pipeline operations.
pub type AgwResult<T> = Result<T, AgwError>;
