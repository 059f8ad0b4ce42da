//! Diagnostics reporter for the generation pipeline.
//!
//! Carries the two user-facing channels of the external contract: human
//! readable `[=]`/`[-]` lines on stdout and Azure DevOps logging commands
//! (`##vso[task.setvariable ...]`) on stderr, where an orchestrating
//! pipeline picks them up as output variables. The writers are injected so
//! the validator and builders can be tested without a CI host attached.

use serde_json::Value;
use std::fmt::Display;
use std::io::{self, Write};

/// Prefix for informational notices.
const NOTICE_PREFIX: &str = "[=]";
/// Prefix for fatal messages.
const ERROR_PREFIX: &str = "[-]";

/// Writes pipeline diagnostics to a pair of output channels.
pub struct PipelineReporter {
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl PipelineReporter {
    /// Create a reporter bound to the process's stdout and stderr.
    pub fn new() -> Self {
        Self {
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Create a reporter with custom writers.
    ///
    /// Tests pass `Vec<u8>` buffers here to capture both channels.
    pub fn with_writers(stdout: Box<dyn Write>, stderr: Box<dyn Write>) -> Self {
        Self { stdout, stderr }
    }

    /// Create a reporter that discards everything it is given.
    pub fn sink() -> Self {
        Self {
            stdout: Box::new(io::sink()),
            stderr: Box::new(io::sink()),
        }
    }

    /// Write an informational `[=]` notice to stdout.
    pub fn notice(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.stdout, "{NOTICE_PREFIX} {message}")?;
        self.stdout.flush()
    }

    /// Write a fatal `[-]` message to stdout.
    ///
    /// Stdout, not stderr: stderr is reserved for the logging commands a CI
    /// host parses, and the pipeline this tool grew up in reads its fatal
    /// messages from the task's standard output.
    pub fn error(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.stdout, "{ERROR_PREFIX} Error: {message}")?;
        self.stdout.flush()
    }

    /// Emit an Azure DevOps output variable on stderr.
    ///
    /// Scalar strings are emitted raw so the variable round-trips without
    /// quotes; any other JSON value (the fqdns/ip_addresses lists) is
    /// emitted as compact JSON.
    pub fn set_variable(&mut self, name: &str, value: &Value) -> io::Result<()> {
        match value.as_str() {
            Some(s) => writeln!(
                self.stderr,
                "##vso[task.setvariable variable={name};isOutput=true;]{s}"
            )?,
            None => writeln!(
                self.stderr,
                "##vso[task.setvariable variable={name};isOutput=true;]{value}"
            )?,
        }
        self.stderr.flush()
    }
}

impl Default for PipelineReporter {
    fn default() -> Self {
        Self::new()
    }
}
