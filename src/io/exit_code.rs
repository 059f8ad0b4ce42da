//! Process exit codes for pipeline outcomes.
//!
//! Two codes belong to this tool: 0 when the merged configuration was
//! written, 1 for every failure it diagnoses itself (bad input, missing
//! keys, unusable lookup output, write errors). A failed `az` lookup is the
//! exception: the subprocess's own exit code is passed through untouched
//! and so never appears here (see `AgwError::exit_code`).

/// Exit codes this tool decides itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// The merged configuration was written (code 0)
    Success = 0,

    /// A fatal error diagnosed by this tool (code 1)
    GeneralError = 1,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}
