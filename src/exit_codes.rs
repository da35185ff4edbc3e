//! Exit codes for the ctx binary.
//!
//! Every failure exits with the same status so scripts only need to check
//! for zero.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CtxExitCode {
    /// Success (0) - Command completed successfully
    Success = 0,

    /// Failure (1) - Any error, including usage errors
    Failure = 1,
}

impl CtxExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<CtxExitCode> for i32 {
    fn from(code: CtxExitCode) -> Self {
        code.code()
    }
}
