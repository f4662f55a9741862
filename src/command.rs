use crate::builtin::BuiltinRegistry;
use crate::env::Environment;
use crate::error::BuiltinError;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// What the read loop should do once a builtin has returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop the loop and end the process with this code.
    Exit(ExitCode),
}

/// State a builtin runs against.
///
/// Builtins write to `stdout` rather than to the process's standard output so
/// their output can be captured. `builtins` is the registry the builtin was
/// looked up in, for builtins like `type` that need to know their siblings.
pub struct Context<'a> {
    pub stdout: &'a mut dyn Write,
    pub env: &'a Environment,
    pub builtins: &'a BuiltinRegistry,
}

/// A command implemented inside the shell process itself.
///
/// Builtins are registered once in a [`BuiltinRegistry`] and never spawned as
/// a child process. Arguments arrive exactly as tokenized; there is no option
/// parsing.
pub trait Builtin {
    /// Canonical name of the command, e.g. "echo" or "cd".
    fn name(&self) -> &'static str;

    /// Executes the command.
    ///
    /// An `Err` is recoverable: the dispatcher reports it and carries on.
    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, BuiltinError>;
}
