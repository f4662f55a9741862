//! Error types for the recoverable failure classes of a dispatch cycle and for
//! the one fatal class, input failure.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a builtin. Never fatal: the dispatcher prints it and
/// the shell keeps going.
#[derive(Debug, Error)]
pub enum BuiltinError {
    /// `cd` could not switch to the target. `reason` is already the
    /// user-facing text picked from the classification table.
    #[error("cd: {target}: {reason}")]
    ChangeDir { target: String, reason: String },

    #[error("cd: HOME not set")]
    HomeNotSet,

    #[error("pwd: error getting working directory")]
    WorkingDir(#[source] io::Error),

    /// Writing the builtin's own output failed.
    #[error("{0}")]
    Io(#[from] io::Error),
}

/// Failure of an external command: it could not be started, could not be
/// waited for, or did not finish successfully.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{name}: error running {}: {source}", .program.display())]
    Spawn {
        name: String,
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{name}: error waiting for child: {source}")]
    Wait {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("{name}: exited with status {code}")]
    Status { name: String, code: i32 },

    #[error("{name}: terminated by signal {signal}")]
    Signal { name: String, signal: i32 },
}

impl LaunchError {
    /// Shell-style status for this failure: the child's own code, `128 + n`
    /// for a signal, and 126 when the program could not be run at all.
    pub fn status(&self) -> i32 {
        match self {
            LaunchError::Spawn { .. } | LaunchError::Wait { .. } => 126,
            LaunchError::Status { code, .. } => *code,
            LaunchError::Signal { signal, .. } => 128 + signal,
        }
    }
}

/// The line reader failed or ran dry. This is the only error that ends the
/// shell.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("end of input")]
    Eof,

    #[error("failed to read input: {0}")]
    Read(#[from] rustyline::error::ReadlineError),
}
