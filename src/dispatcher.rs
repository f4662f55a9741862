use crate::builtin::BuiltinRegistry;
use crate::command::{Context, ExitCode, Flow};
use crate::env::Environment;
use crate::launcher::{self, Launch};
use crate::path_resolver;
use std::fmt::Display;
use std::io::Write;
use std::path;

/// Which branch one dispatch cycle took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank line; nothing ran.
    Empty,
    /// The command was given as a path, which we do not run.
    DirectPath,
    /// A builtin ran to completion.
    Builtin(Flow),
    /// A builtin reported a failure.
    BuiltinFailed,
    /// An external command ran and exited with status 0.
    External,
    /// An external command could not be run or did not succeed.
    LaunchFailed(ExitCode),
    /// Neither a builtin nor found on `PATH`.
    NotFound,
}

impl Outcome {
    /// What the read loop should do next. Only `exit` stops it.
    pub fn flow(&self) -> Flow {
        match self {
            Outcome::Builtin(flow) => *flow,
            _ => Flow::Continue,
        }
    }

    /// Shell-style status of the cycle.
    pub fn status(&self) -> ExitCode {
        match self {
            Outcome::Empty | Outcome::External => 0,
            Outcome::Builtin(Flow::Continue) => 0,
            Outcome::Builtin(Flow::Exit(code)) => *code,
            Outcome::DirectPath | Outcome::BuiltinFailed => 1,
            Outcome::LaunchFailed(code) => *code,
            Outcome::NotFound => 127,
        }
    }
}

/// Decides, for one typed command, whether to run a builtin, launch an
/// external program, or report failure.
///
/// Builtins are always checked before `PATH`. Every failure is reported on
/// the writer passed in and recovered from; none of them escape a call to
/// [`Dispatcher::dispatch`].
pub struct Dispatcher {
    builtins: BuiltinRegistry,
    env: Environment,
}

impl Dispatcher {
    pub fn new(builtins: BuiltinRegistry, env: Environment) -> Self {
        Self { builtins, env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Split `line` on whitespace and dispatch the first word with the rest
    /// as arguments.
    pub fn dispatch_line(&self, line: &str, out: &mut dyn Write) -> Outcome {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Outcome::Empty;
        };
        let args: Vec<String> = words.map(str::to_string).collect();
        self.dispatch(command, &args, out)
    }

    /// Run one command cycle.
    pub fn dispatch(&self, command: &str, args: &[String], out: &mut dyn Write) -> Outcome {
        if command.is_empty() {
            return Outcome::Empty;
        }

        if command.contains(path::is_separator) {
            report(out, format_args!("{command}: direct paths not implemented"));
            return Outcome::DirectPath;
        }

        if let Some(builtin) = self.builtins.get(command) {
            tracing::debug!(command, ?args, "running builtin");
            let mut ctx = Context {
                stdout: &mut *out,
                env: &self.env,
                builtins: &self.builtins,
            };
            return match builtin.execute(args, &mut ctx) {
                Ok(flow) => Outcome::Builtin(flow),
                Err(err) => {
                    tracing::debug!(command, error = ?err, "builtin failed");
                    report(out, err);
                    Outcome::BuiltinFailed
                }
            };
        }

        let Some(program) = path_resolver::resolve(&self.env, command) else {
            tracing::debug!(command, "not found on PATH");
            report(out, format_args!("{command}: command not found"));
            return Outcome::NotFound;
        };

        // The child writes straight to the terminal; anything we buffered has
        // to go out first.
        if let Err(err) = out.flush() {
            tracing::warn!(error = %err, "failed to flush output before launch");
        }
        match launcher::launch(&Launch::new(command, program, args)) {
            Ok(()) => Outcome::External,
            Err(err) => {
                tracing::debug!(command, error = ?err, "launch failed");
                report(out, &err);
                Outcome::LaunchFailed(err.status())
            }
        }
    }
}

/// Print a diagnostic line. A failure to print is logged, never raised.
fn report(out: &mut dyn Write, message: impl Display) {
    if let Err(err) = writeln!(out, "{message}") {
        tracing::warn!(error = %err, "failed to write diagnostic");
    }
}
