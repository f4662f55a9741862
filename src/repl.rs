use crate::command::{ExitCode, Flow};
use crate::dispatcher::Dispatcher;
use crate::error::InputError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

/// Exit code used when input ends or cannot be read.
pub const INPUT_ERROR_EXIT_CODE: ExitCode = 1;

/// Where the read loop gets its lines from.
pub trait LineSource {
    /// Show `prompt` and read one line.
    ///
    /// `Ok(None)` means the line was abandoned (e.g. Ctrl-C at the prompt) and
    /// the loop should simply prompt again.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, InputError>;
}

impl LineSource for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, InputError> {
        match self.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) => Ok(None),
            Err(ReadlineError::Eof) => Err(InputError::Eof),
            Err(err) => Err(InputError::Read(err)),
        }
    }
}

/// The interactive loop: prompt, read a line, dispatch it, repeat.
///
/// Example
/// ```
/// use shell_dispatch::{BuiltinRegistry, Dispatcher, Environment, Repl};
/// let repl = Repl::new(
///     Dispatcher::new(BuiltinRegistry::default(), Environment::new()),
///     "$ ",
/// );
/// let mut out = Vec::new();
/// assert_eq!(repl.run_line("echo hello world", &mut out), 0);
/// assert_eq!(out, b"hello world\n");
/// ```
pub struct Repl {
    dispatcher: Dispatcher,
    prompt: String,
}

impl Repl {
    pub fn new(dispatcher: Dispatcher, prompt: impl Into<String>) -> Self {
        Self {
            dispatcher,
            prompt: prompt.into(),
        }
    }

    /// Read and dispatch lines until `exit` or the end of input.
    ///
    /// Returns the code the process should exit with: the one `exit` asked
    /// for, or [`INPUT_ERROR_EXIT_CODE`] when input ends or fails.
    pub fn run(&self, source: &mut impl LineSource, out: &mut dyn Write) -> ExitCode {
        loop {
            let line = match source.read_line(&self.prompt) {
                Ok(Some(line)) => line,
                Ok(None) => continue,
                Err(err) => {
                    tracing::debug!(error = %err, "input closed");
                    return INPUT_ERROR_EXIT_CODE;
                }
            };
            let outcome = self.dispatcher.dispatch_line(&line, out);
            tracing::trace!(?outcome, "dispatched");
            if let Flow::Exit(code) = outcome.flow() {
                return code;
            }
        }
    }

    /// Run the interactive loop on the terminal.
    pub fn run_interactive(&self) -> Result<ExitCode, InputError> {
        let mut editor = DefaultEditor::new()?;
        Ok(self.run(&mut editor, &mut std::io::stdout()))
    }

    /// Dispatch a single line and return its status.
    pub fn run_line(&self, line: &str, out: &mut dyn Write) -> ExitCode {
        self.dispatcher.dispatch_line(line, out).status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::BuiltinRegistry;
    use crate::env::Environment;
    use std::collections::VecDeque;

    /// Scripted input. `None` entries stand for an interrupted line.
    struct Scripted {
        lines: VecDeque<Option<&'static str>>,
        prompts: usize,
    }

    impl Scripted {
        fn new(lines: &[Option<&'static str>]) -> Self {
            Self {
                lines: lines.iter().copied().collect(),
                prompts: 0,
            }
        }
    }

    impl LineSource for Scripted {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>, InputError> {
            assert_eq!(prompt, "$ ");
            self.prompts += 1;
            match self.lines.pop_front() {
                Some(line) => Ok(line.map(str::to_string)),
                None => Err(InputError::Eof),
            }
        }
    }

    fn repl() -> Repl {
        let mut env = Environment::new();
        env.set_var("PATH", "/definitely/not/a/dir");
        Repl::new(Dispatcher::new(BuiltinRegistry::default(), env), "$ ")
    }

    #[test]
    fn exit_stops_the_loop_with_code_zero() {
        let mut input = Scripted::new(&[Some("echo one"), Some("exit"), Some("echo two")]);
        let mut out = Vec::new();

        assert_eq!(repl().run(&mut input, &mut out), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "one\n");
        assert_eq!(input.lines.len(), 1, "lines after exit are not read");
    }

    #[test]
    fn end_of_input_exits_with_one() {
        let mut input = Scripted::new(&[Some("echo hi")]);
        let mut out = Vec::new();

        assert_eq!(repl().run(&mut input, &mut out), INPUT_ERROR_EXIT_CODE);
        assert_eq!(String::from_utf8(out).unwrap(), "hi\n");
    }

    #[test]
    fn failures_and_blank_lines_do_not_stop_the_loop() {
        let mut input = Scripted::new(&[
            Some(""),
            Some("nope"),
            None,
            Some("cd /definitely/not/a/dir"),
            Some("./local"),
            Some("echo still here"),
            Some("exit"),
        ]);
        let mut out = Vec::new();

        assert_eq!(repl().run(&mut input, &mut out), 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "nope: command not found\n\
             cd: /definitely/not/a/dir: No such file or directory\n\
             ./local: direct paths not implemented\n\
             still here\n"
        );
        assert_eq!(input.prompts, 7);
    }

    #[test]
    fn run_line_reports_status() {
        let repl = repl();
        let mut out = Vec::new();
        assert_eq!(repl.run_line("echo", &mut out), 0);
        assert_eq!(repl.run_line("missing", &mut out), 127);
        assert_eq!(repl.run_line("/bin/true", &mut out), 1);
    }
}
