use crate::error::LaunchError;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

/// Everything needed to start one external command.
///
/// `display_name` becomes the child's argv[0]. It is the name the user
/// typed, which is not necessarily the file name of `program`. Only Unix
/// lets us choose argv[0]; elsewhere the child sees the platform default.
#[derive(Debug, Clone)]
pub struct Launch {
    pub display_name: String,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Launch {
    pub fn new(
        display_name: impl Into<String>,
        program: impl Into<PathBuf>,
        args: &[String],
    ) -> Self {
        Self {
            display_name: display_name.into(),
            program: program.into(),
            args: args.to_vec(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&self.display_name);
        }
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

/// Start the child with the parent's standard streams and block until it
/// exits. Anything other than a zero exit status is an error.
pub fn launch(spec: &Launch) -> Result<(), LaunchError> {
    tracing::debug!(
        name = %spec.display_name,
        program = %spec.program.display(),
        args = ?spec.args,
        "spawning"
    );
    let mut child = spec.command().spawn().map_err(|source| LaunchError::Spawn {
        name: spec.display_name.clone(),
        program: spec.program.clone(),
        source,
    })?;
    let exit_status = child.wait().map_err(|source| LaunchError::Wait {
        name: spec.display_name.clone(),
        source,
    })?;
    check_status(&spec.display_name, exit_status)
}

fn check_status(name: &str, exit_status: ExitStatus) -> Result<(), LaunchError> {
    match exit_status.code() {
        Some(0) => Ok(()),
        Some(code) => Err(LaunchError::Status {
            name: name.to_string(),
            code,
        }),
        None => Err(terminated_by_signal(name, exit_status)),
    }
}

#[cfg(unix)]
fn terminated_by_signal(name: &str, exit_status: ExitStatus) -> LaunchError {
    use std::os::unix::process::ExitStatusExt;
    match exit_status.signal() {
        Some(signal) => LaunchError::Signal {
            name: name.to_string(),
            signal,
        },
        None => LaunchError::Status {
            name: name.to_string(),
            code: -1,
        },
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(name: &str, _exit_status: ExitStatus) -> LaunchError {
    LaunchError::Status {
        name: name.to_string(),
        code: -1,
    }
}
