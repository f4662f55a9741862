use anyhow::Context;
use argh::FromArgs;
use shell_dispatch::{BuiltinRegistry, Dispatcher, Environment, Repl};
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Variable holding the log filter, e.g. `SHELL_LOG=debug`.
const LOG_ENV: &str = "SHELL_LOG";

#[derive(FromArgs)]
/// A minimal interactive shell with a handful of builtins.
struct Options {
    #[argh(option, default = "String::from(\"$ \")")]
    /// prompt shown before each line
    prompt: String,

    #[argh(option, short = 'c')]
    /// run a single command line and exit with its status
    command: Option<String>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let options: Options = argh::from_env();

    let dispatcher = Dispatcher::new(BuiltinRegistry::default(), Environment::new());
    let repl = Repl::new(dispatcher, options.prompt);

    let code = match options.command {
        Some(line) => repl.run_line(&line, &mut std::io::stdout()),
        None => repl
            .run_interactive()
            .context("failed to start the line editor")?,
    };
    std::io::stdout().flush()?;
    std::process::exit(code)
}
