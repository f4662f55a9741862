//! A minimal interactive shell: command resolution and dispatch.
//!
//! Each input line is split on whitespace. The first word is looked up in a
//! fixed [`BuiltinRegistry`] and, failing that, searched for on `PATH`; the
//! rest of the words become its arguments. External programs are started with
//! the shell's own standard streams and waited for before the next prompt.
//!
//! The main entry points are [`Dispatcher`], which runs one command, and
//! [`Repl`], which drives it from a line source. The public modules
//! [`command`] and [`env`] expose the traits and types needed to write your
//! own builtins.

mod builtin;
pub mod command;
mod dispatcher;
pub mod env;
pub mod error;
mod launcher;
pub mod path_resolver;
mod repl;

pub use builtin::BuiltinRegistry;
pub use dispatcher::{Dispatcher, Outcome};
pub use env::Environment;
pub use launcher::{Launch, launch};
pub use repl::{INPUT_ERROR_EXIT_CODE, LineSource, Repl};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Serializes tests that read or change the process working directory.
    pub fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
