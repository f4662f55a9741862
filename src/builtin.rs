use crate::command::{Builtin, Context, Flow};
use crate::error::BuiltinError;
use crate::path_resolver;
use std::collections::BTreeMap;
use std::env;
use std::io::{self, ErrorKind};
use std::path::PathBuf;

/// Fixed mapping from command name to builtin.
///
/// Built once before the first dispatch and never changed afterwards. The
/// dispatcher consults it before searching `PATH`, so a builtin can never be
/// shadowed by an executable of the same name.
pub struct BuiltinRegistry {
    builtins: BTreeMap<&'static str, Box<dyn Builtin>>,
}

impl BuiltinRegistry {
    /// Create a registry from a custom set of builtins. A later entry with the
    /// same name replaces an earlier one.
    pub fn new(builtins: Vec<Box<dyn Builtin>>) -> Self {
        Self {
            builtins: builtins.into_iter().map(|b| (b.name(), b)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Builtin> {
        self.builtins.get(name).map(|b| b.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builtins.keys().copied()
    }
}

impl Default for BuiltinRegistry {
    /// The shell's builtins: `cd`, `echo`, `exit`, `pwd`, `type`.
    fn default() -> Self {
        Self::new(vec![
            Box::new(Cd),
            Box::new(Echo),
            Box::new(Exit),
            Box::new(Pwd),
            Box::new(Type),
        ])
    }
}

/// End the shell with status 0. Arguments are ignored.
pub struct Exit;

impl Builtin for Exit {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn execute(&self, _args: &[String], _ctx: &mut Context<'_>) -> Result<Flow, BuiltinError> {
        Ok(Flow::Exit(0))
    }
}

/// Write the arguments separated by single spaces, then a newline.
pub struct Echo;

impl Builtin for Echo {
    fn name(&self) -> &'static str {
        "echo"
    }

    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, BuiltinError> {
        writeln!(ctx.stdout, "{}", args.join(" "))?;
        Ok(Flow::Continue)
    }
}

/// Report how each name would be interpreted if typed as a command.
pub struct Type;

impl Builtin for Type {
    fn name(&self) -> &'static str {
        "type"
    }

    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, BuiltinError> {
        for name in args {
            if ctx.builtins.contains(name) {
                writeln!(ctx.stdout, "{name} is a shell builtin")?;
            } else if let Some(path) = path_resolver::resolve(ctx.env, name) {
                writeln!(ctx.stdout, "{name} is {}", path.display())?;
            } else {
                writeln!(ctx.stdout, "{name}: not found")?;
            }
        }
        Ok(Flow::Continue)
    }
}

/// Print the current working directory.
pub struct Pwd;

impl Builtin for Pwd {
    fn name(&self) -> &'static str {
        "pwd"
    }

    fn execute(&self, _args: &[String], ctx: &mut Context<'_>) -> Result<Flow, BuiltinError> {
        let dir = env::current_dir().map_err(BuiltinError::WorkingDir)?;
        writeln!(ctx.stdout, "{}", dir.display())?;
        Ok(Flow::Continue)
    }
}

/// Change the current working directory.
///
/// With no target, or with `~`, changes to `$HOME`. A leading `~/` is
/// expanded the same way.
pub struct Cd;

/// User-facing text for the `cd` failures we tell apart. Kinds not listed
/// fall back to the OS error text.
const CD_FAILURES: &[(ErrorKind, &str)] = &[
    (ErrorKind::NotFound, "No such file or directory"),
    (ErrorKind::NotADirectory, "Not a directory"),
    (ErrorKind::PermissionDenied, "Permission Denied"),
];

fn describe_cd_failure(err: &io::Error) -> String {
    CD_FAILURES
        .iter()
        .find(|(kind, _)| *kind == err.kind())
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| err.to_string())
}

impl Cd {
    fn target(args: &[String], ctx: &Context<'_>) -> Result<(String, PathBuf), BuiltinError> {
        let shown = match args.first() {
            Some(arg) => arg.clone(),
            None => "~".to_string(),
        };
        let path = if shown == "~" {
            ctx.env.home_dir().ok_or(BuiltinError::HomeNotSet)?
        } else if let Some(rest) = shown.strip_prefix("~/") {
            ctx.env.home_dir().ok_or(BuiltinError::HomeNotSet)?.join(rest)
        } else {
            PathBuf::from(&shown)
        };
        Ok((shown, path))
    }
}

impl Builtin for Cd {
    fn name(&self) -> &'static str {
        "cd"
    }

    fn execute(&self, args: &[String], ctx: &mut Context<'_>) -> Result<Flow, BuiltinError> {
        let (shown, path) = Self::target(args, ctx)?;
        env::set_current_dir(&path).map_err(|err| BuiltinError::ChangeDir {
            reason: describe_cd_failure(&err),
            target: shown,
        })?;
        Ok(Flow::Continue)
    }
}
