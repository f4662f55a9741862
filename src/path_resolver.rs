use crate::env::Environment;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve a bare command name against the search path.
///
/// Directories are tried in `PATH` order and the first one holding an
/// executable, non-directory entry called `name` wins. Directories that do not
/// exist or cannot be read are skipped. Returns `None` when nothing matches.
///
/// `PATH` is read from `env` on every call.
pub fn resolve(env: &Environment, name: &str) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }
    find_in_path(&env.search_path(), name)
}

/// Search the given directories in order for `name`.
pub fn find_in_path(dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    for dir in dirs {
        let candidate = dir.join(name);
        if is_executable(&candidate) {
            return Some(candidate);
        }
        tracing::trace!(candidate = %candidate.display(), "no executable here");
    }
    None
}

/// Whether `path` names something we may launch: `stat` succeeds (symlinks
/// followed), it is not a directory, and at least one execute bit is set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match fs::metadata(path) {
        Ok(metadata) => !metadata.is_dir() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// Without permission bits the best we can check is that it is a plain file.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|metadata| metadata.is_file())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, mode: u32) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).expect("create file");
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod");
        path
    }

    fn env_with_path(dirs: &[&Path]) -> Environment {
        let joined = std::env::join_paths(dirs).expect("join paths");
        let mut env = Environment::new();
        env.set_var("PATH", joined.to_string_lossy().to_string());
        env
    }

    #[test]
    fn finds_sh_in_bin() {
        let env = env_with_path(&[Path::new("/bin")]);
        let found = resolve(&env, "sh").expect("Expected to find 'sh' in /bin via PATH search");
        assert_eq!(found, PathBuf::from("/bin/sh"));
    }

    #[test]
    fn not_found_in_path() {
        let env = env_with_path(&[Path::new("/bin")]);
        assert!(resolve(&env, "nonexisting_command_for_resolver_test").is_none());
    }

    #[test]
    fn empty_name_is_none() {
        let env = env_with_path(&[Path::new("/bin")]);
        assert!(resolve(&env, "").is_none());
    }

    #[test]
    fn first_match_wins() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        let expected = touch(first.path(), "tool", 0o755);
        touch(second.path(), "tool", 0o755);

        let env = env_with_path(&[first.path(), second.path()]);
        assert_eq!(resolve(&env, "tool"), Some(expected));
    }

    #[test]
    fn skips_missing_non_executable_and_directory_entries() {
        let missing = TempDir::new().unwrap();
        let plain = TempDir::new().unwrap();
        let dir_entry = TempDir::new().unwrap();
        let good = TempDir::new().unwrap();

        touch(plain.path(), "tool", 0o644);
        fs::create_dir(dir_entry.path().join("tool")).unwrap();
        let expected = touch(good.path(), "tool", 0o700);

        let env = env_with_path(&[
            missing.path(),
            plain.path(),
            dir_entry.path(),
            good.path(),
        ]);
        assert_eq!(resolve(&env, "tool"), Some(expected));
    }

    #[test]
    fn any_execute_bit_qualifies() {
        for mode in [0o100, 0o010, 0o001] {
            let dir = TempDir::new().unwrap();
            let expected = touch(dir.path(), "tool", 0o600 | mode);
            let env = env_with_path(&[dir.path()]);
            assert_eq!(resolve(&env, "tool"), Some(expected), "mode {mode:o}");
        }
    }

    #[test]
    fn nonexistent_directories_are_skipped_silently() {
        let env = env_with_path(&[Path::new("/definitely/not/a/dir"), Path::new("/bin")]);
        assert_eq!(resolve(&env, "sh"), Some(PathBuf::from("/bin/sh")));
    }

    #[test]
    fn path_changes_are_seen_on_next_lookup() {
        let dir = TempDir::new().unwrap();
        let expected = touch(dir.path(), "late", 0o755);

        let mut env = env_with_path(&[Path::new("/bin")]);
        assert!(resolve(&env, "late").is_none());

        env.set_var("PATH", dir.path().to_string_lossy().to_string());
        assert_eq!(resolve(&env, "late"), Some(expected));
    }
}
