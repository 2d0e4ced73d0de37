//! Shared test utilities for tests that need a real git repository.
//!
//! Provides RepoGuard for creating temporary test repositories and a fake
//! diff viewer that records how it was invoked.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Global lock for tests that change the current working directory.
/// Prevents concurrent tests from interfering with each other.
pub fn cwd_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Run a git command in a directory.
pub fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .current_dir(dir)
        .args(args)
        .status()
        .expect("failed to spawn git");
    assert!(status.success(), "git command failed: {:?}", args);
}

/// RAII guard for a temporary git repository.
/// Creates a git repo, changes to it, and cleans up on drop.
pub struct RepoGuard {
    _lock: MutexGuard<'static, ()>,
    _temp: tempfile::TempDir,
    pub dir: PathBuf,
    original: PathBuf,
}

impl RepoGuard {
    /// Create a new temporary git repository with an initial commit of
    /// `README.md` containing `hello\n`.
    pub fn new() -> Self {
        // Handle poisoned mutex (from previous panics in tests)
        let lock = match cwd_lock().lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let original = env::current_dir().expect("failed to get cwd");
        let temp = tempfile::Builder::new()
            .prefix("chdiff-test")
            .tempdir()
            .expect("failed to create temp dir");
        let dir = temp.path().to_path_buf();

        git(&dir, &["init", "-q"]);
        git(&dir, &["config", "user.email", "test@example.com"]);
        git(&dir, &["config", "user.name", "Test User"]);
        git(&dir, &["config", "commit.gpgsign", "false"]);
        git(&dir, &["config", "color.ui", "false"]);
        fs::write(dir.join("README.md"), "hello\n").expect("failed to write file");
        git(&dir, &["add", "."]);
        git(&dir, &["commit", "-q", "-m", "init"]);

        env::set_current_dir(&dir).expect("failed to set cwd");

        Self {
            _lock: lock,
            _temp: temp,
            dir,
            original,
        }
    }

    /// Write `content` to `name` and commit it.
    pub fn commit_file(&self, name: &str, content: &str, message: &str) {
        let path = self.dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(&path, content).expect("failed to write file");
        git(&self.dir, &["add", name]);
        git(&self.dir, &["commit", "-q", "-m", message]);
    }
}

impl Drop for RepoGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.original);
    }
}

/// A shell script standing in for `chdiff` that appends its argv, one
/// argument per line followed by `--`, to `log`.
#[cfg(unix)]
pub fn fake_viewer(dir: &Path, log: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-chdiff");
    let body = format!(
        "#!/bin/sh\nfor arg in \"$@\"; do echo \"$arg\" >> '{}'; done\necho -- >> '{}'\n",
        log.display(),
        log.display()
    );
    fs::write(&script, body).expect("failed to write fake viewer");
    let mut perms = fs::metadata(&script).expect("stat fake viewer").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script, perms).expect("chmod fake viewer");
    script
}

/// Invocations recorded by [`fake_viewer`], one `Vec` of arguments per call.
pub fn viewer_calls(log: &Path) -> Vec<Vec<String>> {
    let Ok(text) = fs::read_to_string(log) else {
        return Vec::new();
    };

    let mut calls = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line == "--" {
            calls.push(std::mem::take(&mut current));
        } else {
            current.push(line.to_string());
        }
    }
    calls
}
