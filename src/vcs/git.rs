use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use super::backend::{VcsBackend, VcsError};
use super::status::{
    classify_status, first_line, sniff_failure, Membership, FETCH_FAILURE_MARKERS,
};
use crate::revision::Revision;

/// Git backend using git CLI commands.
pub struct GitBackend {
    program: String,
}

impl GitBackend {
    pub fn new(program: impl Into<String>) -> Self {
        GitBackend {
            program: program.into(),
        }
    }

    fn run_git<I, S>(&self, args: I) -> Result<Output, VcsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args);
        log::debug!("running {:?}", command);

        let output = command.output().map_err(|source| VcsError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        log::debug!("{} exited with {}", self.program, output.status);

        Ok(output)
    }
}

impl Default for GitBackend {
    fn default() -> Self {
        Self::new("git")
    }
}

impl VcsBackend for GitBackend {
    fn status(&self, path: &Path) -> Result<Membership, VcsError> {
        // Root-relative paths in the report, so they can go straight into `rev:path`.
        let output = self.run_git([
            OsStr::new("-c"),
            OsStr::new("status.relativePaths=false"),
            OsStr::new("status"),
            path.as_os_str(),
        ])?;

        let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stdout));

        Ok(classify_status(&text, output.status.success(), path))
    }

    fn show(&self, revision: &Revision, path: &Path) -> Result<Vec<u8>, VcsError> {
        let object = revision.object_name(path);
        let output = self.run_git(["show", object.as_str()])?;

        // git show has exited 0 on a bad revision in some versions; trust the text.
        if let Some(line) = sniff_failure(&output, &FETCH_FAILURE_MARKERS) {
            return Err(VcsError::FetchFailed {
                object,
                first_line: line,
            });
        }

        if !output.status.success() {
            let first_line =
                first_line(&output.stderr).unwrap_or_else(|| output.status.to_string());
            return Err(VcsError::FetchFailed { object, first_line });
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vcs::test_utils::{git, RepoGuard};
    use std::fs;

    #[test]
    fn test_show_returns_exact_bytes() {
        let _repo = RepoGuard::new();
        let backend = GitBackend::default();

        let content = backend
            .show(&"HEAD".parse().unwrap(), Path::new("README.md"))
            .expect("should show file");
        assert_eq!(content, b"hello\n");
    }

    #[test]
    fn test_show_previous_revision() {
        let repo = RepoGuard::new();
        repo.commit_file("notes.txt", "hello\n", "add notes");
        repo.commit_file("notes.txt", "hello\nworld\n", "extend notes");
        let backend = GitBackend::default();

        let content = backend
            .show(&"HEAD~1".parse().unwrap(), Path::new("notes.txt"))
            .expect("should show previous revision");
        assert_eq!(content, b"hello\n");
    }

    #[test]
    fn test_show_preserves_binary_content() {
        let repo = RepoGuard::new();
        let bytes: Vec<u8> = vec![0, 159, 146, 150, b'\r', b'\n', 255];
        fs::write(repo.dir.join("blob.bin"), &bytes).unwrap();
        git(&repo.dir, &["add", "blob.bin"]);
        git(&repo.dir, &["commit", "-m", "binary"]);

        let backend = GitBackend::default();
        let content = backend
            .show(&"HEAD".parse().unwrap(), Path::new("blob.bin"))
            .expect("should show binary file");
        assert_eq!(content, bytes);
    }

    #[test]
    fn test_show_invalid_revision_fails() {
        let _repo = RepoGuard::new();
        let backend = GitBackend::default();

        let result = backend.show(
            &"nonexistent12345".parse().unwrap(),
            Path::new("README.md"),
        );
        match result {
            Err(VcsError::FetchFailed { object, first_line }) => {
                assert_eq!(object, "nonexistent12345:README.md");
                assert!(first_line.starts_with("fatal:"), "got: {first_line}");
            }
            other => panic!("Expected FetchFailed, got: {:?}", other),
        }
    }

    #[test]
    fn test_show_missing_path_fails() {
        let _repo = RepoGuard::new();
        let backend = GitBackend::default();

        let result = backend.show(&"HEAD".parse().unwrap(), Path::new("nonexistent.txt"));
        assert!(matches!(result, Err(VcsError::FetchFailed { .. })));
    }

    #[test]
    fn test_status_modified_file_is_tracked() {
        let repo = RepoGuard::new();
        fs::write(repo.dir.join("README.md"), "changed\n").unwrap();
        let backend = GitBackend::default();

        let membership = backend.status(Path::new("README.md")).expect("status");
        assert_eq!(
            membership,
            Membership::Tracked {
                canonical: "README.md".into()
            }
        );
    }

    #[test]
    fn test_status_from_subdirectory_is_root_relative() {
        let repo = RepoGuard::new();
        repo.commit_file("sub/notes.txt", "hello\n", "add notes");
        fs::write(repo.dir.join("sub/notes.txt"), "changed\n").unwrap();
        std::env::set_current_dir(repo.dir.join("sub")).unwrap();
        let backend = GitBackend::default();

        let membership = backend.status(Path::new("notes.txt")).expect("status");
        assert_eq!(
            membership,
            Membership::Tracked {
                canonical: "sub/notes.txt".into()
            }
        );

        let content = backend
            .show(&"HEAD".parse().unwrap(), Path::new("sub/notes.txt"))
            .expect("root-relative object name");
        assert_eq!(content, b"hello\n");
    }

    #[test]
    fn test_status_untracked_file_is_not_tracked() {
        let repo = RepoGuard::new();
        fs::write(repo.dir.join("scratch.txt"), "scratch\n").unwrap();
        let backend = GitBackend::default();

        let membership = backend.status(Path::new("scratch.txt")).expect("status");
        assert_eq!(membership, Membership::NotTracked);
    }

    #[test]
    fn test_status_clean_file_is_unchanged() {
        let _repo = RepoGuard::new();
        let backend = GitBackend::default();

        let membership = backend.status(Path::new("README.md")).expect("status");
        assert_eq!(membership, Membership::Unchanged);
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let backend = GitBackend::new("definitely-not-a-real-vcs-binary");
        let result = backend.status(Path::new("README.md"));
        assert!(matches!(result, Err(VcsError::Spawn { .. })));
    }
}
