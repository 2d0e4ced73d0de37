use std::path::{Path, PathBuf};
use std::process::Output;

/// First-line prefixes that mean `git status` rejected the path.
pub const NOT_TRACKED_MARKERS: [&str; 2] = ["error:", "fatal:"];

/// First-line prefixes that mean `git show` could not produce the object.
pub const FETCH_FAILURE_MARKERS: [&str; 2] = ["fatal:", "error:"];

/// Separator between the change label and the path in `git status` output,
/// e.g. `modified:   src/lib.rs`.
///
/// Paths that themselves contain three consecutive spaces are split in the
/// wrong place, and a path is matched by suffix, so `a.txt` also matches a
/// `data.txt` line. Known limitations, left as is. Lines before the first
/// section header (`On branch main`, ...) are never matched.
pub const STATUS_PATH_DELIMITER: &str = "   ";

const UNTRACKED_HEADER: &str = "Untracked files:";

/// Result of asking the VCS about a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Membership {
    Tracked { canonical: PathBuf },
    NotTracked,
    Unchanged,
}

/// First line of a byte stream, lossily decoded and with the line ending cut.
pub fn first_line(bytes: &[u8]) -> Option<String> {
    let end = bytes
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(bytes.len());
    if bytes.is_empty() {
        return None;
    }

    Some(
        String::from_utf8_lossy(&bytes[..end])
            .trim_end_matches('\r')
            .to_string(),
    )
}

/// Returns the offending first line when either stream of `output` starts
/// with one of `markers`. stderr is checked first.
pub fn sniff_failure(output: &Output, markers: &[&str]) -> Option<String> {
    [&output.stderr, &output.stdout]
        .into_iter()
        .filter_map(|stream| first_line(stream))
        .find(|line| markers.iter().any(|m| line.starts_with(m)))
}

/// Classify `git status <path>` output.
///
/// `text` is stderr followed by stdout. `success` is the exit status; old git
/// versions exit non-zero with a `# `-commented report when nothing changed.
pub fn classify_status(text: &str, success: bool, path: &Path) -> Membership {
    let first = text.lines().next().unwrap_or_default();

    if NOT_TRACKED_MARKERS.iter().any(|m| first.starts_with(m)) {
        return Membership::NotTracked;
    }

    if !success && first.starts_with("# ") {
        return Membership::Unchanged;
    }

    let wanted = path.to_string_lossy();
    let mut in_section = false;
    let mut in_untracked = false;

    for line in text.lines() {
        let line = line.trim_end();
        let body = line.trim_start_matches('#').trim();

        if !body.is_empty() && body.ends_with(':') && !body.ends_with(wanted.as_ref()) {
            in_section = true;
            in_untracked = body == UNTRACKED_HEADER;
            continue;
        }

        if in_section && line.ends_with(wanted.as_ref()) {
            if in_untracked {
                return Membership::NotTracked;
            }

            let canonical = line
                .split(STATUS_PATH_DELIMITER)
                .last()
                .unwrap_or(line)
                .trim_start_matches('#')
                .trim_start();
            return Membership::Tracked {
                canonical: PathBuf::from(canonical),
            };
        }
    }

    if text.contains("nothing to commit") {
        return Membership::Unchanged;
    }

    Membership::Tracked {
        canonical: path.to_path_buf(),
    }
}
