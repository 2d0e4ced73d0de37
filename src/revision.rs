use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// The revision `git show` resolves the old side of the diff from.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Revision(String);

#[derive(Debug, Error)]
pub enum RevisionParseError {
    #[error("empty revision string")]
    Empty,
}

impl Revision {
    /// The commit immediately before the current checkout.
    pub fn previous_commit() -> Self {
        Revision("HEAD~1".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the `<rev>:<path>` object name used by `git show`.
    pub fn object_name(&self, path: &Path) -> String {
        format!("{}:{}", self.0, path.display())
    }
}

impl Default for Revision {
    fn default() -> Self {
        Self::previous_commit()
    }
}

impl FromStr for Revision {
    type Err = RevisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RevisionParseError::Empty);
        }

        Ok(Revision(s.to_string()))
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
