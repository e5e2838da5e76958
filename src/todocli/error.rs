use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("could not open store at {}: {reason}", path.display())]
    OpenFailure { path: PathBuf, reason: String },

    #[error("data corruption: {0}")]
    DataCorruption(String),

    #[error("write failed: {0}")]
    WriteFailure(String),

    #[error("{0}")]
    Usage(String),

    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl TodoError {
    pub(crate) fn open_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        TodoError::OpenFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write_failure(what: &str, err: impl std::fmt::Display) -> Self {
        TodoError::WriteFailure(format!("{what}: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_error_displays_guidance_verbatim() {
        let err = TodoError::Usage("please select a todolist item.".into());
        assert_eq!(err.to_string(), "please select a todolist item.");
    }

    #[test]
    fn open_failure_names_the_path() {
        let err = TodoError::open_failure("/tmp/x.db", "database is locked");
        assert_eq!(
            err.to_string(),
            "could not open store at /tmp/x.db: database is locked"
        );
    }
}
