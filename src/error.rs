// WHY: One error type for the library so callers can tell usage mistakes,
// missing inputs and malformed annotation apart without string matching

use std::path::{Path, PathBuf};

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, TvError>;

/// Failures surfaced by detection, parsing and corpus plumbing
#[derive(Debug, thiserror::Error)]
pub enum TvError {
    /// Both or neither of the mutually exclusive inputs were supplied
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A referenced file is missing or cannot be opened
    #[error("Cannot access file {}: {source}{}", .path.display(), hint_suffix(.hint))]
    FileAccess {
        path: PathBuf,
        hint: Option<String>,
        #[source]
        source: std::io::Error,
    },

    /// Content does not follow the expected serialization
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Paired corpora have different line counts under strict pairing
    #[error("Length mismatch: {left} has {left_len} lines but {right} has {right_len}")]
    LengthMismatch {
        left: String,
        right: String,
        left_len: usize,
        right_len: usize,
    },

    /// A score file contained no values to aggregate
    #[error("No scores found in {}", .path.display())]
    EmptyScores { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_deref().map(|h| format!(". {h}")).unwrap_or_default()
}

impl TvError {
    /// Build a file-access error for `path`
    pub fn file_access(path: &Path, source: std::io::Error) -> Self {
        TvError::FileAccess {
            path: path.to_path_buf(),
            hint: None,
            source,
        }
    }

    /// Build a file-access error that names the step producing the file
    pub fn file_access_with_hint(path: &Path, source: std::io::Error, hint: impl Into<String>) -> Self {
        TvError::FileAccess {
            path: path.to_path_buf(),
            hint: Some(hint.into()),
            source,
        }
    }

    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        TvError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Classify a failed read on an opened file
    ///
    /// Undecodable bytes are a parse error at `line`; anything else means the
    /// path itself cannot be read (a directory, a revoked handle, ...).
    pub fn read_failure(path: &Path, line: usize, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::InvalidData {
            TvError::parse(line, format!("UTF-8 decoding error in {}: {source}", path.display()))
        } else {
            TvError::file_access(path, source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_access_message_includes_hint() {
        let err = TvError::file_access_with_hint(
            Path::new("out.bleurt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            "Run BLEURT scoring first",
        );
        let message = err.to_string();
        assert!(message.contains("out.bleurt"));
        assert!(message.ends_with("Run BLEURT scoring first"));
    }

    #[test]
    fn test_file_access_message_without_hint() {
        let err = TvError::file_access(
            Path::new("corpus.txt"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert_eq!(err.to_string(), "Cannot access file corpus.txt: not found");
    }

    #[test]
    fn test_read_failure_kinds() {
        let path = Path::new("corpus.txt");
        let bad_bytes = std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        assert!(matches!(TvError::read_failure(path, 3, bad_bytes), TvError::Parse { line: 3, .. }));

        let is_dir = std::io::Error::other("Is a directory");
        match TvError::read_failure(path, 1, is_dir) {
            TvError::FileAccess { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("expected file access error, got {other:?}"),
        }
    }
}
