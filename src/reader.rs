use crate::error::{Result, TvError};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tracing::{debug, info, warn};

/// Configuration for corpus reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_size: 8192, // WHY: 8KB is optimal for most filesystems and network storage
        }
    }
}

/// Statistics for a corpus read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// How to pair two line-aligned corpora whose lengths differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairingPolicy {
    /// Log a warning and drop the unpaired tail of the longer corpus
    #[default]
    Truncate,
    /// Refuse to pair corpora of different lengths
    Strict,
}

impl PairingPolicy {
    /// Number of pairs to process for corpora named `left`/`right`
    pub fn paired_len(self, left: &str, left_len: usize, right: &str, right_len: usize) -> Result<usize> {
        if left_len == right_len {
            return Ok(left_len);
        }
        match self {
            PairingPolicy::Truncate => {
                let kept = left_len.min(right_len);
                warn!(
                    left,
                    right,
                    left_len,
                    right_len,
                    kept,
                    "Paired corpora differ in length, truncating to the shorter one"
                );
                Ok(kept)
            }
            PairingPolicy::Strict => Err(TvError::LengthMismatch {
                left: left.to_string(),
                right: right.to_string(),
                left_len,
                right_len,
            }),
        }
    }
}

/// Async line reader/writer for one-sentence-per-line corpora
pub struct CorpusReader {
    config: ReaderConfig,
}

impl CorpusReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read all lines of a UTF-8 corpus
    pub async fn read_lines<P: AsRef<Path>>(&self, file_path: P) -> Result<(Vec<String>, ReadStats)> {
        let path = file_path.as_ref();
        let file = File::open(path).await.map_err(|e| TvError::file_access(path, e))?;
        self.read_open_file(path, file).await
    }

    /// Like [`read_lines`](Self::read_lines) but a missing file reports which step produces it
    pub async fn read_lines_with_hint<P: AsRef<Path>>(
        &self,
        file_path: P,
        hint: &str,
    ) -> Result<(Vec<String>, ReadStats)> {
        let path = file_path.as_ref();
        let file = File::open(path)
            .await
            .map_err(|e| TvError::file_access_with_hint(path, e, hint))?;
        self.read_open_file(path, file).await
    }

    async fn read_open_file(&self, path: &Path, file: File) -> Result<(Vec<String>, ReadStats)> {
        let start_time = std::time::Instant::now();
        debug!("Starting async read of corpus: {}", path.display());

        let reader = BufReader::with_capacity(self.config.buffer_size, file);
        let mut lines = reader.lines();
        let mut result_lines = Vec::new();
        let mut byte_count = 0u64;

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| TvError::read_failure(path, result_lines.len() + 1, e))?
        {
            byte_count += line.len() as u64 + 1; // +1 for newline
            result_lines.push(line);
        }

        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: result_lines.len() as u64,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Read {}: {} lines, {} bytes in {}ms",
            stats.file_path, stats.lines_read, stats.bytes_read, stats.duration_ms
        );
        Ok((result_lines, stats))
    }

    /// Write lines, each terminated by a newline
    pub async fn write_lines<P, S>(&self, file_path: P, lines: &[S]) -> Result<()>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let path = file_path.as_ref();
        let file = File::create(path).await.map_err(|e| TvError::file_access(path, e))?;
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, file);

        for line in lines {
            writer.write_all(line.as_ref().as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }

        writer.flush().await?;
        debug!("Wrote {} lines to {}", lines.len(), path.display());
        Ok(())
    }
}

impl Default for CorpusReader {
    fn default() -> Self {
        Self::new(ReaderConfig::default())
    }
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split text into lines on every Unicode line boundary
///
/// Besides `\n` and `\r\n` this breaks on a lone `\r`, vertical tab, form feed,
/// the information separators, NEL and the Unicode line/paragraph separators.
/// A trailing boundary does not produce an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Convenience function for reading a corpus with default configuration
pub async fn read_corpus_lines<P: AsRef<Path>>(file_path: P) -> Result<Vec<String>> {
    let (lines, _stats) = CorpusReader::default().read_lines(file_path).await?;
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::fs;

    #[tokio::test]
    async fn test_read_valid_corpus() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("corpus.ru");
        fs::write(&file_path, "я вижу тебя\nя вижу вас\nя вижу стол").await.unwrap();

        let (lines, stats) = CorpusReader::default().read_lines(&file_path).await.unwrap();

        assert_eq!(lines, vec!["я вижу тебя", "я вижу вас", "я вижу стол"]);
        assert_eq!(stats.lines_read, 3);
        assert!(stats.bytes_read > 0);
    }

    #[tokio::test]
    async fn test_read_empty_corpus() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.txt");
        fs::write(&file_path, "").await.unwrap();

        let lines = read_corpus_lines(&file_path).await.unwrap();
        assert!(lines.is_empty());
    }

    #[tokio::test]
    async fn test_missing_corpus_is_file_access_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("missing.txt");

        let result = CorpusReader::default()
            .read_lines_with_hint(&file_path, "Run the annotation step first")
            .await;
        match result {
            Err(TvError::FileAccess { path, hint, .. }) => {
                assert_eq!(path, file_path);
                assert_eq!(hint.as_deref(), Some("Run the annotation step first"));
            }
            other => panic!("expected file access error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("invalid.txt");
        fs::write(&file_path, [b'o', b'k', b'\n', 0xFF, 0xFE]).await.unwrap();

        let result = read_corpus_lines(&file_path).await;
        assert!(matches!(result, Err(TvError::Parse { line: 2, .. })));
    }

    #[tokio::test]
    async fn test_directory_is_file_access_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = read_corpus_lines(temp_dir.path()).await;
        match result {
            Err(TvError::FileAccess { path, .. }) => assert_eq!(path, temp_dir.path()),
            other => panic!("expected file access error, got {other:?}"),
        }
    }

    #[test]
    fn test_split_lines_boundaries() {
        assert_eq!(split_lines("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("a\u{2028}b\u{85}c\u{0b}d\u{0c}e"), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(split_lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[tokio::test]
    async fn test_write_then_read_lines() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("out.txt");
        let reader = CorpusReader::new(ReaderConfig { buffer_size: 16 });

        reader.write_lines(&file_path, &["первая", "вторая"]).await.unwrap();

        let content = fs::read_to_string(&file_path).await.unwrap();
        assert_eq!(content, "первая\nвторая\n");
    }

    #[test]
    fn test_pairing_policy() {
        assert_eq!(PairingPolicy::Truncate.paired_len("a", 3, "b", 3).unwrap(), 3);
        assert_eq!(PairingPolicy::Truncate.paired_len("a", 5, "b", 3).unwrap(), 3);
        assert_eq!(PairingPolicy::Strict.paired_len("a", 2, "b", 2).unwrap(), 2);
        match PairingPolicy::Strict.paired_len("src", 4, "tgt", 3) {
            Err(TvError::LengthMismatch { left_len, right_len, .. }) => {
                assert_eq!((left_len, right_len), (4, 3));
            }
            other => panic!("expected length mismatch, got {other:?}"),
        }
    }
}
