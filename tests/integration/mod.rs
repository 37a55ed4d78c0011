// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// CoNLL-U for "Я вижу тебя.", "Вы знаете?", "Я вижу стол."
pub const SAMPLE_CONLL: &str = "# sent_id = 1\n\
# text = Я вижу тебя.\n\
1\tЯ\tя\tPRON\t_\tCase=Nom|Number=Sing|Person=1\t2\tnsubj\t_\t_\n\
2\tвижу\tвидеть\tVERB\t_\tNumber=Sing|Person=1|Tense=Pres\t0\troot\t_\t_\n\
3\tтебя\tты\tPRON\t_\tCase=Acc|Number=Sing|Person=2\t2\tobj\t_\tSpaceAfter=No\n\
4\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_\n\
\n\
# sent_id = 2\n\
# text = Знаете?\n\
1\tЗнаете\tзнать\tVERB\t_\tNumber=Plur|Person=2|Tense=Pres\t0\troot\t_\tSpaceAfter=No\n\
2\t?\t?\tPUNCT\t_\t_\t1\tpunct\t_\t_\n\
\n\
# sent_id = 3\n\
# text = Я вижу стол.\n\
1\tЯ\tя\tPRON\t_\tCase=Nom|Number=Sing|Person=1\t2\tnsubj\t_\t_\n\
2\tвижу\tвидеть\tVERB\t_\tNumber=Sing|Person=1|Tense=Pres\t0\troot\t_\t_\n\
3\tстол\tстол\tNOUN\t_\tCase=Acc\t2\tobj\t_\tSpaceAfter=No\n\
4\t.\t.\tPUNCT\t_\t_\t2\tpunct\t_\t_\n\
\n";

/// Test fixture helper for creating temporary corpora
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with temporary directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create a corpus file with given content
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Create a one-sentence-per-line corpus
    pub fn create_corpus<P: AsRef<Path>>(&self, relative_path: P, lines: &[&str]) -> PathBuf {
        let mut content = lines.join("\n");
        content.push('\n');
        self.create_file(relative_path, &content)
    }

    pub fn path<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        self.root_path.join(relative_path)
    }

    pub fn read<P: AsRef<Path>>(&self, path: P) -> String {
        fs::read_to_string(path).expect("Failed to read file")
    }
}

/// Compare two strings line by line, providing detailed diff on mismatch
pub fn assert_lines_eq(actual: &str, expected: &str, context: &str) {
    let actual_lines: Vec<&str> = actual.lines().collect();
    let expected_lines: Vec<&str> = expected.lines().collect();

    if actual_lines.len() != expected_lines.len() {
        panic!(
            "{}: Line count mismatch. Expected {} lines, got {} lines",
            context,
            expected_lines.len(),
            actual_lines.len()
        );
    }

    for (i, (actual_line, expected_line)) in actual_lines.iter().zip(expected_lines.iter()).enumerate() {
        if actual_line != expected_line {
            panic!(
                "{}: Line {} mismatch\nExpected: {}\nActual:   {}",
                context,
                i + 1,
                expected_line,
                actual_line
            );
        }
    }
}
