// WHY: Cheap surface matching against a fixed lexicon, no annotation required

use super::lexicon::Lexicon;
use super::policy::{resolve, RegisterLabel};
use super::{CorpusSource, TvDetector};
use crate::error::{Result, TvError};
use crate::reader::split_lines;
use std::collections::HashSet;
use std::fs;
use tracing::debug;

/// T/V detector that looks up whitespace-separated tokens in a [`Lexicon`]
#[derive(Debug, Clone, Default)]
pub struct TokenTvDetector {
    lexicon: Lexicon,
}

impl TokenTvDetector {
    /// Detector over the built-in Russian lexicon
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::russian())
    }

    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Classify one raw sentence
    pub fn classify(&self, line: &str) -> RegisterLabel {
        let tokens: HashSet<&str> = line.split_whitespace().collect();
        let t_hit = tokens.iter().any(|token| self.lexicon.is_t_word(token));
        let v_hit = tokens.iter().any(|token| self.lexicon.is_v_word(token));
        resolve(t_hit, v_hit)
    }
}

impl TvDetector for TokenTvDetector {
    fn name(&self) -> &'static str {
        "token"
    }

    fn detect_from_source(&self, source: &CorpusSource<'_>) -> Result<Vec<RegisterLabel>> {
        match source {
            CorpusSource::Lines(lines) => Ok(lines.iter().map(|line| self.classify(line)).collect()),
            CorpusSource::File(path) => {
                // Raw corpora are modest in size; read whole
                let content = fs::read_to_string(path).map_err(|e| TvError::file_access(path, e))?;
                debug!("Classifying {} with token detector", path.display());
                Ok(split_lines(&content).into_iter().map(|line| self.classify(line)).collect())
            }
        }
    }
}
