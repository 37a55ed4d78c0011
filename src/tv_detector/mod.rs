// WHY: Common detector interface so callers pick token-based or grammar-based
// detection without caring which one runs

use crate::error::{Result, TvError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

pub mod conll_detector;
pub mod lexicon;
pub mod policy;
pub mod token_detector;

pub use conll_detector::ConllTvDetector;
pub use lexicon::Lexicon;
pub use policy::{resolve, RegisterLabel};
pub use token_detector::TokenTvDetector;

/// Where a batch of sentences comes from
#[derive(Debug, Clone, Copy)]
pub enum CorpusSource<'a> {
    /// In-memory sentences, one entry per sentence (or per serialized block)
    Lines(&'a [String]),
    /// Corpus file on disk
    File(&'a Path),
}

impl<'a> CorpusSource<'a> {
    /// Accept exactly one of `lines` or `path`
    pub fn from_options(lines: Option<&'a [String]>, path: Option<&'a Path>) -> Result<Self> {
        match (lines, path) {
            (Some(lines), None) => Ok(CorpusSource::Lines(lines)),
            (None, Some(path)) => Ok(CorpusSource::File(path)),
            (Some(_), Some(_)) => Err(TvError::InvalidArguments(
                "only one of source lines or source file can be provided".to_string(),
            )),
            (None, None) => Err(TvError::InvalidArguments(
                "either source file or list of sentences has to be provided".to_string(),
            )),
        }
    }
}

/// Neutral/T/V counts over a labeled corpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub neutral: usize,
    pub v: usize,
    pub t: usize,
}

impl CorpusStats {
    pub fn from_labels(labels: &[RegisterLabel]) -> Self {
        labels.iter().fold(Self::default(), |mut stats, label| {
            if label.is_t() {
                stats.t += 1;
            } else if label.is_v() {
                stats.v += 1;
            } else {
                stats.neutral += 1;
            }
            stats
        })
    }

    pub fn total(&self) -> usize {
        self.neutral + self.v + self.t
    }

    /// Sentences carrying either register
    pub fn marked(&self) -> usize {
        self.t + self.v
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Neutral sentences: {}. V sentences found: {}. T sentences found: {}.",
            self.neutral, self.v, self.t
        )
    }
}

/// A T/V register detector
pub trait TvDetector: Send + Sync {
    /// Short identifier used in logs and reports
    fn name(&self) -> &'static str;

    /// Label every sentence of `source`, preserving input order
    fn detect_from_source(&self, source: &CorpusSource<'_>) -> Result<Vec<RegisterLabel>>;

    /// Label sentences from exactly one of `lines` or `path` and report the counts
    ///
    /// Prints the neutral/V/T summary line to stdout after the batch completes.
    fn detect_t_v_labels(&self, lines: Option<&[String]>, path: Option<&Path>) -> Result<Vec<RegisterLabel>> {
        let source = CorpusSource::from_options(lines, path)?;
        let labels = self.detect_from_source(&source)?;

        let stats = CorpusStats::from_labels(&labels);
        info!(
            detector = self.name(),
            neutral = stats.neutral,
            v = stats.v,
            t = stats.t,
            "T/V detection completed"
        );
        println!("{}", stats.summary_line());

        Ok(labels)
    }
}

/// Selectable detector implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DetectorKind {
    Token,
    Conll,
}

impl DetectorKind {
    pub fn build(self) -> Arc<dyn TvDetector> {
        match self {
            DetectorKind::Token => Arc::new(TokenTvDetector::new()),
            DetectorKind::Conll => Arc::new(ConllTvDetector::new()),
        }
    }
}
