use crate::error::{Result, TvError};
use crate::reader::{CorpusReader, PairingPolicy};
use crate::tv_detector::{TokenTvDetector, TvDetector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Class limits for a register-balanced subcorpus
///
/// The defaults were picked empirically for a one-million-sentence parallel corpus.
#[derive(Debug, Clone)]
pub struct SubcorpusConfig {
    /// V sentences beyond this count are dropped
    pub v_limit: usize,
    /// Neutral sentences beyond this count are dropped
    pub neutral_limit: usize,
    /// Non-T lines with at least this many characters are skipped
    pub max_line_chars: usize,
    pub pairing: PairingPolicy,
}

impl Default for SubcorpusConfig {
    fn default() -> Self {
        Self {
            v_limit: 22_000,
            neutral_limit: 100_000,
            max_line_chars: 100,
            pairing: PairingPolicy::default(),
        }
    }
}

/// Counts seen while building a subcorpus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcorpusStats {
    /// Sentences per class among lines that passed the length filter
    pub t_seen: usize,
    pub v_seen: usize,
    pub neutral_seen: usize,
    /// Pairs written to the output
    pub kept: usize,
}

/// Select a register-balanced parallel subcorpus using the token-based detector
pub async fn create_tv_subcorpus(
    source_ru: &Path,
    source_en: &Path,
    target_ru: &Path,
    target_en: &Path,
    config: &SubcorpusConfig,
) -> Result<SubcorpusStats> {
    let reader = CorpusReader::default();
    let (ru_lines, _) = reader.read_lines(source_ru).await?;
    let (en_lines, _) = reader.read_lines(source_en).await?;

    let (ru_lines, labels) = tokio::task::spawn_blocking(move || {
        let labels = TokenTvDetector::new().detect_t_v_labels(Some(ru_lines.as_slice()), None);
        (ru_lines, labels)
    })
    .await
    .map_err(|e| TvError::Io(std::io::Error::other(e)))?;
    let labels = labels?;

    let paired = config.pairing.paired_len(
        &source_ru.display().to_string(),
        ru_lines.len(),
        &source_en.display().to_string(),
        en_lines.len(),
    )?;

    let mut stats = SubcorpusStats::default();
    let mut kept_ru = Vec::new();
    let mut kept_en = Vec::new();

    for ((label, ru_line), en_line) in labels.iter().zip(&ru_lines).zip(&en_lines).take(paired) {
        if !label.is_t() && ru_line.chars().count() >= config.max_line_chars {
            continue;
        }

        let neutral = label.is_neutral();
        stats.neutral_seen += usize::from(neutral);
        stats.v_seen += usize::from(label.is_v());
        stats.t_seen += usize::from(label.is_t());

        if (label.is_v() && stats.v_seen > config.v_limit) || (neutral && stats.neutral_seen > config.neutral_limit) {
            continue;
        }

        kept_ru.push(ru_line.as_str());
        kept_en.push(en_line.as_str());
    }

    reader.write_lines(target_ru, &kept_ru).await?;
    reader.write_lines(target_en, &kept_en).await?;

    stats.kept = kept_ru.len();
    info!(
        t = stats.t_seen,
        v = stats.v_seen,
        neutral = stats.neutral_seen,
        kept = stats.kept,
        "Subcorpus written"
    );
    Ok(stats)
}
