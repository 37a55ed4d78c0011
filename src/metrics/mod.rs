// WHY: One report per translation run: register counts from the annotated
// translation plus BLEU and BLEURT against the reference

use crate::corpus::with_suffix;
use crate::error::{Result, TvError};
use crate::reader::{CorpusReader, PairingPolicy};
use crate::tv_detector::{ConllTvDetector, CorpusStats, TvDetector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub mod bleu;
pub mod bleurt;

pub use bleu::{corpus_bleu, BleuScore};
pub use bleurt::corpus_bleurt;

pub const CONLL_SUFFIX: &str = ".conll";
pub const BLEURT_SUFFIX: &str = ".bleurt";

const BLEURT_HINT: &str = "Compute sentence-level BLEURT scores for the translation first";
const CONLL_HINT: &str = "Annotate the translation to CoNLL-U with the dependency parser first";

/// Metrics for one translation file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub translation: String,
    pub reference: String,
    pub tv: CorpusStats,
    pub bleu: BleuScore,
    pub bleurt: f64,
}

impl MetricsReport {
    /// Write the report as pretty-printed JSON
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TvError::Io(std::io::Error::other(e)))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| TvError::file_access(path, e))
    }
}

async fn require_file(path: &Path, hint: &str) -> Result<()> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(TvError::file_access_with_hint(
            path,
            std::io::Error::other("not a regular file"),
            hint,
        )),
        Err(e) => Err(TvError::file_access_with_hint(path, e, hint)),
    }
}

/// BLEU of a candidate file against a reference file
pub async fn bleu_for_files(translation: &Path, reference: &Path, pairing: PairingPolicy) -> Result<BleuScore> {
    let reader = CorpusReader::default();
    let (candidates, _) = reader.read_lines(translation).await?;
    let (references, _) = reader.read_lines(reference).await?;

    let paired = pairing.paired_len(
        &translation.display().to_string(),
        candidates.len(),
        &reference.display().to_string(),
        references.len(),
    )?;
    Ok(corpus_bleu(&candidates[..paired], &references[..paired]))
}

/// Report T/V counts, BLEU and BLEURT for `translation`
///
/// Requires `<translation>.bleurt` and `<translation>.conll` next to the translation.
pub async fn report_metrics(translation: &Path, reference: &Path, pairing: PairingPolicy) -> Result<MetricsReport> {
    let conll_path = with_suffix(translation, CONLL_SUFFIX);
    let bleurt_path = with_suffix(translation, BLEURT_SUFFIX);

    require_file(&bleurt_path, BLEURT_HINT).await?;
    require_file(&conll_path, CONLL_HINT).await?;

    println!("Reporting metrics for the '{}' ...", translation.display());

    let labels = tokio::task::spawn_blocking(move || {
        ConllTvDetector::new().detect_t_v_labels(None, Some(conll_path.as_path()))
    })
    .await
    .map_err(|e| TvError::Io(std::io::Error::other(e)))??;
    let tv = CorpusStats::from_labels(&labels);

    let bleu = bleu_for_files(translation, reference, pairing).await?;
    let bleurt = corpus_bleurt(&bleurt_path, BLEURT_HINT).await?;

    println!("BLEU score: {:.2}", bleu.score);
    println!("BLEURT score: {bleurt:.2}");
    info!(
        translation = %translation.display(),
        bleu = bleu.score,
        bleurt,
        "Metrics computed"
    );

    Ok(MetricsReport {
        translation: translation.display().to_string(),
        reference: reference.display().to_string(),
        tv,
        bleu,
        bleurt,
    })
}
