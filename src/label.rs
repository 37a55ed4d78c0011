// WHY: Training data for T/V-conditioned models carries the register as a leading
// marker token on the source side, derived from the target side's detected register

use crate::corpus::with_suffix;
use crate::error::{Result, TvError};
use crate::reader::{CorpusReader, PairingPolicy};
use crate::tv_detector::{RegisterLabel, TvDetector};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

pub const SPECIAL_T_TOKEN: &str = "<T>";
pub const SPECIAL_V_TOKEN: &str = "<V>";

/// Suffix appended to the source path for the labeled output
pub const LABELED_SUFFIX: &str = ".tv";

/// Register marker prepended to a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    T,
    V,
}

impl Marker {
    pub fn token(self) -> &'static str {
        match self {
            Marker::T => SPECIAL_T_TOKEN,
            Marker::V => SPECIAL_V_TOKEN,
        }
    }

    /// Marker for a label, `None` for neutral sentences
    pub fn for_label(label: RegisterLabel) -> Option<Self> {
        if label.is_t() {
            Some(Marker::T)
        } else if label.is_v() {
            Some(Marker::V)
        } else {
            None
        }
    }

    /// Prefix `line` with the marker for `label`, if any
    pub fn apply(label: RegisterLabel, line: &str) -> String {
        match Self::for_label(label) {
            Some(marker) => format!("{} {}", marker.token(), line),
            None => line.to_string(),
        }
    }

    /// Split a leading marker token off a labeled line
    ///
    /// Inverts [`Marker::apply`] only when the unlabeled line does not itself begin
    /// with `<T> ` or `<V> `; such a neutral line reads back as marked.
    pub fn strip(line: &str) -> (Option<Self>, &str) {
        for marker in [Marker::T, Marker::V] {
            if let Some(rest) = line.strip_prefix(marker.token()).and_then(|r| r.strip_prefix(' ')) {
                return (Some(marker), rest);
            }
        }
        (None, line)
    }
}

/// Options shared by the labeling helpers
#[derive(Debug, Clone, Default)]
pub struct LabelOptions {
    pub pairing: PairingPolicy,
    /// Suppress the progress bar
    pub no_progress: bool,
}

/// Output path for the labeled copy of `source`
pub fn labeled_path(source: &Path) -> PathBuf {
    with_suffix(source, LABELED_SUFFIX)
}

fn progress_bar(len: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}") {
        bar.set_style(style);
    }
    bar
}

/// Prefix each source line with the register marker detected on the aligned target line
///
/// Writes `<source>.tv` and returns its path. `target` is read by `detector`, so it
/// must be in the format that detector expects (raw text or CoNLL-U).
pub async fn mark_tv_sentences(
    detector: Arc<dyn TvDetector>,
    source: &Path,
    target: &Path,
    options: &LabelOptions,
) -> Result<PathBuf> {
    let reader = CorpusReader::default();
    let (source_lines, _) = reader.read_lines(source).await?;

    let target_path = target.to_path_buf();
    let labels = tokio::task::spawn_blocking(move || detector.detect_t_v_labels(None, Some(target_path.as_path())))
        .await
        .map_err(|e| TvError::Io(std::io::Error::other(e)))??;

    let paired = options.pairing.paired_len(
        &source.display().to_string(),
        source_lines.len(),
        &target.display().to_string(),
        labels.len(),
    )?;

    let bar = progress_bar(paired as u64, options.no_progress);
    bar.set_message("Labeling");
    let mut labeled = Vec::with_capacity(paired);
    let mut ambiguous = 0usize;
    for (line, label) in source_lines.iter().zip(labels.iter()).take(paired) {
        if label.is_neutral() && Marker::strip(line).0.is_some() {
            ambiguous += 1;
        }
        labeled.push(Marker::apply(*label, line));
        bar.inc(1);
    }
    bar.finish_and_clear();

    if ambiguous > 0 {
        warn!(
            source = %source.display(),
            ambiguous,
            "Unmarked source lines already start with a marker token and will read back as marked"
        );
    }

    let output = labeled_path(source);
    info!("Writing sentences with T/V labels to {}", output.display());
    reader.write_lines(&output, &labeled).await?;

    Ok(output)
}

/// Prefix every line of `source` with `label` and write the result to `target`
pub async fn prepend_label_to_all_lines(source: &Path, label: &str, target: &Path) -> Result<()> {
    let reader = CorpusReader::default();
    let (lines, _) = reader.read_lines(source).await?;
    let labeled: Vec<String> = lines.iter().map(|line| format!("{label} {line}")).collect();
    reader.write_lines(target, &labeled).await
}
