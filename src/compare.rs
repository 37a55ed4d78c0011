use crate::corpus::with_suffix;
use crate::error::Result;
use crate::metrics::CONLL_SUFFIX;
use crate::tv_detector::{ConllTvDetector, CorpusStats, TokenTvDetector, TvDetector};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Token-based vs grammar-based counts on the same corpus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorComparison {
    pub token: CorpusStats,
    pub annotated: CorpusStats,
    /// T+V found by the token detector relative to the annotated detector
    pub ratio: Option<f64>,
}

impl DetectorComparison {
    pub fn from_stats(token: CorpusStats, annotated: CorpusStats) -> Self {
        let ratio = (annotated.marked() > 0).then(|| token.marked() as f64 / annotated.marked() as f64);
        Self { token, annotated, ratio }
    }
}

/// Compare detectors on `source` and its `<source>.conll` annotation
pub fn compare_detectors(source: &Path) -> Result<DetectorComparison> {
    let token_labels = TokenTvDetector::new().detect_t_v_labels(None, Some(source))?;
    let conll_path = with_suffix(source, CONLL_SUFFIX);
    let annotated_labels = ConllTvDetector::new().detect_t_v_labels(None, Some(conll_path.as_path()))?;

    let comparison = DetectorComparison::from_stats(
        CorpusStats::from_labels(&token_labels),
        CorpusStats::from_labels(&annotated_labels),
    );

    match comparison.ratio {
        Some(ratio) => {
            println!("Share of T/V sentences found by token-based detector relative to grammar-based: {ratio:.4}");
            info!(ratio, "Detector comparison completed");
        }
        None => println!("Grammar-based detector found no T/V sentences; ratio undefined"),
    }

    Ok(comparison)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let token = CorpusStats { neutral: 5, v: 1, t: 2 };
        let annotated = CorpusStats { neutral: 2, v: 3, t: 3 };
        let comparison = DetectorComparison::from_stats(token, annotated);
        assert_eq!(comparison.ratio, Some(0.5));
    }

    #[test]
    fn test_ratio_undefined_without_annotated_hits() {
        let token = CorpusStats { neutral: 1, v: 1, t: 0 };
        let comparison = DetectorComparison::from_stats(token, CorpusStats::default());
        assert_eq!(comparison.ratio, None);
    }
}
