pub mod compare;
pub mod conllu;
pub mod corpus;
pub mod error;
pub mod label;
pub mod metrics;
pub mod reader;
pub mod tv_detector;

// Re-export main types for convenient access
pub use error::{Result, TvError};
pub use tv_detector::{
    resolve, ConllTvDetector, CorpusSource, CorpusStats, DetectorKind, Lexicon, RegisterLabel,
    TokenTvDetector, TvDetector,
};

// Re-export labeling and reporting entry points
pub use compare::{compare_detectors, DetectorComparison};
pub use label::{mark_tv_sentences, prepend_label_to_all_lines, LabelOptions, Marker};
pub use metrics::{report_metrics, MetricsReport};
pub use reader::PairingPolicy;
