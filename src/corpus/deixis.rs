// WHY: The deixis consistency test sets pack several context sentences per line
// joined by a separator; evaluation needs one deduplicated sentence pair per line

use crate::error::{Result, TvError};
use crate::reader::{CorpusReader, PairingPolicy};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEIXIS_EOS_SEPARATOR: &str = "_eos";

/// Russian segments that some models translate to an empty string
const SKIPPED_RUSSIAN: &str = ".";

/// Output locations and parsing options for [`reformat_deixis_files`]
#[derive(Debug, Clone)]
pub struct DeixisConfig {
    pub en_output: PathBuf,
    pub ru_output: PathBuf,
    pub separator: String,
    pub pairing: PairingPolicy,
}

impl Default for DeixisConfig {
    fn default() -> Self {
        Self {
            en_output: PathBuf::from("deixis_test_en"),
            ru_output: PathBuf::from("deixis_test_ru"),
            separator: DEIXIS_EOS_SEPARATOR.to_string(),
            pairing: PairingPolicy::default(),
        }
    }
}

/// English/Russian sentence pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub en: String,
    pub ru: String,
}

/// Split aligned deixis lines into sentence pairs, dropping repeated Russian segments
pub async fn extract_pairs(
    dir: &Path,
    ru_name: &str,
    en_name: &str,
    separator: &str,
    pairing: PairingPolicy,
) -> Result<Vec<SentencePair>> {
    let reader = CorpusReader::default();
    let ru_path = dir.join(ru_name);
    let en_path = dir.join(en_name);
    let (ru_lines, _) = reader.read_lines(&ru_path).await?;
    let (en_lines, _) = reader.read_lines(&en_path).await?;

    let paired = pairing.paired_len(ru_name, ru_lines.len(), en_name, en_lines.len())?;

    let mut seen = HashSet::new();
    let mut pairs = Vec::new();
    for (ru_line, en_line) in ru_lines.iter().zip(en_lines.iter()).take(paired) {
        let ru_segments: Vec<&str> = ru_line.trim().split(separator).collect();
        let en_segments: Vec<&str> = en_line.trim().split(separator).collect();
        if ru_segments.len() != en_segments.len() {
            return Err(TvError::LengthMismatch {
                left: format!("{ru_name} segments"),
                right: format!("{en_name} segments"),
                left_len: ru_segments.len(),
                right_len: en_segments.len(),
            });
        }

        for (ru, en) in ru_segments.into_iter().zip(en_segments) {
            if !seen.insert(ru) {
                continue;
            }
            pairs.push(SentencePair {
                en: en.trim().to_string(),
                ru: ru.trim().to_string(),
            });
        }
    }

    info!("Extracted {} unique sentence pairs from {}", pairs.len(), ru_path.display());
    Ok(pairs)
}

/// Merge the deixis test and dev sets into one English and one Russian file
pub async fn reformat_deixis_files(dir: &Path, config: &DeixisConfig) -> Result<usize> {
    let test = extract_pairs(dir, "deixis_test.dst", "deixis_test.src", &config.separator, config.pairing).await?;
    let dev = extract_pairs(dir, "deixis_dev.dst", "deixis_dev.src", &config.separator, config.pairing).await?;

    let kept: Vec<SentencePair> = test
        .into_iter()
        .chain(dev)
        .filter(|pair| pair.ru != SKIPPED_RUSSIAN)
        .collect();

    let en: Vec<&str> = kept.iter().map(|pair| pair.en.as_str()).collect();
    let ru: Vec<&str> = kept.iter().map(|pair| pair.ru.as_str()).collect();

    let reader = CorpusReader::default();
    reader.write_lines(&config.en_output, &en).await?;
    reader.write_lines(&config.ru_output, &ru).await?;

    info!(
        "Wrote {} deixis pairs to {} and {}",
        kept.len(),
        config.en_output.display(),
        config.ru_output.display()
    );
    Ok(kept.len())
}
