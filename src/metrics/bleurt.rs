use crate::error::{Result, TvError};
use crate::reader::CorpusReader;
use std::path::Path;

/// Mean of precomputed sentence-level BLEURT scores, scaled by 100
///
/// Expects one float per line; blank lines are skipped.
pub async fn corpus_bleurt(path: &Path, hint: &str) -> Result<f64> {
    let (lines, _) = CorpusReader::default().read_lines_with_hint(path, hint).await?;
    mean_score(&lines, path)
}

fn mean_score(lines: &[String], path: &Path) -> Result<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|_| TvError::parse(index + 1, format!("invalid BLEURT score '{trimmed}'")))?;
        sum += value;
        count += 1;
    }

    if count == 0 {
        return Err(TvError::EmptyScores {
            path: path.to_path_buf(),
        });
    }
    Ok(100.0 * sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_mean_scaled_by_100() {
        let score = mean_score(&lines(&["0.5", "0.25", "", "-0.15"]), Path::new("x.bleurt")).unwrap();
        assert!((score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_numeric_line_is_parse_error() {
        let result = mean_score(&lines(&["0.5", "abc"]), Path::new("x.bleurt"));
        assert!(matches!(result, Err(TvError::Parse { line: 2, .. })));
    }

    #[test]
    fn test_no_scores_is_error() {
        let result = mean_score(&lines(&["", "  "]), Path::new("x.bleurt"));
        assert!(matches!(result, Err(TvError::EmptyScores { .. })));
    }
}
