// WHY: Corpus BLEU matching sacreBLEU defaults (13a tokenization, 4-gram, exp smoothing)
// so scores stay comparable with numbers reported elsewhere

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const MAX_NGRAM_ORDER: usize = 4;

/// Corpus-level BLEU with its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BleuScore {
    /// BLEU on the 0-100 scale
    pub score: f64,
    /// Modified n-gram precisions on the 0-100 scale
    pub precisions: [f64; MAX_NGRAM_ORDER],
    pub brevity_penalty: f64,
    pub sys_len: usize,
    pub ref_len: usize,
}

/// Punctuation split off as separate tokens regardless of context
fn is_isolated_punct(ch: char) -> bool {
    matches!(
        ch,
        '{' | '|' | '}' | '~' | '[' | '\\' | ']' | '^' | '_' | '`' | '!' | '"' | '#' | '$' | '%' | '&'
            | '(' | ')' | '*' | '+' | ':' | ';' | '<' | '=' | '>' | '?' | '@' | '/'
    )
}

/// Tokenize like the mteval-v13a script
pub fn tokenize_13a(line: &str) -> Vec<String> {
    let text = line
        .replace("<skipped>", "")
        .replace("-\n", "")
        .replace('\n', " ")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">");

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() * 2);

    for (i, &ch) in chars.iter().enumerate() {
        let prev_digit = i > 0 && chars[i - 1].is_ascii_digit();
        let next_digit = chars.get(i + 1).is_some_and(|c| c.is_ascii_digit());

        if is_isolated_punct(ch) {
            out.push(' ');
            out.push(ch);
            out.push(' ');
        } else if ch == '.' || ch == ',' {
            // Kept inside numbers such as 3.14 or 1,000
            if prev_digit && next_digit {
                out.push(ch);
            } else {
                out.push(' ');
                out.push(ch);
                out.push(' ');
            }
        } else if ch == '-' && prev_digit {
            out.push(' ');
            out.push(ch);
            out.push(' ');
        } else {
            out.push(ch);
        }
    }

    out.split_whitespace().map(str::to_string).collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for window in tokens.windows(n) {
            *counts.entry(window).or_insert(0) += 1;
        }
    }
    counts
}

#[derive(Debug, Default)]
struct Sufficient {
    correct: [usize; MAX_NGRAM_ORDER],
    total: [usize; MAX_NGRAM_ORDER],
    sys_len: usize,
    ref_len: usize,
}

impl Sufficient {
    fn add(&mut self, candidate: &str, reference: &str) {
        let hyp = tokenize_13a(candidate);
        let refs = tokenize_13a(reference);
        self.sys_len += hyp.len();
        self.ref_len += refs.len();

        for n in 1..=MAX_NGRAM_ORDER {
            let hyp_counts = ngram_counts(&hyp, n);
            let ref_counts = ngram_counts(&refs, n);
            for (gram, count) in &hyp_counts {
                let clipped = ref_counts.get(gram).copied().unwrap_or(0).min(*count);
                self.correct[n - 1] += clipped;
            }
            self.total[n - 1] += hyp.len().saturating_sub(n - 1);
        }
    }

    fn score(&self) -> BleuScore {
        let mut precisions = [0.0; MAX_NGRAM_ORDER];
        let mut smooth = 1.0;

        for n in 0..MAX_NGRAM_ORDER {
            if self.total[n] == 0 {
                break;
            }
            if self.correct[n] == 0 {
                smooth *= 2.0;
                precisions[n] = 100.0 / (smooth * self.total[n] as f64);
            } else {
                precisions[n] = 100.0 * self.correct[n] as f64 / self.total[n] as f64;
            }
        }

        let brevity_penalty = if self.sys_len >= self.ref_len {
            1.0
        } else if self.sys_len == 0 {
            0.0
        } else {
            (1.0 - self.ref_len as f64 / self.sys_len as f64).exp()
        };

        let score = if precisions.iter().any(|&p| p == 0.0) {
            0.0
        } else {
            let log_sum: f64 = precisions.iter().map(|p| p.ln()).sum();
            brevity_penalty * (log_sum / MAX_NGRAM_ORDER as f64).exp()
        };

        BleuScore {
            score,
            precisions,
            brevity_penalty,
            sys_len: self.sys_len,
            ref_len: self.ref_len,
        }
    }
}

/// Corpus BLEU over aligned candidate/reference lines
///
/// Lines are paired positionally; callers decide how unequal lengths are handled.
pub fn corpus_bleu<C, R>(candidates: &[C], references: &[R]) -> BleuScore
where
    C: AsRef<str>,
    R: AsRef<str>,
{
    let mut stats = Sufficient::default();
    for (candidate, reference) in candidates.iter().zip(references) {
        stats.add(candidate.as_ref(), reference.as_ref());
    }
    stats.score()
}
