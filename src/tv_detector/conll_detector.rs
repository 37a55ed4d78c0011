// WHY: Grammar-based detection catches pro-drop sentences ("Знаешь, ...") that
// surface matching misses, using lemma and verb agreement features

use super::policy::{resolve, RegisterLabel};
use super::{CorpusSource, TvDetector};
use crate::conllu::{self, Sentence, Token, Upos};
use crate::error::{Result, TvError};
use std::fs::File;
use std::io::BufReader;
use tracing::debug;

/// Lemmas and feature values that mark one register
#[derive(Debug, Clone, Copy)]
struct RegisterRule {
    pronoun_lemma: &'static str,
    determiner_lemma: &'static str,
    number: &'static str,
}

impl RegisterRule {
    fn matches(&self, token: &Token) -> bool {
        match token.upos {
            Upos::Pron => token.lemma == self.pronoun_lemma,
            Upos::Det => token.lemma == self.determiner_lemma,
            Upos::Verb => token.feat("Number") == Some(self.number) && token.feat("Person") == Some("2"),
            _ => false,
        }
    }
}

const T_RULE: RegisterRule = RegisterRule {
    pronoun_lemma: "ты",
    determiner_lemma: "твой",
    number: "Sing",
};

const V_RULE: RegisterRule = RegisterRule {
    pronoun_lemma: "вы",
    determiner_lemma: "ваш",
    number: "Plur",
};

/// True if the token is T-specific: "ты", "твой", or a 2nd person singular verb
pub fn is_t_token(token: &Token) -> bool {
    T_RULE.matches(token)
}

/// True if the token is V-specific: "вы", "ваш", or a 2nd person plural verb
pub fn is_v_token(token: &Token) -> bool {
    V_RULE.matches(token)
}

/// T/V detector over CoNLL-U annotated sentences
#[derive(Debug, Clone, Copy, Default)]
pub struct ConllTvDetector;

impl ConllTvDetector {
    pub fn new() -> Self {
        Self
    }

    /// Classify one annotated token sequence
    pub fn classify(&self, tokens: &[Token]) -> RegisterLabel {
        let t_hit = tokens.iter().any(is_t_token);
        let v_hit = tokens.iter().any(is_v_token);
        resolve(t_hit, v_hit)
    }

    pub fn classify_sentence(&self, sentence: &Sentence) -> RegisterLabel {
        self.classify(&sentence.tokens)
    }
}

impl TvDetector for ConllTvDetector {
    fn name(&self) -> &'static str {
        "conll"
    }

    fn detect_from_source(&self, source: &CorpusSource<'_>) -> Result<Vec<RegisterLabel>> {
        let mut labels = Vec::new();
        match source {
            CorpusSource::Lines(blocks) => {
                // Each entry may hold one or more serialized sentence blocks
                for block in blocks.iter() {
                    for sentence in conllu::parse(block)? {
                        labels.push(self.classify_sentence(&sentence));
                    }
                }
            }
            CorpusSource::File(path) => {
                let file = File::open(path).map_err(|e| TvError::file_access(path, e))?;
                debug!("Streaming CoNLL-U sentences from {}", path.display());
                for sentence in conllu::parse_incr(BufReader::new(file)) {
                    let sentence = sentence.map_err(|e| match e {
                        TvError::Io(source) => TvError::file_access(path, source),
                        other => other,
                    })?;
                    labels.push(self.classify_sentence(&sentence));
                }
            }
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conllu::TokenId;
    use std::collections::BTreeMap;

    fn token(upos: Upos, lemma: &str, feats: &[(&str, &str)]) -> Token {
        Token {
            id: TokenId::Single(1),
            form: lemma.to_string(),
            lemma: lemma.to_string(),
            upos,
            xpos: None,
            feats: feats
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            head: None,
            deprel: None,
            deps: None,
            misc: None,
        }
    }

    #[test]
    fn test_plural_second_person_verb_is_v() {
        let verb = token(Upos::Verb, "знать", &[("Number", "Plur"), ("Person", "2")]);
        assert!(is_v_token(&verb));
        assert!(!is_t_token(&verb));
        assert_eq!(ConllTvDetector.classify(&[verb]), RegisterLabel::V);
    }

    #[test]
    fn test_singular_second_person_verb_is_t() {
        let verb = token(Upos::Verb, "знать", &[("Number", "Sing"), ("Person", "2")]);
        assert!(is_t_token(&verb));
        assert_eq!(ConllTvDetector.classify(&[verb]), RegisterLabel::T);
    }

    #[test]
    fn test_first_person_verb_contributes_nothing() {
        let verb = token(Upos::Verb, "знать", &[("Number", "Sing"), ("Person", "1")]);
        assert!(!is_t_token(&verb) && !is_v_token(&verb));
        assert!(ConllTvDetector.classify(&[verb]).is_neutral());
    }

    #[test]
    fn test_pronoun_and_conflicting_verb_resolve_neutral() {
        let tokens = [
            token(Upos::Pron, "вы", &[("Number", "Plur"), ("Person", "2")]),
            token(Upos::Verb, "сказать", &[("Number", "Sing"), ("Person", "2")]),
        ];
        assert!(tokens.iter().any(is_v_token));
        assert!(tokens.iter().any(is_t_token));
        assert_eq!(ConllTvDetector.classify(&tokens).as_tuple(), (false, false));
    }

    #[test]
    fn test_lemma_must_match_part_of_speech() {
        // "ваш" tagged as PRON is not the determiner rule
        assert!(!is_v_token(&token(Upos::Pron, "ваш", &[])));
        assert!(is_v_token(&token(Upos::Det, "ваш", &[])));
        assert!(is_t_token(&token(Upos::Det, "твой", &[])));
        assert!(!is_t_token(&token(Upos::Noun, "ты", &[])));
    }

    #[test]
    fn test_auxiliary_is_not_verb() {
        let aux = token(Upos::Aux, "быть", &[("Number", "Plur"), ("Person", "2")]);
        assert!(!is_v_token(&aux));
    }

    #[test]
    fn test_in_memory_blocks_may_hold_several_sentences() {
        let blocks = vec![
            "1\tТы\tты\tPRON\t_\t_\t0\troot\t_\t_\n\n1\tВаш\tваш\tDET\t_\t_\t0\troot\t_\t_\n".to_string(),
            "1\tстол\tстол\tNOUN\t_\t_\t0\troot\t_\t_\n".to_string(),
        ];
        let labels = ConllTvDetector
            .detect_from_source(&CorpusSource::Lines(&blocks))
            .unwrap();
        assert_eq!(labels, vec![RegisterLabel::T, RegisterLabel::V, RegisterLabel::NEUTRAL]);
    }

    #[test]
    fn test_invalid_block_propagates_parse_error() {
        let blocks = vec!["not conll at all".to_string()];
        let result = ConllTvDetector.detect_from_source(&CorpusSource::Lines(&blocks));
        assert!(matches!(result, Err(TvError::Parse { .. })));
    }
}
