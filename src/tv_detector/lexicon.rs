// WHY: Surface-form lookup table for the token-based detector
// Built once per detector and never mutated afterwards

use std::collections::HashSet;

/// Second-person singular pronoun and possessive determiner forms, all cases and genders
pub const RUSSIAN_T_WORDS: &[&str] = &[
    "ты", "тебя", "тебе", "тобою", "тобой",
    "твой", "твоего", "твоему", "твоим", "твоём", "твоем",
    "твоё", "твое",
    "твоя", "твоей", "твою", "твоею",
    "твои", "твоих", "твоими",
];

/// Second-person plural/formal pronoun and possessive determiner forms
pub const RUSSIAN_V_WORDS: &[&str] = &[
    "вы", "вас", "вам", "вами",
    "ваш", "вашего", "вашему", "вашим", "вашем",
    "ваше",
    "ваша", "вашей", "вашу", "вашею",
    "ваши", "ваших", "вашими",
];

/// Uppercase the first character, leave the rest untouched
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn with_capitalized(words: &[&str]) -> HashSet<String> {
    words
        .iter()
        .flat_map(|word| [word.to_string(), capitalize_first(word)])
        .collect()
}

/// Immutable pair of T-form and V-form word sets
#[derive(Debug, Clone)]
pub struct Lexicon {
    t_words: HashSet<String>,
    v_words: HashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from lowercase word lists, adding a sentence-initial variant of each
    pub fn from_words(t_words: &[&str], v_words: &[&str]) -> Self {
        Self {
            t_words: with_capitalized(t_words),
            v_words: with_capitalized(v_words),
        }
    }

    /// The hand-curated Russian T/V lexicon
    pub fn russian() -> Self {
        Self::from_words(RUSSIAN_T_WORDS, RUSSIAN_V_WORDS)
    }

    pub fn is_t_word(&self, token: &str) -> bool {
        self.t_words.contains(token)
    }

    pub fn is_v_word(&self, token: &str) -> bool {
        self.v_words.contains(token)
    }

    pub fn t_words(&self) -> &HashSet<String> {
        &self.t_words
    }

    pub fn v_words(&self) -> &HashSet<String> {
        &self.v_words
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::russian()
    }
}
