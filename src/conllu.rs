// WHY: Annotated corpora arrive as CoNLL-U produced by an upstream dependency parser
// The reader keeps one sentence block in memory at a time so large corpora stream

use crate::error::{Result, TvError};
use std::collections::BTreeMap;
use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

const FIELD_COUNT: usize = 10;

/// Universal Dependencies part-of-speech tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    /// `_` in the UPOS column, as used by multiword token lines
    Unspecified,
}

impl FromStr for Upos {
    type Err = String;

    fn from_str(tag: &str) -> std::result::Result<Self, Self::Err> {
        let upos = match tag {
            "ADJ" => Upos::Adj,
            "ADP" => Upos::Adp,
            "ADV" => Upos::Adv,
            "AUX" => Upos::Aux,
            "CCONJ" => Upos::Cconj,
            "DET" => Upos::Det,
            "INTJ" => Upos::Intj,
            "NOUN" => Upos::Noun,
            "NUM" => Upos::Num,
            "PART" => Upos::Part,
            "PRON" => Upos::Pron,
            "PROPN" => Upos::Propn,
            "PUNCT" => Upos::Punct,
            "SCONJ" => Upos::Sconj,
            "SYM" => Upos::Sym,
            "VERB" => Upos::Verb,
            "X" => Upos::X,
            "_" => Upos::Unspecified,
            other => return Err(format!("unknown UPOS tag '{other}'")),
        };
        Ok(upos)
    }
}

/// Token index: a word, a multiword range ("1-2") or an empty node ("3.1")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenId {
    Single(usize),
    Range(usize, usize),
    Empty(usize, usize),
}

impl FromStr for TokenId {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        let number = |part: &str| {
            part.parse::<usize>()
                .map_err(|_| format!("invalid token id '{raw}'"))
        };

        if let Some((start, end)) = raw.split_once('-') {
            Ok(TokenId::Range(number(start)?, number(end)?))
        } else if let Some((word, empty)) = raw.split_once('.') {
            Ok(TokenId::Empty(number(word)?, number(empty)?))
        } else {
            Ok(TokenId::Single(number(raw)?))
        }
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenId::Single(n) => write!(f, "{n}"),
            TokenId::Range(a, b) => write!(f, "{a}-{b}"),
            TokenId::Empty(a, b) => write!(f, "{a}.{b}"),
        }
    }
}

/// One annotated word
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub id: TokenId,
    pub form: String,
    pub lemma: String,
    pub upos: Upos,
    pub xpos: Option<String>,
    pub feats: BTreeMap<String, String>,
    pub head: Option<usize>,
    pub deprel: Option<String>,
    pub deps: Option<String>,
    pub misc: Option<String>,
}

impl Token {
    /// Look up a morphological feature value, e.g. `feat("Person") == Some("2")`
    pub fn feat(&self, name: &str) -> Option<&str> {
        self.feats.get(name).map(String::as_str)
    }
}

/// One sentence block with its comment metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    pub metadata: Vec<(String, Option<String>)>,
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Value of a `# key = value` comment, if present
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }
}

fn optional(field: &str) -> Option<String> {
    (field != "_").then(|| field.to_string())
}

fn parse_feats(field: &str, line_no: usize) -> Result<BTreeMap<String, String>> {
    let mut feats = BTreeMap::new();
    if field == "_" {
        return Ok(feats);
    }
    for pair in field.split('|') {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| TvError::parse(line_no, format!("malformed feature '{pair}'")))?;
        feats.insert(name.to_string(), value.to_string());
    }
    Ok(feats)
}

fn parse_token(line: &str, line_no: usize) -> Result<Token> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(TvError::parse(
            line_no,
            format!("expected {FIELD_COUNT} tab-separated fields, found {}", fields.len()),
        ));
    }

    let id = fields[0]
        .parse::<TokenId>()
        .map_err(|msg| TvError::parse(line_no, msg))?;
    let upos = fields[3]
        .parse::<Upos>()
        .map_err(|msg| TvError::parse(line_no, msg))?;
    let head = match fields[6] {
        "_" => None,
        raw => Some(
            raw.parse::<usize>()
                .map_err(|_| TvError::parse(line_no, format!("invalid head '{raw}'")))?,
        ),
    };

    Ok(Token {
        id,
        form: fields[1].to_string(),
        lemma: fields[2].to_string(),
        upos,
        xpos: optional(fields[4]),
        feats: parse_feats(fields[5], line_no)?,
        head,
        deprel: optional(fields[7]),
        deps: optional(fields[8]),
        misc: optional(fields[9]),
    })
}

fn parse_comment(line: &str) -> (String, Option<String>) {
    let body = line.trim_start_matches('#').trim();
    match body.split_once('=') {
        Some((key, value)) => (key.trim().to_string(), Some(value.trim().to_string())),
        None => (body.to_string(), None),
    }
}

/// Accumulates lines into a sentence block
#[derive(Default)]
struct BlockBuilder {
    current: Sentence,
    has_content: bool,
}

impl BlockBuilder {
    /// Feed one line; returns a finished sentence when a block closes
    fn push_line(&mut self, raw: &str, line_no: usize) -> Result<Option<Sentence>> {
        let line = raw.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(self.finish());
        }
        if line.starts_with('#') {
            self.current.metadata.push(parse_comment(line));
        } else {
            self.current.tokens.push(parse_token(line, line_no)?);
        }
        self.has_content = true;
        Ok(None)
    }

    fn finish(&mut self) -> Option<Sentence> {
        if !self.has_content {
            return None;
        }
        self.has_content = false;
        Some(std::mem::take(&mut self.current))
    }
}

/// Parse a whole CoNLL-U string into sentences
pub fn parse(text: &str) -> Result<Vec<Sentence>> {
    let mut builder = BlockBuilder::default();
    let mut sentences = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if let Some(sentence) = builder.push_line(line, index + 1)? {
            sentences.push(sentence);
        }
    }
    sentences.extend(builder.finish());

    Ok(sentences)
}

/// Incrementally parse sentences from a reader, one block at a time
pub fn parse_incr<R: BufRead>(reader: R) -> SentenceIter<R> {
    SentenceIter {
        reader,
        builder: BlockBuilder::default(),
        line_no: 0,
        buffer: String::new(),
        done: false,
    }
}

/// Streaming sentence iterator returned by [`parse_incr`]
pub struct SentenceIter<R> {
    reader: R,
    builder: BlockBuilder,
    line_no: usize,
    buffer: String,
    done: bool,
}

impl<R: BufRead> Iterator for SentenceIter<R> {
    type Item = Result<Sentence>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            self.buffer.clear();
            match self.reader.read_line(&mut self.buffer) {
                Ok(0) => {
                    self.done = true;
                    return self.builder.finish().map(Ok);
                }
                Ok(_) => {
                    self.line_no += 1;
                    match self.builder.push_line(&self.buffer, self.line_no) {
                        Ok(Some(sentence)) => return Some(Ok(sentence)),
                        Ok(None) => continue,
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                    self.done = true;
                    let message = format!("invalid UTF-8 after line {}: {e}", self.line_no);
                    return Some(Err(TvError::parse(self.line_no + 1, message)));
                }
                Err(e) => {
                    // The reader has no path; callers that know it turn this into FileAccess
                    self.done = true;
                    return Some(Err(TvError::Io(e)));
                }
            }
        }
    }
}
