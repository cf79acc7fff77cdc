//! Token normalisation: flattened settlement text → [`TokenStream`].
//!
//! Tokenisation follows the Penn Treebank conventions closely enough for the
//! settlement markers to come out the way the reference reports expect:
//! brackets and most symbols become their own tokens, commas and colons split
//! off unless they sit inside a number (`1,234`), and clitics at the end of a
//! word (`driver's`) separate. Glued words such as `KM'sTrip` stay intact.
//!
//! A period ending a sentence also becomes its own token: one at the very end
//! of the text, or one followed by whitespace and a capitalised word (`PAID 2.
//! Next` → `2` `.`). Periods inside numbers and runs like `...` are kept. The
//! `.` is not punctuation for the filter below, so it survives normalisation
//! and counts toward the header's fixed offsets.
//!
//! After tokenising, English stop-words and the fixed punctuation set
//! `( ) ; : [ ] , -` are dropped.

use super::stopwords::is_stop_word;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Tokens removed regardless of position.
pub const PUNCTUATION: [&str; 8] = ["(", ")", ";", ":", "[", "]", ",", "-"];

/// Ordered, read-only token sequence for one settlement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<String>,
}

impl TokenStream {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for TokenStream {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// Tokenise `text` and drop stop-words and punctuation.
pub fn normalize(text: &str) -> TokenStream {
    let stream: TokenStream = tokenize(text)
        .into_iter()
        .filter(|t| !is_stop_word(t) && !PUNCTUATION.contains(&t.as_str()))
        .collect();
    debug!("Normalised text into {} tokens", stream.len());
    stream
}

// ── Tokeniser rules ──────────────────────────────────────────────────────

static RE_ALWAYS_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([;@#$%&\[\](){}<>?!"])"#).unwrap());

/// `,` or `:` not followed by a digit (keeps `1,234` and `10:30` whole).
static RE_COMMA_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r"([:,])([^\d]|$)").unwrap());

static RE_CLITIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)([^'\s])('s|'m|'d|'ll|'re|'ve|n't)(\s|$)").unwrap());

/// A period, then whitespace, then a capitalised word (optionally after an
/// opening quote or bracket). The char before the period is checked in code.
static RE_SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\.\s+["'(\[]*\p{Lu}"#).unwrap());

/// Period closing the text, before any closing brackets or quotes.
static RE_FINAL_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([^.])(\.)([\])}>"']*)\s*$"#).unwrap());

/// Split off periods that end a sentence inside the text.
fn split_sentence_periods(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut copied = 0;
    for m in RE_SENTENCE_END.find_iter(text) {
        let before = text[..m.start()].chars().next_back();
        if before.is_some_and(|c| c != '.' && !c.is_whitespace()) {
            out.push_str(&text[copied..m.start()]);
            out.push_str(" .");
            copied = m.start() + 1;
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Split raw text into word and punctuation tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let s = split_sentence_periods(text);
    let s = RE_FINAL_PERIOD.replace(&s, "$1 $2$3 ");
    let s = RE_ALWAYS_SPLIT.replace_all(&s, " $1 ");
    let s = RE_COMMA_COLON.replace_all(&s, " $1 $2");
    let s = RE_CLITIC.replace_all(&s, "$1 $2$3");
    s.split_whitespace().map(str::to_string).collect()
}
