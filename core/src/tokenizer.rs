use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\S+").expect("valid regex");
}

/// Lowercase the text and split it on runs of whitespace.
///
/// Punctuation stays attached to its word; no stemming or stop-word removal.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}
