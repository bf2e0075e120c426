use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TOKEN_RE: Regex = Regex::new(r"[a-z]+").expect("valid regex");
}

/// Lowercase `text` and split it into alphabetic tokens, in document order.
/// Digits, punctuation, and whitespace act as separators and are discarded.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
