//! Lexical building blocks shared by the measurement extractors.

use lazy_static::lazy_static;
use regex::Regex;

/// Spelled-out counts accepted wherever a small number may appear.
pub const NUMBER_WORDS: [&str; 11] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

/// Capture group for a count: digits or a spelled-out number zero through ten.
pub const COUNT: &str = r"(\d+|zero|one|two|three|four|five|six|seven|eight|nine|ten)";

/// Capture group for a quantity that may carry thousands separators ("1,000").
pub const QUANTITY: &str = r"(\d{1,3}(?:,\d{3})+|\d+)";

/// Unit suffix for inches: "inches", "inch", "in." or a double quote.
pub const INCHES: &str = r#"(?:\s*inch(?:es)?\b|\s*in\.|\s*["”])"#;

lazy_static! {
    // Sentence boundary: terminal punctuation followed by whitespace, or a blank line
    pub static ref SENTENCE_BREAK: Regex = Regex::new(r"[.!?]+\s+|\n\s*\n").unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();

    // Inch measurement with an optional range: "12 inches", "12-24 inches",
    // "12 in. to 36 in.", `18"`
    pub static ref INCH_MEASURE: Regex = Regex::new(&format!(
        r"(?i)\b(\d+)(?:(?:{INCHES})?\s*(?:-|to)\s*(\d+))?{INCHES}"
    ))
    .unwrap();

    // Text ending in a number and the "in" of an "in." unit
    static ref INCH_ABBREVIATION: Regex = Regex::new(r"(?i)\d\s*in$").unwrap();
}

/// Map a spelled-out number (zero to ten) to its value.
pub fn number_word(word: &str) -> Option<u32> {
    let word = word.trim().to_lowercase();
    NUMBER_WORDS
        .iter()
        .position(|w| *w == word)
        .map(|i| i as u32)
}

/// Parse a count captured by [`COUNT`] or [`QUANTITY`].
pub fn parse_count(s: &str) -> Option<u32> {
    let digits: String = s.chars().filter(|c| *c != ',').collect();
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return digits.parse().ok();
    }
    number_word(s)
}

/// Split text into sentences. The period of an "in." unit after a number
/// does not end a sentence.
pub fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut parts = Vec::new();
    let mut start = 0;

    for brk in SENTENCE_BREAK.find_iter(text) {
        if brk.as_str().starts_with('.') && INCH_ABBREVIATION.is_match(&text[start..brk.start()]) {
            continue;
        }
        parts.push(&text[start..brk.start()]);
        start = brk.end();
    }
    parts.push(&text[start..]);

    parts.into_iter().filter(|s| !s.trim().is_empty())
}

/// Collapse every whitespace run to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}
