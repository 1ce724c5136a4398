//! Keyword extraction — normalizes free-form résumé text into query terms.
//!
//! Tokens come from Unicode word segmentation (UAX #29). A token is kept only
//! when every char is alphabetic and it is not an English stop word; kept
//! tokens are lowercased. Order and duplicates are preserved.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use stop_words::{get, LANGUAGE};
use unicode_segmentation::UnicodeSegmentation;

static STOP_WORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    get(LANGUAGE::English)
        .iter()
        .map(|w| w.to_lowercase())
        .collect()
});

/// Extracts normalized keywords from already-decoded text. Pure; never fails.
pub fn extract_keywords(document_text: &str) -> Vec<String> {
    document_text
        .unicode_words()
        .filter(|token| token.chars().all(char::is_alphabetic))
        .map(str::to_lowercase)
        .filter(|token| !is_stop_word(token))
        .collect()
}

pub fn is_stop_word(lowercased: &str) -> bool {
    STOP_WORDS.contains(lowercased)
}
