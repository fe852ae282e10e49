//! Query normalization into stopword-free token sequences.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NON_TOKEN_CHARS: Lazy<Regex> = Lazy::new(|| {
    // static pattern, cannot fail
    Regex::new(r"[^a-z0-9\s]").unwrap()
});

/// Classic English stopword list, including every single letter and digit.
const STOPWORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "another", "any", "are", "as", "at",
    "be", "because", "been", "before", "being", "between", "both", "but", "by", "came", "can",
    "come", "could", "did", "do", "each", "for", "from", "get", "got", "had", "has", "have", "he",
    "her", "here", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "like",
    "make", "many", "me", "might", "more", "most", "much", "must", "my", "never", "now", "of",
    "on", "only", "or", "other", "our", "out", "over", "said", "same", "see", "should", "since",
    "some", "still", "such", "take", "than", "that", "the", "their", "them", "then", "there",
    "these", "they", "this", "those", "through", "to", "too", "under", "up", "very", "was", "way",
    "we", "well", "were", "what", "where", "which", "while", "who", "with", "would", "you", "your",
    "b", "c", "d", "e", "f", "g", "h", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u",
    "v", "w", "x", "y", "z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// Whether `token` is on the stopword list.
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Turn a raw query into its ordered token sequence.
///
/// Lowercases, drops every character outside `[a-z0-9]` and whitespace,
/// splits on whitespace runs and removes stopwords. Never fails; the
/// result may be empty.
pub fn normalize_query(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let cleaned = NON_TOKEN_CHARS.replace_all(&lowered, "");

    cleaned
        .split_whitespace()
        .filter(|t| !is_stopword(t))
        .map(str::to_string)
        .collect()
}
