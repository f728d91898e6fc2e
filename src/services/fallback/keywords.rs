//! Keyword extraction for the last fallback stage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Keywords used when nothing in the text qualifies.
pub const DEFAULT_KEYWORDS: &str = "content, ai, automation";

/// Punctuation trimmed from both ends of every token.
const TRIM_CHARS: [char; 6] = ['.', ',', '!', '?', '(', ')'];

/// How keywords are picked from the candidate words
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordStrategy {
    /// Distinct words in the order they first appear
    #[default]
    FirstSeen,
    /// Most frequent words; ties keep first-appearance order
    Frequency,
}

/// Lowercased words in text order.
///
/// The length check applies to the raw token, before punctuation is
/// trimmed, so `car.` and `(EV)` both qualify.
fn candidate_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|token| token.chars().count() > 3)
        .map(|token| token.trim_matches(&TRIM_CHARS[..]).to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Pick up to `limit` keywords from `text`, joined with ", ".
pub fn extract_keywords(text: &str, strategy: KeywordStrategy, limit: usize) -> String {
    let words = candidate_words(text);

    // distinct words with their count, in first-seen order
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for word in words {
        match index.get(&word) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(word.clone(), order.len());
                order.push((word, 1));
            }
        }
    }

    if strategy == KeywordStrategy::Frequency {
        // stable sort keeps first-seen order among equal counts
        order.sort_by(|a, b| b.1.cmp(&a.1));
    }

    let keywords: Vec<String> = order.into_iter().take(limit).map(|(w, _)| w).collect();
    if keywords.is_empty() {
        return DEFAULT_KEYWORDS.to_string();
    }
    keywords.join(", ")
}
