//! Single-word statistical keyword extraction.
//!
//! Unsupervised scoring over a concatenated corpus: each candidate term
//! gets a native score where lower means more important (early first
//! appearance, high normalized frequency, wide sentence spread). Native
//! scores are then inverted into word-cloud weights with a floor of 1.0 so
//! rare terms do not vanish from the cloud.

use std::collections::HashMap;

use crate::summarize::split_sentences;

/// Terms substituted when extraction yields nothing.
pub const FALLBACK_TERMS: &[(&str, f64)] =
    &[("feedback", 1.0), ("policy", 1.0), ("comment", 1.0)];

const SCORE_EPSILON: f64 = 1e-6;

/// Common English words excluded from candidate terms.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can",
    "had", "has", "have", "her", "was", "one", "our", "out", "his", "him",
    "she", "this", "that", "these", "those", "with", "will", "would",
    "should", "could", "from", "they", "them", "their", "there", "then",
    "than", "what", "when", "where", "which", "while", "who", "whom",
    "why", "how", "about", "into", "over", "under", "again", "also",
    "been", "being", "because", "before", "after", "between", "both",
    "does", "doing", "each", "few", "more", "most", "other", "some",
    "such", "only", "own", "same", "very", "too", "its", "itself",
];

struct TermStats {
    frequency: usize,
    first_sentence: usize,
    sentence_count: usize,
    last_seen_sentence: usize,
}

/// Extract up to `top_k` single-word keywords from `texts`, returned as
/// `(term, weight)` pairs sorted by weight descending (ties by term).
///
/// Terms of length <= 2 are discarded after ranking. Empty input or an
/// empty candidate set yields the fixed fallback terms.
pub fn extract_keywords(texts: &[&str], top_k: usize) -> Vec<(String, f64)> {
    if texts.is_empty() {
        return fallback();
    }

    let corpus = texts.join("\n");
    let sentences = split_sentences(&corpus);
    if sentences.is_empty() {
        return fallback();
    }

    let stats = collect_stats(&sentences);
    if stats.is_empty() {
        return fallback();
    }

    let max_freq = stats.values().map(|s| s.frequency).max().unwrap_or(1) as f64;
    let sentence_total = sentences.len() as f64;

    let mut scored: Vec<(String, f64)> = stats
        .into_iter()
        .map(|(term, s)| {
            let position = (3.0 + s.first_sentence as f64).ln().ln();
            let freq_norm = s.frequency as f64 / max_freq;
            let spread = s.sentence_count as f64 / sentence_total;
            (term, position / (freq_norm + spread))
        })
        .collect();

    // Lower native score = more important.
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));

    let mut weighted: Vec<(String, f64)> = scored
        .into_iter()
        .take(top_k)
        .filter(|(term, _)| term.len() > 2)
        .map(|(term, score)| (term, (1.0 / (score + SCORE_EPSILON)).max(1.0)))
        .collect();

    if weighted.is_empty() {
        return fallback();
    }

    weighted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
    weighted
}

fn fallback() -> Vec<(String, f64)> {
    FALLBACK_TERMS
        .iter()
        .map(|&(t, w)| (t.to_string(), w))
        .collect()
}

fn collect_stats(sentences: &[&str]) -> HashMap<String, TermStats> {
    let mut stats: HashMap<String, TermStats> = HashMap::new();

    for (idx, sentence) in sentences.iter().enumerate() {
        for word in tokenize(sentence) {
            if STOPWORDS.contains(&word.as_str()) {
                continue;
            }
            match stats.get_mut(&word) {
                Some(entry) => {
                    entry.frequency += 1;
                    if entry.last_seen_sentence != idx {
                        entry.sentence_count += 1;
                        entry.last_seen_sentence = idx;
                    }
                }
                None => {
                    stats.insert(
                        word,
                        TermStats {
                            frequency: 1,
                            first_sentence: idx,
                            sentence_count: 1,
                            last_seen_sentence: idx,
                        },
                    );
                }
            }
        }
    }

    stats
}

fn tokenize(sentence: &str) -> impl Iterator<Item = String> + '_ {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && w.chars().any(|c| c.is_alphabetic()))
        .map(|w| w.to_lowercase())
}
