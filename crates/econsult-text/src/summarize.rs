//! Naive extractive summarization: first N sentences.

/// Sentences used when callers do not specify a cap.
pub const DEFAULT_MAX_SENTENCES: usize = 2;

/// Split `text` into sentences and rejoin the first `max_sentences` with a
/// single space. Boundaries sit immediately after `.`, `!` or `?` followed
/// by whitespace. Text with fewer sentences is returned trimmed but
/// otherwise unchanged; empty input yields an empty string.
pub fn summarize(text: &str, max_sentences: usize) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() || max_sentences == 0 {
        return String::new();
    }

    split_sentences(trimmed)
        .into_iter()
        .take(max_sentences)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sentence segmentation on terminal punctuation followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, ch)) = chars.next() {
        if matches!(ch, '.' | '!' | '?') {
            if let Some(&(next_idx, next_ch)) = chars.peek() {
                if next_ch.is_whitespace() {
                    let sentence = text[start..next_idx].trim();
                    if !sentence.is_empty() {
                        sentences.push(sentence);
                    }
                    start = next_idx;
                }
            }
        }
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}
