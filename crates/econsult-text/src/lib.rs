//! eConsult Text — stateless transforms over raw comment text.
//!
//! PII redaction, first-N-sentence summarization, and statistical keyword
//! extraction. Every function here is a pure single-pass transform; all
//! failure modes degrade to fixed fallbacks rather than erroring.

pub mod keywords;
pub mod redact;
pub mod summarize;

pub use keywords::{extract_keywords, FALLBACK_TERMS};
pub use redact::redact;
pub use summarize::{split_sentences, summarize, DEFAULT_MAX_SENTENCES};
