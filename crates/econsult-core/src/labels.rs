//! Intent label set and UI colors.

/// Categorical intent labels emitted by the classifier.
pub const INTENT_LABELS: &[&str] = &[
    "AGREE",
    "DISAGREE",
    "SUGGEST_CHANGE",
    "REQUEST_CLARIFICATION",
    "CLAUSE_FEEDBACK",
];

/// Label returned when no model is loaded or inference degrades.
pub const DEFAULT_INTENT_LABEL: &str = "REQUEST_CLARIFICATION";

/// Clause tag applied when a comment carries none.
pub const DEFAULT_CLAUSE: &str = "overall";

/// Marker substituted for redacted PII spans.
pub const REDACTED_MARKER: &str = "[REDACTED]";
