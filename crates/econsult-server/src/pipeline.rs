//! The analysis pipeline: rebuild every prediction from the comment set.

use tracing::{info, warn};

use crate::state::AppState;
use econsult_core::Result;
use econsult_infer::IntentPrediction;
use econsult_store::NewPrediction;
use econsult_text::{extract_keywords, summarize, DEFAULT_MAX_SENTENCES};

/// Keywords stored per comment.
const PER_COMMENT_KEYWORDS: usize = 5;

/// Run the full analysis over all stored comments.
///
/// Strictly sequential: delete every prediction, then classify, summarize
/// and keyword each comment in insertion order, then regenerate the
/// corpus-wide word cloud. Analysis is never incremental, so repeated runs
/// over an unchanged comment set produce the same result. Returns the
/// number of comments processed.
pub fn run_analysis(state: &AppState) -> Result<usize> {
    let _guard = state.analysis_lock.lock();

    state.store.delete_all_predictions()?;
    let comments = state.store.all_comments()?;

    let mut texts: Vec<String> = Vec::with_capacity(comments.len());
    for comment in &comments {
        let intent = state
            .classifier
            .classify(&comment.text)
            .unwrap_or_else(IntentPrediction::fallback);

        let summary = summarize(&comment.text, DEFAULT_MAX_SENTENCES);
        let keywords = extract_keywords(&[comment.text.as_str()], PER_COMMENT_KEYWORDS)
            .into_iter()
            .map(|(term, _)| term)
            .collect();

        state.store.insert_prediction(&NewPrediction {
            comment_id: comment.id,
            sentiment: intent.label,
            sentiment_score: intent.confidence,
            summary,
            keywords,
            clause: comment.clause.clone(),
        })?;

        texts.push(comment.text.clone());
    }

    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let freqs = extract_keywords(&refs, state.config.wordcloud.top_keywords);
    if let Err(e) = state
        .renderer
        .render_to(&state.config.data_paths.wordcloud_image, &freqs)
    {
        // Degraded output, not a request failure.
        warn!("Word-cloud render failed: {}", e);
    }

    info!("Analysis complete: {} comments processed", comments.len());
    Ok(comments.len())
}
