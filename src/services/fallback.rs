use crate::models::{AnalysisResult, MetricsMap, PageMetrics, Suggestion, SuggestionCategory};

pub const FALLBACK_SCORE: u8 = 50;
pub const FALLBACK_TITLE: &str = "API Error - Basic Analysis Only";
pub const FALLBACK_RECOMMENDATION: &str =
    "Please ensure your Gemini API key is correctly set up in your environment variables.";

/// Degraded result built from local metrics alone.
pub fn build_fallback(metrics: &PageMetrics, error_message: &str) -> AnalysisResult {
    AnalysisResult {
        overall_score: FALLBACK_SCORE,
        suggestions: vec![Suggestion {
            title: FALLBACK_TITLE.to_string(),
            category: SuggestionCategory::Copy,
            description: format!(
                "We couldn't perform a full UX analysis ({}). Check your Gemini API key configuration.",
                error_message
            ),
            recommendation: Some(FALLBACK_RECOMMENDATION.to_string()),
        }],
        metrics: MetricsMap::from(metrics),
    }
}
