use axum::{extract::State, Json};
use std::time::Instant;
use tracing::info;

use crate::error::AppError;
use crate::models::{AnalysisResult, AnalyzeRequest, PageSource};
use crate::AppState;

use super::AppJson;

#[axum::debug_handler]
pub async fn analyze_handler(
    State(state): State<AppState>,
    AppJson(request): AppJson<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, AppError> {
    let start = Instant::now();

    let (html, url) = match request.into_source()? {
        PageSource::Url(url) => {
            info!("Processing analyze request for URL: {}", url);
            let html = state.fetcher.fetch(&url).await?;
            (html, Some(url))
        }
        PageSource::Html(html) => {
            info!("Processing analyze request for {} bytes of HTML", html.len());
            (html, None)
        }
    };

    let result = state.analyzer.analyze(&html, url.as_deref()).await;

    info!(
        "Analysis completed in {}ms with score {}",
        start.elapsed().as_millis(),
        result.overall_score
    );

    Ok(Json(result))
}
