use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::{AnalysisResult, ModelVerdict, PageComponents, PageMetrics};
use crate::services::{
    build_fallback, parse_model_response, ComponentExtractor, MetricsExtractor, ModelClient,
    PageDocument, PromptBuilder,
};

pub struct AnalyzerService {
    model: Arc<dyn ModelClient>,
    metrics: MetricsExtractor,
    components: ComponentExtractor,
    prompts: PromptBuilder,
}

impl AnalyzerService {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self {
            model,
            metrics: MetricsExtractor::new(),
            components: ComponentExtractor::new(),
            prompts: PromptBuilder::new(),
        }
    }

    /// Runs a full analysis. Model and parse failures never escape: they are
    /// turned into the fallback result.
    pub async fn analyze(&self, html: &str, url: Option<&str>) -> AnalysisResult {
        let start = Instant::now();

        let (metrics, components) = self.extract(html);
        let prompt = self.prompts.build(&metrics, &components, url, html);
        debug!("Built prompt of {} chars", prompt.len());

        match self.consult_model(&prompt).await {
            Ok(verdict) => {
                info!(
                    "Model analysis finished in {}ms (score {}, {} suggestions)",
                    start.elapsed().as_millis(),
                    verdict.overall_score,
                    verdict.suggestions.len()
                );
                AnalysisResult::from_verdict(verdict, &metrics)
            }
            Err(e) => {
                warn!("Model analysis failed, returning basic analysis: {}", e);
                build_fallback(&metrics, &e.to_string())
            }
        }
    }

    /// The parsed tree is not `Send`, so it stays inside this synchronous step.
    fn extract(&self, html: &str) -> (PageMetrics, PageComponents) {
        let document = PageDocument::parse(html);
        (
            self.metrics.extract(&document),
            self.components.extract(&document),
        )
    }

    async fn consult_model(&self, prompt: &str) -> Result<ModelVerdict> {
        let raw = self.model.invoke(prompt).await?;
        parse_model_response(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{MetricsMap, SuggestionCategory};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    const PAGE: &str = r#"<html><head><title>Acme</title></head><body>
        <h1>Ship faster</h1>
        <p>Acme builds rockets for everyone.</p>
        <a class="btn btn-primary" href="/start">Get started</a>
    </body></html>"#;

    struct CannedModel {
        reply: String,
        prompts: Mutex<Vec<String>>,
    }

    impl CannedModel {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for CannedModel {
        async fn invoke(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ModelClient for FailingModel {
        async fn invoke(&self, _prompt: &str) -> Result<String> {
            Err(AppError::Upstream("503: overloaded".to_string()))
        }
    }

    fn local_metrics(html: &str) -> MetricsMap {
        MetricsMap::from(&MetricsExtractor::new().extract(&PageDocument::parse(html)))
    }

    #[tokio::test]
    async fn merges_model_verdict_with_local_metrics() {
        let model = Arc::new(CannedModel::new(
            r#"Sure! {"overallScore": 81, "suggestions": [
                {"title": "Add proof", "category": "Trust", "description": "No logos.", "recommendation": "Show customer logos."}
            ], "metrics": {"Word Count": "9999"}}"#,
        ));
        let analyzer = AnalyzerService::new(model.clone());

        let result = analyzer.analyze(PAGE, Some("https://acme.test")).await;

        assert_eq!(result.overall_score, 81);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].category, SuggestionCategory::Trust);
        assert_eq!(result.metrics, local_metrics(PAGE));

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("a (prominent): \"Get started\""));
        assert!(prompts[0].contains("at https://acme.test"));
    }

    #[test]
    fn repeated_analysis_is_stable() {
        let model = Arc::new(CannedModel::new(r#"{"overallScore": 40, "suggestions": []}"#));
        let analyzer = AnalyzerService::new(model);

        let first = tokio_test::block_on(analyzer.analyze(PAGE, None));
        let second = tokio_test::block_on(analyzer.analyze(PAGE, None));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn model_failure_falls_back() {
        let analyzer = AnalyzerService::new(Arc::new(FailingModel));

        let result = analyzer.analyze(PAGE, None).await;

        assert_eq!(result.overall_score, 50);
        assert_eq!(result.suggestions.len(), 1);
        assert_eq!(result.suggestions[0].category, SuggestionCategory::Copy);
        assert!(result.suggestions[0].description.contains("503: overloaded"));
        assert_eq!(result.metrics, local_metrics(PAGE));
    }

    #[tokio::test]
    async fn unparseable_reply_falls_back() {
        let analyzer = AnalyzerService::new(Arc::new(CannedModel::new("no json here")));

        let result = analyzer.analyze(PAGE, None).await;

        assert_eq!(result.overall_score, 50);
        assert_eq!(result.suggestions[0].category, SuggestionCategory::Copy);
    }

    #[tokio::test]
    async fn reply_missing_suggestions_falls_back() {
        let analyzer = AnalyzerService::new(Arc::new(CannedModel::new(r#"{"overallScore": 90}"#)));

        let result = analyzer.analyze(PAGE, None).await;

        assert_eq!(result.overall_score, 50);
        assert_eq!(result.suggestions.len(), 1);
    }
}
