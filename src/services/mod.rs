pub mod analyzer;
pub mod components;
pub mod document;
pub mod fallback;
pub mod fetcher;
pub mod gemini;
pub mod metrics;
pub mod model;
pub mod prompt;
pub mod response_parser;

pub use analyzer::AnalyzerService;
pub use components::ComponentExtractor;
pub use document::PageDocument;
pub use fallback::build_fallback;
pub use fetcher::FetcherService;
pub use gemini::GeminiClient;
pub use metrics::MetricsExtractor;
pub use model::ModelClient;
pub use prompt::PromptBuilder;
pub use response_parser::parse_model_response;
