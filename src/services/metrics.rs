use lazy_static::lazy_static;
use scraper::Selector;
use tracing::debug;

use crate::models::PageMetrics;
use crate::services::PageDocument;

pub const WORDS_PER_MINUTE: usize = 200;

lazy_static! {
    static ref HEADINGS: Selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    static ref PARAGRAPHS: Selector = Selector::parse("p").unwrap();
    static ref IMAGES: Selector = Selector::parse("img").unwrap();
    static ref LINKS: Selector = Selector::parse("a").unwrap();
    static ref BUTTONS: Selector = Selector::parse(
        "button, [class*='btn'], [class*='button'], [type='button'], [type='submit']"
    )
    .unwrap();
}

pub struct MetricsExtractor;

impl MetricsExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, document: &PageDocument) -> PageMetrics {
        let word_count = document
            .visible_body_text()
            .iter()
            .map(|text| text.split_whitespace().count())
            .sum();

        let metrics = PageMetrics {
            word_count,
            reading_time: reading_time(word_count),
            heading_count: document.count(&HEADINGS),
            paragraph_count: document.count(&PARAGRAPHS),
            image_count: document.count(&IMAGES),
            link_count: document.count(&LINKS),
            button_count: document.count(&BUTTONS),
        };

        debug!("Page metrics: {:?}", metrics);
        metrics
    }
}

impl Default for MetricsExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole minutes at [`WORDS_PER_MINUTE`], rounded up.
pub fn reading_time(word_count: usize) -> usize {
    word_count.div_ceil(WORDS_PER_MINUTE)
}
