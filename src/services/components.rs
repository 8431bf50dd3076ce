use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Selector};
use tracing::debug;

use crate::models::{CallToAction, Heading, PageComponents};
use crate::services::PageDocument;

const PROMINENT_FONT_SIZE_PX: f32 = 16.0;
const PROMINENT_WIDTH_PX: f32 = 200.0;

lazy_static! {
    static ref HEADINGS: Selector = Selector::parse("h1, h2, h3").unwrap();
    static ref CTA_CANDIDATES: Selector =
        Selector::parse("button, [class*='btn'], [class*='button'], a[href]").unwrap();
    static ref TITLE: Selector = Selector::parse("title").unwrap();
    static ref META_DESCRIPTION: Selector =
        Selector::parse("meta[name='description']").unwrap();
    static ref INLINE_FONT_SIZE: Regex =
        Regex::new(r"(?i)(?:^|;)\s*font-size\s*:\s*([0-9]*\.?[0-9]+)px").unwrap();
    static ref INLINE_WIDTH: Regex =
        Regex::new(r"(?i)(?:^|;)\s*width\s*:\s*([0-9]*\.?[0-9]+)px").unwrap();
}

/// Pulls the bounded set of page facts that get described to the model.
pub struct ComponentExtractor;

impl ComponentExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, document: &PageDocument) -> PageComponents {
        let components = PageComponents {
            title: self.extract_title(document),
            meta_description: self.extract_meta_description(document),
            headings: self.extract_headings(document),
            ctas: self.extract_ctas(document),
        };

        debug!(
            "Extracted {} headings and {} CTAs",
            components.headings.len(),
            components.ctas.len()
        );
        components
    }

    fn extract_headings(&self, document: &PageDocument) -> Vec<Heading> {
        document
            .select(&HEADINGS)
            .map(|element| Heading {
                level: element.value().name().to_lowercase(),
                text: element_text(&element),
            })
            .collect()
    }

    fn extract_ctas(&self, document: &PageDocument) -> Vec<CallToAction> {
        document
            .select(&CTA_CANDIDATES)
            .filter(is_cta_candidate)
            .filter_map(|element| {
                let text = element_text(&element);
                if text.is_empty() {
                    return None;
                }

                Some(CallToAction {
                    element_type: element.value().name().to_lowercase(),
                    text,
                    is_prominent: is_prominent(&element),
                })
            })
            .collect()
    }

    fn extract_title(&self, document: &PageDocument) -> String {
        document
            .first(&TITLE)
            .map(|element| element_text(&element))
            .unwrap_or_default()
    }

    fn extract_meta_description(&self, document: &PageDocument) -> String {
        document
            .first(&META_DESCRIPTION)
            .and_then(|element| element.value().attr("content"))
            .map(|content| content.to_string())
            .unwrap_or_default()
    }
}

impl Default for ComponentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn class_attr<'a>(element: &ElementRef<'a>) -> &'a str {
    element.value().attr("class").unwrap_or("")
}

/// Anchors only qualify through a non-empty href unless styled as a button.
fn is_cta_candidate(element: &ElementRef<'_>) -> bool {
    let el = element.value();
    if el.name() == "button" {
        return true;
    }

    let class = class_attr(element);
    if class.contains("btn") || class.contains("button") {
        return true;
    }

    el.name() == "a"
        && el
            .attr("href")
            .map(|href| !href.trim().is_empty())
            .unwrap_or(false)
}

/// Layout is not computed, so the size signals only come from inline styles.
fn is_prominent(element: &ElementRef<'_>) -> bool {
    if class_attr(element).contains("primary") {
        return true;
    }

    let Some(style) = element.value().attr("style") else {
        return false;
    };

    inline_px(&INLINE_FONT_SIZE, style).is_some_and(|px| px > PROMINENT_FONT_SIZE_PX)
        || inline_px(&INLINE_WIDTH, style).is_some_and(|px| px > PROMINENT_WIDTH_PX)
}

fn inline_px(pattern: &Regex, style: &str) -> Option<f32> {
    pattern
        .captures(style)
        .and_then(|captures| captures.get(1))
        .and_then(|value| value.as_str().parse().ok())
}
