//! Static markup parsing.
//!
//! Wraps an html5ever tree built by `scraper`. Parsing never runs scripts or
//! loads subresources, and malformed input is repaired by the tree builder
//! instead of failing.

use lazy_static::lazy_static;
use scraper::html::Select;
use scraper::{ElementRef, Html, Selector};

lazy_static! {
    static ref BODY: Selector = Selector::parse("body").unwrap();
}

/// Elements whose text content is never rendered.
const HIDDEN_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

pub struct PageDocument {
    html: Html,
}

impl PageDocument {
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    pub fn count(&self, selector: &Selector) -> usize {
        self.html.select(selector).count()
    }

    pub fn first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// Text nodes under `<body>` in document order, skipping script-like
    /// containers.
    pub fn visible_body_text(&self) -> Vec<&str> {
        let Some(body) = self.first(&BODY) else {
            return Vec::new();
        };

        body.descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let hidden = node.ancestors().any(|ancestor| {
                    ancestor
                        .value()
                        .as_element()
                        .map(|el| HIDDEN_TEXT_TAGS.contains(&el.name()))
                        .unwrap_or(false)
                });
                if hidden {
                    None
                } else {
                    Some(&**text)
                }
            })
            .collect()
    }
}
