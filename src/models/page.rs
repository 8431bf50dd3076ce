use serde::{Deserialize, Serialize};

/// Structural counts taken from a parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetrics {
    pub word_count: usize,
    pub reading_time: usize,
    pub heading_count: usize,
    pub paragraph_count: usize,
    pub image_count: usize,
    pub link_count: usize,
    pub button_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub level: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    #[serde(rename = "type")]
    pub element_type: String,
    pub text: String,
    pub is_prominent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageComponents {
    pub title: String,
    pub meta_description: String,
    pub headings: Vec<Heading>,
    pub ctas: Vec<CallToAction>,
}
