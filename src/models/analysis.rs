use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::PageMetrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionCategory {
    #[serde(rename = "CTA")]
    Cta,
    Hierarchy,
    Copy,
    Trust,
}

impl FromStr for SuggestionCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "cta" => Ok(Self::Cta),
            "hierarchy" => Ok(Self::Hierarchy),
            "copy" => Ok(Self::Copy),
            "trust" => Ok(Self::Trust),
            other => Err(format!("unknown suggestion category: {}", other)),
        }
    }
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Cta => "CTA",
            Self::Hierarchy => "Hierarchy",
            Self::Copy => "Copy",
            Self::Trust => "Trust",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub category: SuggestionCategory,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// The part of an analysis that comes from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelVerdict {
    pub overall_score: u8,
    pub suggestions: Vec<Suggestion>,
}

/// Display form of [`PageMetrics`], keyed by the labels the front end renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsMap {
    #[serde(rename = "Word Count")]
    pub word_count: String,
    #[serde(rename = "Reading Time")]
    pub reading_time: String,
    #[serde(rename = "Headings")]
    pub headings: String,
    #[serde(rename = "Paragraphs")]
    pub paragraphs: String,
    #[serde(rename = "Images")]
    pub images: String,
    #[serde(rename = "Links")]
    pub links: String,
    #[serde(rename = "Buttons")]
    pub buttons: String,
}

impl From<&PageMetrics> for MetricsMap {
    fn from(metrics: &PageMetrics) -> Self {
        Self {
            word_count: metrics.word_count.to_string(),
            reading_time: format!("{} min", metrics.reading_time),
            headings: metrics.heading_count.to_string(),
            paragraphs: metrics.paragraph_count.to_string(),
            images: metrics.image_count.to_string(),
            links: metrics.link_count.to_string(),
            buttons: metrics.button_count.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub overall_score: u8,
    pub suggestions: Vec<Suggestion>,
    pub metrics: MetricsMap,
}

impl AnalysisResult {
    pub fn from_verdict(verdict: ModelVerdict, metrics: &PageMetrics) -> Self {
        Self {
            overall_score: verdict.overall_score,
            suggestions: verdict.suggestions,
            metrics: MetricsMap::from(metrics),
        }
    }
}
