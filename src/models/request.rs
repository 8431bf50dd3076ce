use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// Where the markup under analysis comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    Url(String),
    Html(String),
}

impl AnalyzeRequest {
    /// Resolves the request to a single source. Blank fields count as absent
    /// and `url` takes precedence when both are supplied.
    pub fn into_source(self) -> Result<PageSource> {
        let url = self.url.filter(|u| !u.trim().is_empty());
        let html = self.html.filter(|h| !h.is_empty());

        match (url, html) {
            (Some(url), _) => Ok(PageSource::Url(url.trim().to_string())),
            (None, Some(html)) => Ok(PageSource::Html(html)),
            (None, None) => Err(AppError::Validation(
                "URL or HTML is required".to_string(),
            )),
        }
    }
}
