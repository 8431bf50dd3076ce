use crate::models::{PageComponents, PageMetrics};

/// Characters of raw markup appended to the prompt.
pub const HTML_EXCERPT_CHARS: usize = 3000;

/// Reply shape the response parser accepts.
pub const RESPONSE_SCHEMA: &str = r#"{
  "overallScore": number from 0-100,
  "suggestions": [
    {
      "title": "clear suggestion title",
      "category": "CTA, Hierarchy, Copy, or Trust",
      "description": "description of the issue",
      "recommendation": "specific recommendation"
    }
  ]
}"#;

pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(
        &self,
        metrics: &PageMetrics,
        components: &PageComponents,
        url: Option<&str>,
        html: &str,
    ) -> String {
        let location = url
            .filter(|u| !u.is_empty())
            .map(|u| format!(" at {}", u))
            .unwrap_or_default();

        let mut lines = vec![
            format!(
                "You are a UX expert specialized in landing page optimization. Analyze this landing page{} based on the HTML components I'll provide.",
                location
            ),
            String::new(),
            "Focus on:".to_string(),
            "- CTA clarity and effectiveness".to_string(),
            "- Visual hierarchy and layout".to_string(),
            "- Copy effectiveness and readability".to_string(),
            "- Trust signals and credibility".to_string(),
            String::new(),
            format!("Page Title: {}", components.title),
            format!("Meta Description: {}", components.meta_description),
            String::new(),
            "Headings:".to_string(),
        ];

        lines.extend(
            components
                .headings
                .iter()
                .map(|h| format!("{}: \"{}\"", h.level, h.text)),
        );

        lines.push(String::new());
        lines.push("Call-to-Actions:".to_string());
        lines.extend(components.ctas.iter().map(|cta| {
            let marker = if cta.is_prominent { " (prominent)" } else { "" };
            format!("{}{}: \"{}\"", cta.element_type, marker, cta.text)
        }));

        lines.extend([
            String::new(),
            "Page Statistics:".to_string(),
            format!("- Word Count: {}", metrics.word_count),
            format!("- Reading Time: {} min", metrics.reading_time),
            format!("- Number of Headings: {}", metrics.heading_count),
            format!("- Number of Paragraphs: {}", metrics.paragraph_count),
            format!("- Number of Images: {}", metrics.image_count),
            format!("- Number of Links: {}", metrics.link_count),
            format!("- Number of Buttons: {}", metrics.button_count),
            String::new(),
            "HTML Snapshot (truncated):".to_string(),
            html_excerpt(html).to_string(),
            String::new(),
            "Please analyze this landing page and provide your recommendations. Respond with only a JSON object with this structure:".to_string(),
            RESPONSE_SCHEMA.to_string(),
        ]);

        lines.join("\n")
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// First [`HTML_EXCERPT_CHARS`] characters, cut on a char boundary.
pub fn html_excerpt(html: &str) -> &str {
    match html.char_indices().nth(HTML_EXCERPT_CHARS) {
        Some((idx, _)) => &html[..idx],
        None => html,
    }
}
