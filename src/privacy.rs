use crate::error::ApiError;
use crate::types::PrivacyStatement;

pub const DEFAULT_STATEMENT: &str = "<h2>Privacy Statement</h2>\
<p>This is the default privacy statement content. The AI agent can modify this content through the website_content_manager tool.</p>";

pub const UNAVAILABLE_STATEMENT: &str = "<h2>Privacy Statement</h2>\
<p>Error loading content. This demonstrates the excessive agency vulnerability where the AI can modify website content.</p>";

pub const LOAD_ERROR: &str = "Error loading privacy statement.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedStatement {
    pub html: String,
    pub error: Option<&'static str>,
}

/// A missing asset falls back quietly; a failed fetch also reports the error.
pub fn resolve(result: Result<PrivacyStatement, ApiError>) -> ResolvedStatement {
    match result {
        Ok(statement) => ResolvedStatement {
            html: statement.content,
            error: None,
        },
        Err(ApiError::Backend { status, .. }) => {
            log::info!("privacy statement unavailable (status {status}), using default");
            ResolvedStatement {
                html: DEFAULT_STATEMENT.to_string(),
                error: None,
            }
        }
        Err(error) => {
            log::warn!("failed to load privacy statement: {error}");
            ResolvedStatement {
                html: UNAVAILABLE_STATEMENT.to_string(),
                error: Some(LOAD_ERROR),
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBlock {
    Heading(String),
    Paragraph(String),
}

impl TextBlock {
    pub fn from_tag(tag: &str, text: &str) -> Option<Self> {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return None;
        }
        match tag.to_ascii_lowercase().as_str() {
            "script" | "style" | "template" => None,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Some(TextBlock::Heading(text)),
            _ => Some(TextBlock::Paragraph(text)),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::text_blocks;

#[cfg(target_arch = "wasm32")]
mod browser {
    use web_sys::{DomParser, SupportedType};

    use super::TextBlock;

    /// Parses into an inert document (no scripts run, nothing is attached to
    /// the page) and keeps only the text of each top-level element.
    pub fn text_blocks(html: &str) -> Vec<TextBlock> {
        let Ok(parser) = DomParser::new() else {
            return fallback(html);
        };
        let Ok(document) = parser.parse_from_string(html, SupportedType::TextHtml) else {
            return fallback(html);
        };
        let Some(body) = document.body() else {
            return fallback(html);
        };

        let children = body.children();
        let mut blocks = Vec::new();
        for index in 0..children.length() {
            let Some(element) = children.item(index) else {
                continue;
            };
            let text = element.text_content().unwrap_or_default();
            blocks.extend(TextBlock::from_tag(&element.tag_name(), &text));
        }
        if blocks.is_empty() {
            blocks.extend(TextBlock::from_tag("p", &body.text_content().unwrap_or_default()));
        }
        blocks
    }

    fn fallback(html: &str) -> Vec<TextBlock> {
        log::warn!("DOMParser unavailable, showing privacy statement source as text");
        TextBlock::from_tag("p", html).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_asset_uses_default_quietly() {
        let resolved = resolve(Err(ApiError::Backend { status: 404, detail: None }));
        assert_eq!(resolved.html, DEFAULT_STATEMENT);
        assert_eq!(resolved.error, None);
    }

    #[test]
    fn test_network_failure_reports_error() {
        let resolved = resolve(Err(ApiError::Network("offline".to_string())));
        assert_eq!(resolved.html, UNAVAILABLE_STATEMENT);
        assert_eq!(resolved.error, Some(LOAD_ERROR));

        let resolved = resolve(Err(ApiError::Decode("expected value".to_string())));
        assert_eq!(resolved.error, Some(LOAD_ERROR));
    }

    #[test]
    fn test_loaded_content_passes_through() {
        let resolved = resolve(Ok(PrivacyStatement {
            content: "<p>Updated by agent</p>".to_string(),
        }));
        assert_eq!(resolved.html, "<p>Updated by agent</p>");
    }

    #[test]
    fn test_text_block_collapses_whitespace() {
        assert_eq!(
            TextBlock::from_tag("H2", "  Privacy \n Statement "),
            Some(TextBlock::Heading("Privacy Statement".to_string()))
        );
        assert_eq!(TextBlock::from_tag("div", " \n "), None);
        assert_eq!(TextBlock::from_tag("script", "alert(1)"), None);
        assert_eq!(
            TextBlock::from_tag("p", "<img src=x onerror=alert(1)>"),
            Some(TextBlock::Paragraph("<img src=x onerror=alert(1)>".to_string()))
        );
    }
}
