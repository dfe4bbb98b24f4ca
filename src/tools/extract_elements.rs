use async_trait::async_trait;
use mcp_protocol_sdk::prelude::*;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;
use url::Url;

use super::document::{element_text, parse_document};
use super::error::{ToolError, ToolOutcome};
use super::meta::{ToolInputSchema, ToolMeta};
use super::utils::{Fetcher, parse_arguments, parse_http_url, resolve_url, text_tool_result};

pub const NAME: &str = "extract_elements";

static META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META.get_or_init(|| {
        let properties = serde_json::json!({
            "url": { "type": "string", "format": "uri", "description": "The URL of the webpage to fetch" },
            "selector": { "type": "string", "description": "CSS selector to target specific elements (e.g., 'h1', '.article-content', '#main')" },
            "attribute": { "type": "string", "description": "Specific attribute to extract (e.g., 'href', 'src', 'alt')" }
        });
        let schema = ToolInputSchema::new(
            "object",
            properties,
            vec!["url".to_string(), "selector".to_string()],
        );
        ToolMeta::new(
            NAME,
            "Extract Specific Elements",
            "Extract specific HTML elements from a webpage using CSS selectors",
            schema,
        )
    })
    .clone()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractRequest {
    pub url: String,
    pub selector: String,
    #[serde(default)]
    pub attribute: Option<String>,
}

impl ExtractRequest {
    pub fn validate(&self) -> ToolOutcome<Url> {
        if self.selector.trim().is_empty() {
            return Err(ToolError::invalid_arguments("'selector' must not be empty"));
        }
        parse_http_url(&self.url)
    }

    /// Attribute to read, ignoring an empty string.
    fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct ExtractedElements {
    pub url: String,
    pub selector: String,
    pub attribute: Option<String>,
    pub values: Vec<String>,
}

impl fmt::Display for ExtractedElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# Elements extracted from {}\n\n**Selector:** `{}`", self.url, self.selector)?;
        if let Some(attr) = &self.attribute {
            write!(f, "\n**Attribute:** `{attr}`")?;
        }
        write!(f, "\n**Found:** {} elements\n\n", self.values.len())?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}. {}", i + 1, value)?;
        }
        Ok(())
    }
}

fn is_link_attribute(name: &str) -> bool {
    name.eq_ignore_ascii_case("href") || name.eq_ignore_ascii_case("src")
}

/// Apply the caller's selector to a page body, in document order.
///
/// A selector that fails to parse matches nothing.
pub fn extract(html: &str, page_url: &Url, request: &ExtractRequest) -> ToolOutcome<ExtractedElements> {
    let mut values = Vec::new();
    match Selector::parse(&request.selector) {
        Ok(sel) => {
            let doc = parse_document(html);
            let attribute = request.attribute().map(str::to_ascii_lowercase);
            for el in doc.select(&sel) {
                match attribute.as_deref() {
                    Some(name) => {
                        let Some(value) = el.value().attr(name).filter(|v| !v.is_empty()) else {
                            continue;
                        };
                        if is_link_attribute(name) {
                            values.push(resolve_url(page_url, value)?);
                        } else {
                            values.push(value.to_string());
                        }
                    }
                    None => values.push(element_text(&el).trim().to_string()),
                }
            }
        }
        Err(e) => {
            tracing::debug!(selector = %request.selector, error = %e, "selector did not parse; no matches");
        }
    }

    Ok(ExtractedElements {
        url: request.url.clone(),
        selector: request.selector.clone(),
        attribute: request.attribute().map(str::to_string),
        values,
    })
}

pub struct ExtractElementsHandler {
    pub fetcher: Fetcher,
}

impl ExtractElementsHandler {
    pub async fn extract(&self, request: &ExtractRequest) -> ToolOutcome<ExtractedElements> {
        let page_url = request.validate()?;
        let response = self.fetcher.get(&page_url).await?;
        extract(&response.body, &page_url, request)
    }
}

#[async_trait]
impl ToolHandler for ExtractElementsHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<ToolResult> {
        const CONTEXT: &str = "Failed to extract elements";
        let request: ExtractRequest = parse_arguments(arguments).map_err(|e| e.into_mcp(CONTEXT))?;

        match self.extract(&request).await {
            Ok(found) => {
                tracing::info!(url = %request.url, selector = %request.selector, found = found.values.len(), "extract_elements completed");
                Ok(text_tool_result(found.to_string()))
            }
            Err(err) => {
                tracing::warn!(url = %request.url, kind = ?err.kind(), error = %err, "extract_elements failed");
                Err(err.into_mcp(CONTEXT))
            }
        }
    }
}
