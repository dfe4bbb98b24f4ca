use async_trait::async_trait;
use mcp_protocol_sdk::prelude::*;
use scraper::Html;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use super::document::{first_attr, page_title, parse_document, selector};
use super::error::ToolOutcome;
use super::meta::{ToolInputSchema, ToolMeta};
use super::utils::{Fetcher, parse_arguments, parse_http_url, text_tool_result};

pub const NAME: &str = "get_metadata";

static META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META.get_or_init(|| {
        let properties = serde_json::json!({
            "url": { "type": "string", "format": "uri", "description": "The URL of the webpage to analyze" }
        });
        let schema = ToolInputSchema::new("object", properties, vec!["url".to_string()]);
        ToolMeta::new(
            NAME,
            "Get Page Metadata",
            "Extract metadata (title, description, Open Graph tags, etc.) from a webpage",
            schema,
        )
    })
    .clone()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataRequest {
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Title,
    Description,
    Keywords,
    Author,
    PublishedTime,
    ModifiedTime,
    OgTitle,
    OgImage,
    OgUrl,
    TwitterCard,
    Canonical,
    Language,
    Robots,
}

impl MetadataField {
    /// Every field, in output order.
    pub const ALL: [MetadataField; 13] = [
        Self::Title,
        Self::Description,
        Self::Keywords,
        Self::Author,
        Self::PublishedTime,
        Self::ModifiedTime,
        Self::OgTitle,
        Self::OgImage,
        Self::OgUrl,
        Self::TwitterCard,
        Self::Canonical,
        Self::Language,
        Self::Robots,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Keywords => "keywords",
            Self::Author => "author",
            Self::PublishedTime => "publishedTime",
            Self::ModifiedTime => "modifiedTime",
            Self::OgTitle => "ogTitle",
            Self::OgImage => "ogImage",
            Self::OgUrl => "ogUrl",
            Self::TwitterCard => "twitterCard",
            Self::Canonical => "canonical",
            Self::Language => "language",
            Self::Robots => "robots",
        }
    }

    /// Sources tried in order as `(selector, attribute)`; the first non-empty wins.
    fn sources(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Title => &[],
            Self::Description => &[
                (r#"meta[name="description"]"#, "content"),
                (r#"meta[property="og:description"]"#, "content"),
            ],
            Self::Keywords => &[(r#"meta[name="keywords"]"#, "content")],
            Self::Author => &[(r#"meta[name="author"]"#, "content")],
            Self::PublishedTime => &[
                (r#"meta[property="article:published_time"]"#, "content"),
                (r#"meta[name="date"]"#, "content"),
            ],
            Self::ModifiedTime => &[(r#"meta[property="article:modified_time"]"#, "content")],
            Self::OgTitle => &[(r#"meta[property="og:title"]"#, "content")],
            Self::OgImage => &[(r#"meta[property="og:image"]"#, "content")],
            Self::OgUrl => &[(r#"meta[property="og:url"]"#, "content")],
            Self::TwitterCard => &[(r#"meta[name="twitter:card"]"#, "content")],
            Self::Canonical => &[(r#"link[rel="canonical"]"#, "href")],
            Self::Language => &[
                ("html", "lang"),
                (r#"meta[http-equiv="content-language"]"#, "content"),
            ],
            Self::Robots => &[(r#"meta[name="robots"]"#, "content")],
        }
    }
}

/// Metadata fields present on a page, in [`MetadataField::ALL`] order.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entries: Vec<(MetadataField, String)>,
}

impl Metadata {
    pub fn from_document(doc: &Html) -> ToolOutcome<Self> {
        let mut entries = Vec::new();
        for field in MetadataField::ALL {
            let value = match field {
                MetadataField::Title => Some(page_title(doc)?),
                _ => first_present(doc, field.sources())?,
            };
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                entries.push((field, value));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, field: MetadataField) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (MetadataField, &str)> {
        self.entries.iter().map(|(f, v)| (*f, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn first_present(doc: &Html, sources: &[(&str, &str)]) -> ToolOutcome<Option<String>> {
    for (css, attr) in sources {
        let sel = selector(css)?;
        if let Some(value) = first_attr(doc, &sel, attr).filter(|v| !v.is_empty()) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

pub struct MetadataReport<'a> {
    pub url: &'a str,
    pub metadata: &'a Metadata,
}

impl fmt::Display for MetadataReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# Metadata for {}\n\n", self.url)?;
        for (i, (field, value)) in self.metadata.entries().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "**{}:** {}", field.key(), value)?;
        }
        Ok(())
    }
}

pub fn extract_metadata(html: &str) -> ToolOutcome<Metadata> {
    Metadata::from_document(&parse_document(html))
}

pub struct GetMetadataHandler {
    pub fetcher: Fetcher,
}

impl GetMetadataHandler {
    pub async fn metadata(&self, request: &MetadataRequest) -> ToolOutcome<Metadata> {
        let page_url = parse_http_url(&request.url)?;
        let response = self.fetcher.get(&page_url).await?;
        extract_metadata(&response.body)
    }
}

#[async_trait]
impl ToolHandler for GetMetadataHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<ToolResult> {
        const CONTEXT: &str = "Failed to get metadata";
        let request: MetadataRequest = parse_arguments(arguments).map_err(|e| e.into_mcp(CONTEXT))?;

        match self.metadata(&request).await {
            Ok(metadata) => {
                tracing::info!(url = %request.url, fields = metadata.len(), "get_metadata completed");
                let report = MetadataReport {
                    url: &request.url,
                    metadata: &metadata,
                };
                Ok(text_tool_result(report.to_string()))
            }
            Err(err) => {
                tracing::warn!(url = %request.url, kind = ?err.kind(), error = %err, "get_metadata failed");
                Err(err.into_mcp(CONTEXT))
            }
        }
    }
}
