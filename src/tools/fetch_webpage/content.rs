use scraper::Html;
use serde::Deserialize;
use std::fmt;
use url::Url;

use super::super::document::{
    normalize_space, page_title, parse_document, select_text, selector, strip_noise,
    truncate_chars, word_count,
};
use super::super::error::{ToolError, ToolOutcome};
use super::super::utils::{parse_http_url, resolve_url};

pub const DEFAULT_MAX_LENGTH: usize = 5000;

/// Candidate containers for the main content, most specific first.
pub const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    ".content",
    ".post-content",
    ".entry-content",
    "body",
];

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    pub url: String,
    #[serde(default)]
    pub include_images: Option<bool>,
    #[serde(default)]
    pub max_length: Option<usize>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            include_images: None,
            max_length: None,
        }
    }

    pub fn include_images(&self) -> bool {
        self.include_images.unwrap_or(false)
    }

    pub fn max_length(&self) -> usize {
        self.max_length.unwrap_or(DEFAULT_MAX_LENGTH)
    }

    pub fn validate(&self) -> ToolOutcome<Url> {
        if self.max_length == Some(0) {
            return Err(ToolError::invalid_arguments("'maxLength' must be a positive integer"));
        }
        parse_http_url(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedImage {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone)]
pub struct PageSummary {
    pub title: String,
    pub url: String,
    pub content: String,
    pub word_count: usize,
    pub images: Option<Vec<ExtractedImage>>,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# {}\n\n**URL:** {}\n**Word Count:** {}\n\n## Content\n\n{}",
            self.title, self.url, self.word_count, self.content
        )?;
        if let Some(images) = self.images.as_ref().filter(|imgs| !imgs.is_empty()) {
            f.write_str("\n\n## Images Found")?;
            for img in images {
                write!(f, "\n- ![{}]({})", img.alt, img.src)?;
            }
        }
        Ok(())
    }
}

/// Whitespace-normalized text of the first candidate container with any text.
/// `body` is the last candidate, so an empty body yields an empty string.
///
/// Expects noise to have been stripped already.
pub fn extract_main_content(doc: &Html) -> ToolOutcome<String> {
    for css in CONTENT_SELECTORS {
        let sel = selector(css)?;
        if let Some(text) = select_text(doc, &sel) {
            let normalized = normalize_space(&text);
            if !normalized.is_empty() {
                tracing::trace!(selector = css, "main content selected");
                return Ok(normalized);
            }
        }
    }
    Ok(String::new())
}

pub fn extract_images(doc: &Html, base: &Url) -> ToolOutcome<Vec<ExtractedImage>> {
    let sel = selector("img")?;
    doc.select(&sel)
        .filter_map(|el| {
            let src = el.value().attr("src").filter(|s| !s.is_empty())?;
            let alt = el.value().attr("alt").unwrap_or_default().to_string();
            Some(resolve_url(base, src).map(|src| ExtractedImage { src, alt }))
        })
        .collect()
}

/// Build the summary of an already fetched page body.
pub fn summarize(html: &str, page_url: &Url, request: &FetchRequest) -> ToolOutcome<PageSummary> {
    let mut doc = parse_document(html);
    strip_noise(&mut doc)?;

    let content = truncate_chars(&extract_main_content(&doc)?, request.max_length());
    let images = if request.include_images() {
        Some(extract_images(&doc, page_url)?)
    } else {
        None
    };

    Ok(PageSummary {
        title: page_title(&doc)?,
        url: request.url.clone(),
        word_count: word_count(&content),
        content,
        images,
    })
}
