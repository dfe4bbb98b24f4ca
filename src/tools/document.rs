//! HTML parsing and text helpers shared by the page tools.
//!
//! A parsed [`Html`] belongs to the call that built it and is dropped when the
//! call returns.

use scraper::{ElementRef, Html, Selector};

use super::error::{ToolError, ToolOutcome};

/// Elements that never count as page content.
pub const NOISE_SELECTOR: &str = "script, style, nav, footer, aside";

pub const TRUNCATION_MARKER: &str = "...";

pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

pub fn selector(css: &str) -> ToolOutcome<Selector> {
    Selector::parse(css).map_err(|e| ToolError::parse("selector", format!("'{css}': {e}")))
}

/// Remove every noise subtree so later selects and text walks never see it.
///
/// `Html::select` walks the whole node arena, detached nodes included, so the
/// pruned tree is serialized and parsed again.
pub fn strip_noise(doc: &mut Html) -> ToolOutcome<()> {
    let sel = selector(NOISE_SELECTOR)?;
    let ids: Vec<_> = doc.select(&sel).map(|el| el.id()).collect();
    if ids.is_empty() {
        return Ok(());
    }
    let removed = ids.len();
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
    *doc = Html::parse_document(&doc.root_element().html());
    tracing::trace!(removed, "stripped noise elements");
    Ok(())
}

pub fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

/// Concatenated text of every element matching `sel`.
pub fn select_text(doc: &Html, sel: &Selector) -> Option<String> {
    let mut matched = false;
    let mut out = String::new();
    for el in doc.select(sel) {
        matched = true;
        out.extend(el.text());
    }
    matched.then_some(out)
}

pub fn first_attr(doc: &Html, sel: &Selector, attr: &str) -> Option<String> {
    doc.select(sel)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

pub fn page_title(doc: &Html) -> ToolOutcome<String> {
    let sel = selector("title")?;
    Ok(doc
        .select(&sel)
        .next()
        .map(|el| normalize_space(&element_text(&el)))
        .unwrap_or_default())
}

pub fn normalize_space(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max_chars` characters, marking the cut with [`TRUNCATION_MARKER`].
pub fn truncate_chars(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + TRUNCATION_MARKER.len());
            out.push_str(&content[..cut]);
            out.push_str(TRUNCATION_MARKER);
            out
        }
        None => content.to_string(),
    }
}

pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
