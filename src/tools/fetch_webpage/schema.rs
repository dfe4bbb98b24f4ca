use std::sync::OnceLock;
use super::super::meta::{ToolInputSchema, ToolMeta};

pub const NAME: &str = "fetch_webpage";

static META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META
        .get_or_init(|| {
            let schema = ToolInputSchema::new(
                "object",
                serde_json::json!({
                    "url": { "type": "string", "format": "uri", "description": "The URL of the webpage to fetch" },
                    "includeImages": { "type": "boolean", "default": false, "description": "Whether to include image URLs in the response" },
                    "maxLength": { "type": "integer", "minimum": 1, "default": 5000, "description": "Maximum length of text content to return (default: 5000)" }
                }),
                vec!["url".to_string()],
            );
            ToolMeta::new(
                NAME,
                "Fetch Webpage Content",
                "Fetch and extract the main content from a webpage with optional image extraction",
                schema,
            )
        })
        .clone()
}
