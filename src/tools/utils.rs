use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use futures_util::StreamExt;
use mcp_protocol_sdk::prelude::*;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use url::Url;

use super::error::{ToolError, ToolOutcome};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024;

/// Deserialize the raw `arguments` map of a `tools/call` into a typed request.
pub fn parse_arguments<T: DeserializeOwned>(arguments: HashMap<String, Value>) -> ToolOutcome<T> {
    let object: serde_json::Map<String, Value> = arguments.into_iter().collect();
    serde_json::from_value(Value::Object(object))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

pub fn parse_http_url(raw: &str) -> ToolOutcome<Url> {
    let parsed = Url::parse(raw).map_err(|source| ToolError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ToolError::UnsupportedScheme(parsed.scheme().to_string()));
    }
    Ok(parsed)
}

/// Resolve a possibly relative reference against the page URL.
pub fn resolve_url(base: &Url, reference: &str) -> ToolOutcome<String> {
    base.join(reference)
        .map(|u| u.to_string())
        .map_err(|e| ToolError::parse("url", format!("cannot resolve '{reference}': {e}")))
}

#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub body: String,
}

/// Issues the single outbound GET each tool performs.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    user_agent: String,
    max_response_size: usize,
}

impl Fetcher {
    pub fn new(client: Client, user_agent: impl Into<String>, max_response_size: usize) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
            max_response_size,
        }
    }

    pub fn with_defaults(client: Client) -> Self {
        Self::new(client, DEFAULT_USER_AGENT, DEFAULT_MAX_RESPONSE_SIZE)
    }

    pub async fn get(&self, url: &Url) -> ToolOutcome<FetchedResponse> {
        tracing::debug!(url = %url, "fetching");
        let network = |source: reqwest::Error| ToolError::Network {
            url: url.to_string(),
            source,
        };

        let resp = self
            .client
            .get(url.clone())
            .header(USER_AGENT, self.user_agent.as_str())
            .send()
            .await
            .map_err(network)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "non-success status");
            return Err(ToolError::Status {
                url: url.to_string(),
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        if let Some(len) = resp.content_length()
            && len as usize > self.max_response_size
        {
            return Err(ToolError::ResponseTooLarge {
                url: url.to_string(),
                limit: self.max_response_size,
            });
        }

        let ct = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut total: usize = 0;
        let mut out = Vec::with_capacity(64 * 1024);
        let mut stream = resp.bytes_stream();
        while let Some(chunk_res) = stream.next().await {
            let chunk = chunk_res.map_err(network)?;
            total = total.saturating_add(chunk.len());
            if total > self.max_response_size {
                return Err(ToolError::ResponseTooLarge {
                    url: url.to_string(),
                    limit: self.max_response_size,
                });
            }
            out.extend_from_slice(&chunk);
        }

        let body = decode_body(&out, ct.as_deref());
        tracing::debug!(url = %url, bytes = total, "fetched");
        Ok(FetchedResponse { body })
    }
}

pub fn text_tool_result<T: Into<String>>(text: T) -> ToolResult {
    ToolResult {
        content: vec![Content::Text {
            text: text.into(),
            annotations: None,
            meta: None,
        }],
        is_error: Some(false),
        structured_content: None,
        meta: None,
    }
}

/// Decode HTTP response body using charset from Content-Type if available;
/// otherwise use chardetng to guess.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Some(ct) = content_type
        && let Some(cs) = parse_charset(ct)
        && let Some(enc) = Encoding::for_label(cs.as_bytes())
    {
        let (cow, _, _) = enc.decode(bytes);
        return cow.into_owned();
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    let (cow, _, _) = enc.decode(bytes);
    cow.into_owned()
}

fn parse_charset(content_type: &str) -> Option<String> {
    let lower = content_type.to_ascii_lowercase();
    let pos = lower.find("charset=")?;
    let after = &content_type[pos + 8..];
    let end = after.find(';').unwrap_or(after.len());
    let val = after[..end].trim().trim_matches('"').trim().to_string();
    (!val.is_empty()).then_some(val)
}
