use async_trait::async_trait;
use mcp_protocol_sdk::prelude::*;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use url::Url;

use super::error::{ToolError, ToolOutcome};
use super::meta::{ToolInputSchema, ToolMeta};
use super::utils::{Fetcher, parse_arguments, parse_http_url, text_tool_result};

pub const NAME: &str = "weather";

pub const DEFAULT_BASE_URL: &str = "https://goweather.xyz/weather";

static META: OnceLock<ToolMeta> = OnceLock::new();

pub fn meta() -> ToolMeta {
    META.get_or_init(|| {
        let properties = serde_json::json!({
            "city": { "type": "string", "description": "Name of the city to get the current weather for" }
        });
        let schema = ToolInputSchema::new("object", properties, vec!["city".to_string()]);
        ToolMeta::new(
            NAME,
            "Weather",
            "Get the current weather for a city",
            schema,
        )
    })
    .clone()
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherRequest {
    pub city: String,
}

pub struct WeatherHandler {
    pub fetcher: Fetcher,
    pub base_url: Url,
}

impl WeatherHandler {
    pub fn new(fetcher: Fetcher, base_url: &str) -> ToolOutcome<Self> {
        Ok(Self {
            fetcher,
            base_url: parse_http_url(base_url)?,
        })
    }

    /// `<base>/<city>` with the lowercased city as one encoded path segment.
    pub fn endpoint(&self, city: &str) -> ToolOutcome<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ToolError::invalid_arguments("weather base url cannot carry a path"))?
            .pop_if_empty()
            .push(&city.to_lowercase());
        Ok(url)
    }

    /// The upstream JSON, unvalidated, pretty-printed.
    pub async fn lookup(&self, request: &WeatherRequest) -> ToolOutcome<String> {
        let city = request.city.trim();
        if city.is_empty() {
            return Err(ToolError::invalid_arguments("'city' must not be empty"));
        }
        let url = self.endpoint(city)?;
        let upstream = |status: Option<u16>, message: String| ToolError::Upstream {
            city: city.to_string(),
            status,
            message,
        };

        let response = self.fetcher.get(&url).await.map_err(|err| match err {
            ToolError::Status { status, .. } => upstream(Some(status), err.to_string()),
            other => upstream(None, other.to_string()),
        })?;

        let value: Value = serde_json::from_str(&response.body)
            .map_err(|e| upstream(None, format!("response is not JSON: {e}")))?;
        serde_json::to_string_pretty(&value).map_err(|e| upstream(None, e.to_string()))
    }
}

#[async_trait]
impl ToolHandler for WeatherHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<ToolResult> {
        let request: WeatherRequest = parse_arguments(arguments).map_err(|e| e.into_mcp(""))?;

        match self.lookup(&request).await {
            Ok(text) => {
                tracing::info!(city = %request.city, "weather completed");
                Ok(text_tool_result(text))
            }
            Err(err) => {
                tracing::warn!(city = %request.city, kind = ?err.kind(), error = %err, "weather failed");
                Err(err.into_mcp(""))
            }
        }
    }
}
