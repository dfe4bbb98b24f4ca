use super::super::error::ToolOutcome;
use super::super::utils::{Fetcher, parse_arguments, text_tool_result};
use super::content::{FetchRequest, PageSummary, summarize};
use async_trait::async_trait;
use mcp_protocol_sdk::prelude::*;
use serde_json::Value;
use std::collections::HashMap;

pub struct FetchWebpageHandler {
    pub fetcher: Fetcher,
}

impl FetchWebpageHandler {
    pub async fn fetch(&self, request: &FetchRequest) -> ToolOutcome<PageSummary> {
        let page_url = request.validate()?;
        let response = self.fetcher.get(&page_url).await?;
        summarize(&response.body, &page_url, request)
    }
}

#[async_trait]
impl ToolHandler for FetchWebpageHandler {
    async fn call(&self, arguments: HashMap<String, Value>) -> McpResult<ToolResult> {
        const CONTEXT: &str = "Failed to fetch webpage";
        let request: FetchRequest =
            parse_arguments(arguments).map_err(|e| e.into_mcp(CONTEXT))?;

        match self.fetch(&request).await {
            Ok(summary) => {
                tracing::info!(
                    url = %request.url,
                    words = summary.word_count,
                    images = summary.images.as_ref().map_or(0, Vec::len),
                    "fetch_webpage completed"
                );
                Ok(text_tool_result(summary.to_string()))
            }
            Err(err) => {
                tracing::warn!(url = %request.url, kind = ?err.kind(), error = %err, "fetch_webpage failed");
                Err(err.into_mcp(CONTEXT))
            }
        }
    }
}
