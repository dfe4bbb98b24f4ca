use anyhow::{Context, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::tools::{
    ExtractElementsHandler, Fetcher, FetchWebpageHandler, GetMetadataHandler, ToolMeta, ToolsMeta,
    WeatherHandler, extract_elements_meta, fetch_webpage_meta, get_metadata_meta, weather_meta,
};

use super::state::{AppState, SharedHandler};

pub fn build_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder();
    if let Some(secs) = config.http.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build().context("failed to build HTTP client")
}

pub fn build_state(client: &Client, config: &Config) -> Result<AppState> {
    let fetcher = Fetcher::new(
        client.clone(),
        config.http.user_agent.clone(),
        config.http.max_response_size,
    );

    let mut metas = Vec::new();
    let mut handlers: HashMap<String, SharedHandler> = HashMap::new();
    let mut register = |meta: ToolMeta, handler: SharedHandler| {
        if config.is_enabled(&meta.name) {
            tracing::debug!(tool = %meta.name, "tool enabled");
            handlers.insert(meta.name.clone(), handler);
            metas.push(meta);
        } else {
            tracing::debug!(tool = %meta.name, "tool disabled by config");
        }
    };

    register(
        fetch_webpage_meta(),
        Arc::new(FetchWebpageHandler { fetcher: fetcher.clone() }),
    );
    register(
        extract_elements_meta(),
        Arc::new(ExtractElementsHandler { fetcher: fetcher.clone() }),
    );
    register(
        get_metadata_meta(),
        Arc::new(GetMetadataHandler { fetcher: fetcher.clone() }),
    );
    if config.is_enabled(crate::tools::weather::NAME) {
        let weather = WeatherHandler::new(fetcher, &config.weather.base_url)
            .with_context(|| format!("invalid weather base url '{}'", config.weather.base_url))?;
        register(weather_meta(), Arc::new(weather));
    }

    let tools_meta = ToolsMeta(metas);
    tracing::info!(tools = ?tools_meta.names().collect::<Vec<_>>(), "tools registered");

    Ok(AppState {
        tools_meta,
        handlers,
    })
}
