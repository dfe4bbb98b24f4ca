use anyhow::Result;
use jsonrpc_v2::{Data, MapRouter, Server};
use reqwest::Client;
use std::io;
use std::sync::Arc;
use tokio::io::BufReader;

use crate::config::Config;

use super::rpc;
use super::setup::{build_client, build_state};

pub fn build_server(client: &Client, config: &Config) -> Result<Arc<Server<MapRouter>>> {
    let state = build_state(client, config)?;

    Ok(Server::new()
        .with_data(Data::new(state))
        .with_method("initialize", rpc::initialize)
        .with_method("notifications/initialized", rpc::initialized)
        .with_method("ping", rpc::ping)
        .with_method("tools/list", rpc::tools_list)
        .with_method("tools/call", rpc::tools_call)
        .finish())
}

/// Serve MCP over stdin/stdout until stdin closes.
pub async fn run(config: &Config) -> Result<()> {
    let client = build_client(config)?;
    let server = build_server(&client, config)?;
    run_with_server(server).await
}

pub async fn run_with_server(server: Arc<Server<MapRouter>>) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = io::stdout();
    super::io::run_with_io(server, stdin, stdout).await
}
