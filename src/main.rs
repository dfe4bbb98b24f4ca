use anyhow::Result;

use mcp_web_browsing::{Config, environment, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    environment::load_env();
    logging::init();

    let config = Config::load_default().with_env_overrides();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting {}", server::SERVER_NAME);

    server::run(&config).await
}
