use anyhow::Result;
use bytes::Bytes;
use jsonrpc_v2::{MapRouter, ResponseObjects, Server};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Line-delimited JSON-RPC loop: one request per line, one response per line.
pub async fn run_with_io<R, W>(
    server: Arc<Server<MapRouter>>,
    reader: R,
    mut writer: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let response = server.handle(Bytes::from(trimmed.to_owned())).await;
        match response {
            ResponseObjects::Empty => {}
            other => match serde_json::to_string(&other) {
                Ok(s) => {
                    writeln!(writer, "{s}")?;
                    writer.flush()?;
                }
                Err(e) => tracing::error!(error = %e, "failed to serialize response"),
            },
        }
    }

    tracing::info!("input closed; shutting down");
    Ok(())
}
