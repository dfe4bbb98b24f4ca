use jsonrpc_v2::{Data, Error as RpcError, Params};
use serde_json::json;
use std::collections::HashMap;

use super::error::{ToRpcError, invalid_params, tool_not_found};
use super::initialize::InitializeResult;
use super::state::{AppState, CallParams};

pub async fn initialize(
    _: Params<serde_json::Value>,
    _data: Data<AppState>,
) -> Result<InitializeResult, RpcError> {
    tracing::info!("client initialized");
    Ok(InitializeResult::default())
}

pub async fn initialized(
    _: Params<serde_json::Value>,
    _data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    Ok(serde_json::Value::Null)
}

pub async fn ping(
    _: Params<serde_json::Value>,
    _data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    Ok(json!({}))
}

pub async fn tools_list(
    _: Params<serde_json::Value>,
    data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    Ok(json!({ "tools": &data.tools_meta }))
}

pub async fn tools_call(
    params: Params<CallParams>,
    data: Data<AppState>,
) -> Result<serde_json::Value, RpcError> {
    let CallParams { name, arguments } = params.0;
    if name.is_empty() {
        return Err(invalid_params("Missing 'name' in params"));
    }

    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments
    };
    let arg_map: HashMap<String, serde_json::Value> = serde_json::from_value(arguments)
        .map_err(|e| invalid_params(format!("Invalid 'arguments': {e}")))?;

    let Some(handler) = data.handlers.get(&name) else {
        tracing::warn!(tool = %name, "call to unknown tool");
        return Err(tool_not_found(&name));
    };

    tracing::debug!(tool = %name, "tools/call");
    match handler.call(arg_map).await {
        Ok(tr) => serde_json::to_value(tr)
            .map_err(|e| RpcError::internal(format!("Failed to serialize tool result: {e}"))),
        Err(e) => Err(e.to_rpc_error()),
    }
}
