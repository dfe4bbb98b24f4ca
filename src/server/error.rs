use jsonrpc_v2::Error as RpcError;
use mcp_protocol_sdk::McpError;

pub const INVALID_PARAMS: i64 = -32602;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INTERNAL_ERROR: i64 = -32603;

pub trait ToRpcError {
    fn to_rpc_error(self) -> RpcError;
}

fn full(code: i64, message: String, data: Option<String>) -> RpcError {
    match data {
        Some(data) => RpcError::Full {
            code,
            message,
            data: Some(Box::new(data)),
        },
        None => RpcError::Full {
            code,
            message,
            data: None,
        },
    }
}

impl ToRpcError for McpError {
    fn to_rpc_error(self) -> RpcError {
        match self {
            McpError::Validation(msg) => full(INVALID_PARAMS, msg, None),
            McpError::ToolNotFound(name) => full(METHOD_NOT_FOUND, "Tool not found".to_string(), Some(name)),
            McpError::Internal(msg) => full(INTERNAL_ERROR, msg, None),
            other => full(INTERNAL_ERROR, "Internal error".to_string(), Some(other.to_string())),
        }
    }
}

/// Error for a tool that is not registered (or disabled by configuration).
pub fn tool_not_found(name: &str) -> RpcError {
    McpError::ToolNotFound(name.to_string()).to_rpc_error()
}

pub fn invalid_params(message: impl Into<String>) -> RpcError {
    McpError::Validation(message.into()).to_rpc_error()
}
