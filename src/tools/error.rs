use mcp_protocol_sdk::prelude::*;
use thiserror::Error;

pub type ToolOutcome<T> = Result<T, ToolError>;

/// Failure of a single tool invocation.
///
/// Variants carry structured fields; the caller-facing message is built at the
/// handler boundary by [`ToolError::into_mcp`].
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported URL scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),

    #[error("{source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status}: {reason}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Response exceeded limit ({limit} bytes)")]
    ResponseTooLarge { url: String, limit: usize },

    #[error("Failed to parse {what}: {message}")]
    Parse { what: &'static str, message: String },

    #[error("Failed to fetch weather for {city}: {message}")]
    Upstream {
        city: String,
        status: Option<u16>,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    Status,
    Parse,
    Upstream,
}

impl ToolError {
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    pub fn parse(what: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            what,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArguments(_) | Self::InvalidUrl { .. } | Self::UnsupportedScheme(_) => {
                ErrorKind::Validation
            }
            Self::Network { .. } | Self::ResponseTooLarge { .. } => ErrorKind::Network,
            Self::Status { .. } => ErrorKind::Status,
            Self::Parse { .. } => ErrorKind::Parse,
            Self::Upstream { .. } => ErrorKind::Upstream,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Network { url, .. }
            | Self::Status { url, .. }
            | Self::ResponseTooLarge { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Render for the caller, prefixed with the failing operation.
    pub fn into_mcp(self, context: &str) -> McpError {
        let message = if context.is_empty() {
            self.to_string()
        } else {
            format!("{context}: {self}")
        };
        match self.kind() {
            ErrorKind::Validation => McpError::validation(message),
            _ => McpError::internal(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_carries_code_and_reason() {
        let err = ToolError::Status {
            url: "https://example.com/missing".into(),
            status: 404,
            reason: "Not Found".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Status);
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.url(), Some("https://example.com/missing"));
        let msg = err.into_mcp("Failed to fetch webpage").to_string();
        assert!(msg.contains("Failed to fetch webpage: HTTP 404: Not Found"), "{msg}");
    }

    #[test]
    fn validation_errors_map_to_validation_kind() {
        let err = ToolError::UnsupportedScheme("ftp".into());
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err.into_mcp(""), McpError::Validation(_)));
    }

    #[test]
    fn upstream_error_names_the_city() {
        let err = ToolError::Upstream {
            city: "paris".into(),
            status: Some(503),
            message: "HTTP 503: Service Unavailable".into(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "Failed to fetch weather for paris: HTTP 503: Service Unavailable"
        );
    }
}
