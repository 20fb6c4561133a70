//! Error types for wayfarer.

use thiserror::Error;

/// Primary error type for all wayfarer operations.
#[derive(Error, Debug)]
pub enum WayfarerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Model requested unknown tool '{0}'")]
    UnknownTool(String),

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Turn canceled")]
    Canceled,

    #[error("Limit exceeded: {0}")]
    Limit(String),
}

/// Coarse classification used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    Configuration,
    Transport,
    Tool,
    Registration,
    Timeout,
    Canceled,
    Other,
}

impl WayfarerError {
    /// Create an API error from a non-success status.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Api { .. } | Self::Transport(_) | Self::Stream(_) => ErrorCategory::Transport,
            Self::UnknownTool(_) | Self::ToolExecution { .. } | Self::InvalidArgument(_) => {
                ErrorCategory::Tool
            }
            Self::DuplicateTool(_) => ErrorCategory::Registration,
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Canceled => ErrorCategory::Canceled,
            _ => ErrorCategory::Other,
        }
    }

    /// Whether the failure came from talking to the remote endpoint.
    pub fn is_transport(&self) -> bool {
        self.category() == ErrorCategory::Transport
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, WayfarerError>;
