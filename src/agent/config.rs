//! Immutable configuration for one agent run.

use std::sync::Arc;

use reqwest::Url;

use crate::config::ProviderSettings;
use crate::error::WayfarerError;
use crate::tools::ToolRegistry;

/// Instructions, tools and provider settings for one run.
#[derive(Debug, Clone)]
pub struct AgentConfiguration {
    instructions: String,
    tools: Arc<ToolRegistry>,
    provider: ProviderSettings,
}

impl AgentConfiguration {
    pub fn new(
        instructions: impl Into<String>,
        tools: ToolRegistry,
        provider: ProviderSettings,
    ) -> Self {
        Self {
            instructions: instructions.into(),
            tools: Arc::new(tools),
            provider,
        }
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    pub fn provider(&self) -> &ProviderSettings {
        &self.provider
    }

    /// Fails with a configuration error on an empty credential or malformed endpoint.
    pub fn validate(&self) -> Result<Url, WayfarerError> {
        self.provider.validate()
    }
}
