//! Model provider trait and the OpenAI-compatible transport.

pub mod http;
pub mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::config::ProviderSettings;
use crate::error::WayfarerError;
use crate::types::{ModelMessage, TextStreamDelta};

/// A request sent to a model provider.
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub messages: Vec<ModelMessage>,
    pub tools: Vec<ToolDefinition>,
    /// Upper bound for the whole HTTP exchange, body included.
    pub timeout: Option<Duration>,
}

/// Tool definition sent to the provider API.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Transport toward a remote inference service.
///
/// Implementations stream text deltas and fully assembled tool calls; they
/// never execute tools themselves.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Provider name (e.g., "openai-compatible").
    fn provider_name(&self) -> &str;

    /// The model ID this provider instance serves.
    fn model_id(&self) -> &str;

    /// Issue one streaming request.
    async fn stream_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, WayfarerError>>, WayfarerError>;
}

/// Create the provider described by `settings`.
///
/// Settings are validated first, so a missing credential or malformed
/// endpoint fails here without any network activity.
pub fn create_provider(settings: &ProviderSettings) -> Result<Arc<dyn ModelProvider>, WayfarerError> {
    let endpoint = settings.validate()?;
    Ok(Arc::new(openai::OpenAiProvider::new(
        settings.model_id.clone(),
        settings.credential.expose().to_string(),
        endpoint.as_str().to_string(),
    )))
}
