//! Drives one turn: request assembly, tool dispatch, and text streaming.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::config::AgentConfiguration;
use super::prompt::Prompt;
use crate::error::WayfarerError;
use crate::provider::{self, ModelProvider, ProviderRequest};
use crate::tools::ToolArguments;
use crate::types::{AgentToolCall, ModelMessage, StreamEventType};
use crate::util::timeout::{guarded, Deadline};

/// Narrative text fragments of one turn, in arrival order.
pub type FragmentStream = BoxStream<'static, Result<String, WayfarerError>>;

/// Provider round-trips allowed within one turn.
pub const DEFAULT_MAX_ROUND_TRIPS: usize = 10;

/// Per-run bounds: overall timeout and external cancellation.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub timeout: Option<Duration>,
    pub cancel: CancellationToken,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Owns an [`AgentConfiguration`] and the provider it talks to.
pub struct AgentSession {
    config: Arc<AgentConfiguration>,
    provider: Arc<dyn ModelProvider>,
    max_round_trips: usize,
}

impl AgentSession {
    /// Validate `config` and connect to the endpoint it names.
    pub fn connect(config: AgentConfiguration) -> Result<Self, WayfarerError> {
        let provider = provider::create_provider(config.provider())?;
        Ok(Self::with_provider(config, provider))
    }

    /// Use an explicit provider. `config` is still validated by [`run`](Self::run).
    pub fn with_provider(config: AgentConfiguration, provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
            max_round_trips: DEFAULT_MAX_ROUND_TRIPS,
        }
    }

    pub fn with_max_round_trips(mut self, max_round_trips: usize) -> Self {
        self.max_round_trips = max_round_trips.max(1);
        self
    }

    pub fn config(&self) -> &AgentConfiguration {
        &self.config
    }

    /// Start one turn for `prompt`.
    ///
    /// Configuration problems are returned here, before anything touches the
    /// network. Everything else surfaces through the stream, which is lazy:
    /// nothing is sent until it is first polled. Tool calls made by the
    /// model are executed in between and never appear as fragments.
    pub fn run(&self, prompt: &Prompt, options: RunOptions) -> Result<FragmentStream, WayfarerError> {
        self.config.validate()?;

        Ok(Box::pin(turn_stream(
            Arc::clone(&self.config),
            Arc::clone(&self.provider),
            self.max_round_trips,
            prompt.as_str().to_string(),
            options,
        )))
    }
}

fn turn_stream(
    config: Arc<AgentConfiguration>,
    provider: Arc<dyn ModelProvider>,
    max_round_trips: usize,
    prompt: String,
    options: RunOptions,
) -> impl Stream<Item = Result<String, WayfarerError>> + Send + 'static {
    let RunOptions { timeout, cancel } = options;

    async_stream::try_stream! {
        let turn_id = Uuid::new_v4();
        let deadline = timeout.map(Deadline::after);
        let tools = config.tools();
        let tool_defs = tools.definitions();
        let mut messages = vec![
            ModelMessage::system(config.instructions()),
            ModelMessage::user(prompt),
        ];

        info!(
            %turn_id,
            provider = provider.provider_name(),
            model = provider.model_id(),
            tools = tool_defs.len(),
            timeout_ms = ?deadline.map(|d| d.budget().as_millis() as u64),
            "turn start"
        );

        let mut round_trip = 0usize;
        loop {
            round_trip += 1;
            if round_trip > max_round_trips {
                Err::<(), _>(WayfarerError::Limit(format!(
                    "model kept calling tools after {max_round_trips} round-trips"
                )))?;
            }

            let request = ProviderRequest {
                messages: messages.clone(),
                tools: tool_defs.clone(),
                timeout: deadline.map(|d| d.remaining()),
            };
            let mut deltas = guarded(provider.stream_text(&request), deadline, &cancel).await?;

            let mut text = String::new();
            let mut calls: Vec<AgentToolCall> = Vec::new();
            loop {
                let next = guarded(async { Ok(deltas.next().await) }, deadline, &cancel).await?;
                let Some(delta) = next else { break };
                let delta = delta?;
                match delta.event_type {
                    StreamEventType::TextDelta => {
                        if !delta.text.is_empty() {
                            text.push_str(&delta.text);
                            yield delta.text;
                        }
                    }
                    StreamEventType::ToolCallDelta => {
                        if let Some(call) = delta.tool_call {
                            calls.push(call);
                        }
                    }
                    StreamEventType::Done => break,
                }
            }

            debug!(
                %turn_id,
                round_trip,
                tool_calls = calls.len(),
                text_len = text.len(),
                "round-trip complete"
            );

            if calls.is_empty() {
                break;
            }

            // Reject the whole batch before running any of it.
            if let Some(unknown) = calls.iter().find(|c| tools.get(&c.name).is_none()) {
                warn!(%turn_id, tool = %unknown.name, "model requested unknown tool");
                Err::<(), _>(WayfarerError::UnknownTool(unknown.name.clone()))?;
            }

            messages.push(ModelMessage::assistant_tool_calls(text, &calls));
            for call in &calls {
                let Some(tool) = tools.get(&call.name) else { continue };
                let args = ToolArguments::new(call.arguments.clone());
                debug!(%turn_id, tool = %call.name, arguments = %args.raw(), "tool call");
                let outcome = guarded(async { Ok(tool.execute(&args).await) }, deadline, &cancel).await?;
                let message = match outcome {
                    Ok(output) => {
                        debug!(%turn_id, tool = %call.name, output_len = output.len(), "tool result");
                        ModelMessage::tool_result(&call.id, output, false)
                    }
                    Err(err) => {
                        let err = tool_failure(&call.name, err);
                        warn!(%turn_id, error = %err, "tool call failed");
                        ModelMessage::tool_result(&call.id, format!("Error: {err}"), true)
                    }
                };
                messages.push(message);
            }
        }

        info!(%turn_id, round_trips = round_trip, "turn complete");
    }
}

/// Attribute a tool's own error to the tool that raised it.
fn tool_failure(tool_name: &str, err: WayfarerError) -> WayfarerError {
    match err {
        WayfarerError::ToolExecution { .. } => err,
        other => WayfarerError::ToolExecution {
            tool_name: tool_name.to_string(),
            message: other.to_string(),
        },
    }
}
