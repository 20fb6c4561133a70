//! Shared test helpers and scripted providers.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;

use wayfarer::agent::{AgentConfiguration, DEFAULT_INSTRUCTIONS};
use wayfarer::config::{Credential, ProviderSettings};
use wayfarer::error::WayfarerError;
use wayfarer::provider::{ModelProvider, ProviderRequest};
use wayfarer::tools::ToolRegistry;
use wayfarer::types::*;

type Step = Box<dyn Fn(&ProviderRequest) -> Result<Vec<TextStreamDelta>, WayfarerError> + Send + Sync>;

/// A provider that plays back one scripted response per request.
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            steps: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response computed from the request it answers.
    pub fn then<F>(self, step: F) -> Self
    where
        F: Fn(&ProviderRequest) -> Result<Vec<TextStreamDelta>, WayfarerError> + Send + Sync + 'static,
    {
        self.steps.lock().unwrap().push_back(Box::new(step));
        self
    }

    /// Queue a plain text answer split into the given fragments.
    pub fn then_text(self, fragments: &[&str]) -> Self {
        let fragments: Vec<String> = fragments.iter().map(|f| f.to_string()).collect();
        self.then(move |_| {
            let mut deltas: Vec<TextStreamDelta> =
                fragments.iter().map(TextStreamDelta::text).collect();
            deltas.push(TextStreamDelta::done(Some(FinishReason::Stop)));
            Ok(deltas)
        })
    }

    /// Queue a response that only calls tools.
    pub fn then_tool_calls(self, calls: &[(&str, &str, serde_json::Value)]) -> Self {
        let calls: Vec<AgentToolCall> = calls
            .iter()
            .map(|(id, name, args)| tool_call(id, name, args.clone()))
            .collect();
        self.then(move |_| {
            let mut deltas: Vec<TextStreamDelta> =
                calls.iter().cloned().map(TextStreamDelta::tool_call).collect();
            deltas.push(TextStreamDelta::done(Some(FinishReason::ToolCalls)));
            Ok(deltas)
        })
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted-model"
    }

    async fn stream_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, WayfarerError>>, WayfarerError> {
        self.requests.lock().unwrap().push(request.clone());
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .expect("provider called more often than scripted");
        let deltas = step(request)?;
        Ok(stream::iter(deltas.into_iter().map(Ok)).boxed())
    }
}

/// A provider whose stream never produces anything.
pub struct StalledProvider;

#[async_trait]
impl ModelProvider for StalledProvider {
    fn provider_name(&self) -> &str {
        "stalled"
    }

    fn model_id(&self) -> &str {
        "stalled-model"
    }

    async fn stream_text(
        &self,
        _request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, WayfarerError>>, WayfarerError> {
        Ok(stream::pending::<Result<TextStreamDelta, WayfarerError>>().boxed())
    }
}

/// A provider that fails the test if it is ever contacted.
pub struct UnreachableProvider;

#[async_trait]
impl ModelProvider for UnreachableProvider {
    fn provider_name(&self) -> &str {
        "unreachable"
    }

    fn model_id(&self) -> &str {
        "unreachable-model"
    }

    async fn stream_text(
        &self,
        _request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, WayfarerError>>, WayfarerError> {
        panic!("provider must not be contacted");
    }
}

pub fn tool_call(id: &str, name: &str, arguments: serde_json::Value) -> AgentToolCall {
    AgentToolCall {
        id: id.to_string(),
        name: name.to_string(),
        arguments,
    }
}

pub fn settings(token: &str) -> ProviderSettings {
    ProviderSettings::new("https://example.test/inference", "test-model", Credential::new(token))
}

pub fn config_with(tools: ToolRegistry, token: &str) -> AgentConfiguration {
    AgentConfiguration::new(DEFAULT_INSTRUCTIONS, tools, settings(token))
}

/// Content of the most recent tool message in `request`.
pub fn last_tool_output(request: &ProviderRequest) -> Option<String> {
    request.messages.iter().rev().find_map(|m| match m.content.as_slice() {
        [ContentPart::ToolResult(result)] => Some(result.content.clone()),
        _ => None,
    })
}

pub fn shared<P: ModelProvider + 'static>(provider: P) -> (Arc<P>, Arc<dyn ModelProvider>) {
    let provider = Arc::new(provider);
    let dyn_provider: Arc<dyn ModelProvider> = provider.clone();
    (provider, dyn_provider)
}
