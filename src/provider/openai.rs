//! OpenAI-compatible Chat Completions provider (GitHub Models, Azure, OpenAI).

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Deserialize;
use tracing::debug;

use crate::error::WayfarerError;
use crate::types::*;

use super::http::{bearer_headers, is_sse_done, parse_sse_data, shared_client, status_to_error};
use super::{ModelProvider, ProviderRequest};

pub struct OpenAiProvider {
    model_id: String,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(model_id: String, api_key: String, base_url: String) -> Self {
        Self {
            model_id,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request_body(&self, request: &ProviderRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(message_to_openai)
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": self.model_id,
            "messages": messages,
            "stream": true,
        });

        if !request.tools.is_empty() {
            let tool_defs: Vec<serde_json::Value> = request
                .tools
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "type": "function",
                        "function": {
                            "name": t.name,
                            "description": t.description,
                            "parameters": t.parameters,
                        }
                    })
                })
                .collect();
            body["tools"] = tool_defs.into();
        }

        body
    }
}

#[async_trait]
impl ModelProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai-compatible"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn stream_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<BoxStream<'static, Result<TextStreamDelta, WayfarerError>>, WayfarerError> {
        let body = self.build_request_body(request);
        let url = self.completions_url();

        debug!(
            model = %self.model_id,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "chat completions stream"
        );

        let mut builder = shared_client()
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let resp = builder.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status.as_u16(), &body_text));
        }

        let byte_stream = resp.bytes_stream();

        let stream = async_stream::stream! {
            let mut decoder = StreamDecoder::default();
            let mut failed = false;
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(WayfarerError::Transport(e));
                        failed = true;
                        break;
                    }
                };

                match decoder.feed(&chunk) {
                    Ok(deltas) => {
                        for delta in deltas {
                            yield Ok(delta);
                        }
                    }
                    Err(e) => {
                        yield Err(e);
                        failed = true;
                        break;
                    }
                }

                if decoder.is_finished() {
                    break;
                }
            }

            if !failed {
                match decoder.finish() {
                    Ok(deltas) => {
                        for delta in deltas {
                            yield Ok(delta);
                        }
                    }
                    Err(e) => yield Err(e),
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

/// Incremental decoder for a chat-completions SSE body.
///
/// Bytes are buffered until a full line is available. Tool call fragments
/// are accumulated per `index` and released, in index order, once the
/// choice reports a finish reason or the stream ends.
#[derive(Debug, Default)]
pub(crate) struct StreamDecoder {
    buffer: Vec<u8>,
    pending: BTreeMap<u32, PendingToolCall>,
    finished: bool,
}

#[derive(Debug, Default)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

impl StreamDecoder {
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn feed(&mut self, bytes: &[u8]) -> Result<Vec<TextStreamDelta>, WayfarerError> {
        self.buffer.extend_from_slice(bytes);
        let mut out = Vec::new();

        while let Some(line_end) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=line_end).collect();
            self.decode_line(&raw, &mut out)?;
        }

        Ok(out)
    }

    /// Decode an unterminated trailing line, then flush whatever is pending
    /// and mark the stream as done.
    pub(crate) fn finish(&mut self) -> Result<Vec<TextStreamDelta>, WayfarerError> {
        let mut out = Vec::new();
        let rest = std::mem::take(&mut self.buffer);
        if !rest.is_empty() {
            self.decode_line(&rest, &mut out)?;
        }
        out.extend(self.finish_with(None));
        Ok(out)
    }

    fn decode_line(&mut self, raw: &[u8], out: &mut Vec<TextStreamDelta>) -> Result<(), WayfarerError> {
        if self.finished {
            return Ok(());
        }
        let line = String::from_utf8_lossy(raw);
        let line = line.trim();

        if line.is_empty() || line.starts_with(':') {
            return Ok(());
        }
        if is_sse_done(line) {
            out.extend(self.finish_with(None));
            return Ok(());
        }
        let Some(data) = parse_sse_data(line) else {
            return Ok(());
        };

        let chunk: OpenAiStreamChunk = serde_json::from_str(data)?;
        if let Some(error) = chunk.error {
            return Err(WayfarerError::Stream(error.message));
        }
        self.push_chunk(chunk, out);
        Ok(())
    }

    fn finish_with(&mut self, reason: Option<FinishReason>) -> Vec<TextStreamDelta> {
        if self.finished {
            return Vec::new();
        }
        self.finished = true;
        let mut out: Vec<TextStreamDelta> = std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(index, pending)| TextStreamDelta::tool_call(pending.into_call(index)))
            .collect();
        let reason = reason.or_else(|| (!out.is_empty()).then_some(FinishReason::ToolCalls));
        out.push(TextStreamDelta::done(reason));
        out
    }

    fn push_chunk(&mut self, chunk: OpenAiStreamChunk, out: &mut Vec<TextStreamDelta>) {
        for choice in chunk.choices {
            if let Some(content) = choice.delta.content {
                if !content.is_empty() {
                    out.push(TextStreamDelta::text(content));
                }
            }
            for tc in choice.delta.tool_calls.unwrap_or_default() {
                let entry = self.pending.entry(tc.index).or_default();
                if let Some(id) = tc.id.filter(|id| !id.is_empty()) {
                    entry.id = id;
                }
                if let Some(function) = tc.function {
                    if let Some(name) = function.name {
                        entry.name.push_str(&name);
                    }
                    if let Some(arguments) = function.arguments {
                        entry.arguments.push_str(&arguments);
                    }
                }
            }
            if let Some(reason) = choice.finish_reason.as_deref() {
                let reason = reason.parse::<FinishReason>().ok();
                out.extend(self.finish_with(reason));
                return;
            }
        }
    }
}

impl PendingToolCall {
    fn into_call(self, index: u32) -> AgentToolCall {
        let arguments = if self.arguments.trim().is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&self.arguments)
                .unwrap_or(serde_json::Value::String(self.arguments))
        };
        AgentToolCall {
            id: if self.id.is_empty() {
                format!("call_{index}")
            } else {
                self.id
            },
            name: self.name,
            arguments,
        }
    }
}

fn message_to_openai(msg: &ModelMessage) -> serde_json::Value {
    let role = msg.role.as_ref();

    if let [ContentPart::ToolResult(tr)] = msg.content.as_slice() {
        return serde_json::json!({
            "role": "tool",
            "tool_call_id": tr.tool_call_id,
            "content": tr.content,
        });
    }

    let tool_calls = msg.tool_calls();
    if !tool_calls.is_empty() {
        let tc_json: Vec<serde_json::Value> = tool_calls
            .iter()
            .map(|tc| {
                serde_json::json!({
                    "id": tc.id,
                    "type": "function",
                    "function": {
                        "name": tc.name,
                        "arguments": tc.arguments.to_string(),
                    }
                })
            })
            .collect();
        let text = msg.text();
        return serde_json::json!({
            "role": role,
            "content": if text.is_empty() { serde_json::Value::Null } else { serde_json::Value::String(text) },
            "tool_calls": tc_json,
        });
    }

    serde_json::json!({ "role": role, "content": msg.text() })
}

// Chat completions wire types (internal)

#[derive(Deserialize)]
struct OpenAiStreamChunk {
    #[serde(default)]
    choices: Vec<OpenAiStreamChoice>,
    #[serde(default)]
    error: Option<OpenAiErrorBody>,
}

#[derive(Deserialize)]
struct OpenAiErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct OpenAiStreamChoice {
    #[serde(default)]
    delta: OpenAiStreamDelta,
    finish_reason: Option<String>,
}

#[derive(Deserialize, Default)]
struct OpenAiStreamDelta {
    content: Option<String>,
    tool_calls: Option<Vec<OpenAiToolCallDelta>>,
}

#[derive(Deserialize)]
struct OpenAiToolCallDelta {
    #[serde(default)]
    index: u32,
    id: Option<String>,
    function: Option<OpenAiFunctionDelta>,
}

#[derive(Deserialize)]
struct OpenAiFunctionDelta {
    name: Option<String>,
    arguments: Option<String>,
}
