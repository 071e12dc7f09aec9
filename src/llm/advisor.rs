//! Agricultural advisor backed by an OpenAI-compatible completions API

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::offline;
use super::prompt::{SYSTEM_PROMPT, WeatherContext, user_content};
use super::stream::SseStream;
use crate::config::LlmSettings;
use crate::transport::{HttpTransport, TransportError};

pub const EMPTY_COMPLETION_REPLY: &str =
    "I'm sorry, I couldn't generate a response. Please try again.";

pub const FAILURE_REPLY: &str = "I'm experiencing some technical difficulties at the moment. However, I can still help with basic agricultural advice. Could you please rephrase your question? Common topics I can assist with include:

- Pest and disease management
- Irrigation and water management
- Fertilization and soil health
- Crop planning based on weather
- Harvest timing and storage";

pub const STREAM_FAILURE_REPLY: &str =
    "I'm experiencing some technical difficulties. Please try again later.";

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    messages: [Message<'a>; 2],
    model: &'a str,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    stream: bool,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<Content>,
    #[serde(default)]
    delta: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

impl CompletionResponse {
    fn message(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|text| !text.is_empty())
    }

    fn delta(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.delta)
            .and_then(|d| d.content)
            .filter(|text| !text.is_empty())
    }
}

/// Answers farmer questions. Never fails: transport or API errors turn into
/// a canned apology, and without an API key replies come from the offline
/// keyword table.
pub struct AgriAdvisor {
    settings: LlmSettings,
    api_key: Option<String>,
    transport: Arc<dyn HttpTransport>,
}

impl AgriAdvisor {
    pub fn new(settings: LlmSettings, transport: Arc<dyn HttpTransport>) -> Self {
        let api_key = settings.api_key();
        Self {
            settings,
            api_key,
            transport,
        }
    }

    /// Override the resolved key (tests, `--offline`)
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn is_online(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn request_body(&self, user: &str, stream: bool) -> Result<Value, TransportError> {
        let request = CompletionRequest {
            messages: [
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            model: &self.settings.model,
            temperature: self.settings.temperature,
            max_completion_tokens: self.settings.max_tokens,
            top_p: self.settings.top_p,
            stream,
        };
        Ok(serde_json::to_value(&request)?)
    }

    /// Single-shot answer
    pub fn generate_response(&self, query: &str, weather: Option<&WeatherContext>) -> String {
        if !self.is_online() {
            debug!("No API key configured, answering offline");
            return offline::reply(query).to_string();
        }

        match self.complete(&user_content(query, weather)) {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_COMPLETION_REPLY.to_string(),
            Err(e) => {
                warn!("Completion request failed: {}", e);
                FAILURE_REPLY.to_string()
            }
        }
    }

    fn complete(&self, user: &str) -> Result<Option<String>, TransportError> {
        let body = self.request_body(user, false)?;
        let raw = self.transport.post_json(
            &self.settings.completions_url(),
            self.api_key.as_deref(),
            &body,
        )?;
        let response: CompletionResponse = serde_json::from_str(&raw)?;
        Ok(response.message())
    }

    /// Streamed answer, delivered to `on_chunk` piece by piece.
    ///
    /// On failure the apology arrives as a final chunk after whatever was
    /// already delivered.
    pub fn generate_streaming_response<F>(
        &self,
        query: &str,
        weather: Option<&WeatherContext>,
        mut on_chunk: F,
    ) where
        F: FnMut(&str),
    {
        if !self.is_online() {
            on_chunk(offline::reply(query));
            return;
        }

        if let Err(e) = self.stream(&user_content(query, weather), &mut on_chunk) {
            warn!("Streaming completion failed: {}", e);
            on_chunk(STREAM_FAILURE_REPLY);
        }
    }

    fn stream<F>(&self, user: &str, on_chunk: &mut F) -> Result<(), TransportError>
    where
        F: FnMut(&str),
    {
        let body = self.request_body(user, true)?;
        let reader = self.transport.post_json_stream(
            &self.settings.completions_url(),
            self.api_key.as_deref(),
            &body,
        )?;

        let mut chunks = 0usize;
        for payload in SseStream::new(reader) {
            let chunk: CompletionResponse = serde_json::from_str(&payload?)?;
            if let Some(text) = chunk.delta() {
                chunks += 1;
                on_chunk(&text);
            }
        }
        debug!("Stream finished after {} chunks", chunks);
        Ok(())
    }
}
