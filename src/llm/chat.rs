//! Conversation log for the chat screen

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::advisor::AgriAdvisor;
use super::prompt::WeatherContext;

pub const GREETING: &str = "Hello! I'm your AI agricultural assistant. I can help you with farming questions, pest management, fertilization, irrigation, and more. What would you like to know?";

pub const CLEARED_GREETING: &str =
    "Hello! I'm your AI agricultural assistant. How can I help you today?";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            is_user,
            timestamp: Local::now(),
        }
    }
}

/// Ordered chat history, always opening with the assistant greeting
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(GREETING, false)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Record the question, ask the advisor, record and return the answer.
    /// Blank input is ignored.
    pub fn send(
        &mut self,
        text: &str,
        advisor: &AgriAdvisor,
        weather: Option<&WeatherContext>,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let reply = advisor.generate_response(text, weather);
        self.record(text, reply)
    }

    /// Streaming variant of [`send`](Self::send); chunks are forwarded as
    /// they arrive and the assembled reply is recorded at the end.
    pub fn send_streaming<F>(
        &mut self,
        text: &str,
        advisor: &AgriAdvisor,
        weather: Option<&WeatherContext>,
        mut on_chunk: F,
    ) -> Option<&ChatMessage>
    where
        F: FnMut(&str),
    {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let mut reply = String::new();
        advisor.generate_streaming_response(text, weather, |chunk| {
            reply.push_str(chunk);
            on_chunk(chunk);
        });
        self.record(text, reply)
    }

    /// Append an exchange answered elsewhere (e.g. on a worker thread)
    pub fn record(&mut self, question: &str, answer: impl Into<String>) -> Option<&ChatMessage> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::new(question, true));
        self.messages.push(ChatMessage::new(answer, false));
        self.messages.last()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
        self.messages.push(ChatMessage::new(CLEARED_GREETING, false));
    }
}
