//! Agricultural chat advisor.
//!
//! Wraps an OpenAI-compatible chat completions endpoint with the AgriBot
//! persona, optional weather context and an offline keyword fallback.

mod advisor;
mod chat;
mod offline;
mod prompt;
mod stream;

pub use advisor::{AgriAdvisor, EMPTY_COMPLETION_REPLY, FAILURE_REPLY, STREAM_FAILURE_REPLY};
pub use chat::{CLEARED_GREETING, ChatMessage, ChatSession, GREETING};
pub use offline::reply as offline_reply;
pub use prompt::{SYSTEM_PROMPT, WeatherContext, user_content};
