//! farmhand - a farmer's assistant
//!
//! The core is voice input: a capability probe, a recognition session
//! controller, transcript assembly and a recovery policy, bound to three small
//! widgets. Around it sit the remote collaborators a farmer-facing front end
//! talks to:
//!
//! 1. **Chat advisor**: agricultural Q&A over an OpenAI-compatible completions
//!    API, with weather context and an offline fallback
//! 2. **Weather**: current conditions and air quality for a GPS or IP position
//! 3. **Market prices**: daily mandi prices for the farmer's state
//!
//! None of the collaborators surface errors to the caller; each degrades to a
//! fixed fallback and logs the failure.

pub mod config;
pub mod context;
pub mod geo;
pub mod llm;
pub mod market;
pub mod transport;
pub mod voice;
pub mod weather;

pub use config::Config;
pub use context::AppContext;
