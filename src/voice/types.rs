//! Voice session types.

use serde::{Deserialize, Serialize};

/// Recognition session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No session
    #[default]
    Idle,
    /// Engine asked to start, waiting for its start event
    Starting,
    /// Engine is capturing and delivering results
    Listening,
    /// Graceful stop requested, waiting for the engine's end event
    Stopping,
    /// Error received, session is being torn down
    Erroring,
}

impl SessionState {
    /// Returns true if a session occupies the controller
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            SessionState::Starting | SessionState::Listening | SessionState::Stopping
        )
    }

    /// Returns true if the engine is capturing audio
    pub fn is_listening(&self) -> bool {
        matches!(self, SessionState::Listening)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Starting => write!(f, "Starting"),
            SessionState::Listening => write!(f, "Listening"),
            SessionState::Stopping => write!(f, "Stopping"),
            SessionState::Erroring => write!(f, "Erroring"),
        }
    }
}

/// Configuration of one recognition session.
///
/// Never mutated while a session is active; a language change tears the
/// session down and builds a new config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionConfig {
    /// BCP-47 locale tag handed to the engine (e.g. `hi-IN`)
    pub language: String,
    /// Keep listening across utterances
    pub continuous: bool,
    /// Deliver provisional results before finalization
    pub interim_results: bool,
}

impl RecognitionConfig {
    pub fn with_language(&self, language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..self.clone()
        }
    }
}

/// A single recognition result as delivered by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub transcript: String,
    #[serde(default)]
    pub is_final: bool,
}

impl RecognitionResult {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            transcript: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            transcript: text.into(),
            is_final: false,
        }
    }
}

/// One result event: the engine's result list and the offset from which
/// results are new or changed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultBatch {
    #[serde(default)]
    pub result_index: usize,
    pub results: Vec<RecognitionResult>,
}

impl ResultBatch {
    pub fn new(result_index: usize, results: Vec<RecognitionResult>) -> Self {
        Self {
            result_index,
            results,
        }
    }

    /// Results at or after `result_index`
    pub fn delivered(&self) -> &[RecognitionResult] {
        self.results.get(self.result_index..).unwrap_or(&[])
    }
}

/// Events raised by the platform recognition engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Engine began capturing
    Start,
    /// New or changed results
    Result(ResultBatch),
    /// Engine error with its platform code (e.g. `no-speech`)
    Error { code: String },
    /// Engine session finished
    End,
}

/// Events from the session controller to the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceEvent {
    /// Session reached `Listening`
    Started,
    /// Full transcript so far; `is_final` when no interim text is pending
    Result { transcript: String, is_final: bool },
    /// User-facing error message
    Error { message: String },
    /// Session finished and will not restart
    Ended,
    /// Engine ended on its own and a restart is pending
    RestartScheduled { attempt: u32 },
}
