//! Voice input module
//!
//! This module provides:
//! 1. Capability probing of the host environment (desktop vs. mobile, vendor)
//! 2. A recognition session controller with a single active session per widget
//! 3. Transcript assembly from final and interim recognition results
//! 4. A recovery policy for auto-restart, silence timeout and mobile auto-stop
//! 5. Widget bindings that forward transcripts into host text values
//! 6. Scripted replay of a session on a virtual clock (`replay`)
//!
//! Architecture:
//! - BrowserProfile: capability descriptor computed once per host environment
//! - SessionController: explicit state machine fed with engine events and timer ticks
//! - TranscriptBuffer: `(finalized, interim)` pair, finalized only ever grows
//! - RecoveryPolicy: pure decisions over `(profile, session history)`
//! - VoiceButton / VoiceTextarea / VoiceInput: presentation-side consumers
//!
//! Everything here runs on one logical thread. Engine callbacks are delivered
//! through `SessionController::handle_engine_event` in arrival order, and timers
//! are plain deadlines fired by `SessionController::tick`.

mod controller;
pub mod engine;
mod error;
pub mod locale;
mod policy;
mod probe;
pub mod replay;
mod transcript;
mod types;
pub mod widgets;

#[cfg(test)]
mod tests;

// Re-export from controller
pub use controller::{SessionController, StartOutcome};

// Re-export from engine
pub use engine::{
    EngineError, MediaStream, MicrophoneAccess, RecognitionEngine, ScriptedEngine,
    ScriptedMicrophone,
};

// Re-export from error
pub use error::VoiceError;

// Re-export from locale
pub use locale::{DEFAULT_LANGUAGE, resolve_language};

// Re-export from policy
pub use policy::{EndContext, EndDecision, RecoveryPolicy, VoiceTiming};

// Re-export from probe
pub use probe::{
    BrowserProfile, BrowserVendor, DeviceOs, HostEnvironment, SpeechSettings, SpeechSupport,
    check_speech_support, optimal_settings,
};

// Re-export from transcript
pub use transcript::{TranscriptBuffer, append_fragment};

// Re-export from types
pub use types::{
    EngineEvent, RecognitionConfig, RecognitionResult, ResultBatch, SessionState, VoiceEvent,
};

// Re-export from widgets
pub use widgets::{VoiceButton, VoiceInput, VoiceTextarea, WidgetEvent};
