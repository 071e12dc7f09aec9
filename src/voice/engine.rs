//! Platform seams: the recognition engine and microphone access.
//!
//! `ScriptedEngine` and `ScriptedMicrophone` stand in for the platform when
//! replaying recorded sessions. They share state through `Rc`, so a clone kept
//! by the driver observes every call the controller makes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use super::error::VoiceError;
use super::types::{EngineEvent, RecognitionConfig};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("recognition engine unavailable: {0}")]
    Unavailable(String),
}

/// The host's speech recognition engine.
///
/// Calls return immediately; the engine reports progress later through
/// [`EngineEvent`]s delivered to the controller.
pub trait RecognitionEngine {
    fn start(&mut self, config: &RecognitionConfig) -> Result<(), EngineError>;
    /// Finish gracefully; the engine still delivers pending results and `end`
    fn stop(&mut self);
    /// Drop the session without further events
    fn abort(&mut self);
}

/// An acquired audio stream
pub trait MediaStream {
    fn stop_tracks(&mut self);
}

/// Microphone permission gate
pub trait MicrophoneAccess {
    fn request_audio(&mut self) -> Result<Box<dyn MediaStream>, VoiceError>;
}

#[derive(Debug, Default)]
struct EngineLog {
    pending: VecDeque<EngineEvent>,
    starts: Vec<RecognitionConfig>,
    stops: u32,
    aborts: u32,
    running: bool,
    fail_next_start: Option<String>,
}

/// Engine that records calls and echoes the lifecycle events a browser
/// engine would raise (`start` after start, `end` after stop)
#[derive(Debug, Clone, Default)]
pub struct ScriptedEngine {
    log: Rc<RefCell<EngineLog>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `start` call fail
    pub fn fail_next_start(&self, reason: impl Into<String>) {
        self.log.borrow_mut().fail_next_start = Some(reason.into());
    }

    /// Take the lifecycle events raised since the last call
    pub fn drain_pending(&self) -> Vec<EngineEvent> {
        self.log.borrow_mut().pending.drain(..).collect()
    }

    /// Configs of every successful `start`
    pub fn starts(&self) -> Vec<RecognitionConfig> {
        self.log.borrow().starts.clone()
    }

    pub fn start_count(&self) -> usize {
        self.log.borrow().starts.len()
    }

    pub fn stop_count(&self) -> u32 {
        self.log.borrow().stops
    }

    pub fn abort_count(&self) -> u32 {
        self.log.borrow().aborts
    }

    pub fn is_running(&self) -> bool {
        self.log.borrow().running
    }
}

impl RecognitionEngine for ScriptedEngine {
    fn start(&mut self, config: &RecognitionConfig) -> Result<(), EngineError> {
        let mut log = self.log.borrow_mut();
        if let Some(reason) = log.fail_next_start.take() {
            return Err(EngineError::Unavailable(reason));
        }
        debug!(language = %config.language, continuous = config.continuous, "engine start");
        log.running = true;
        log.starts.push(config.clone());
        log.pending.push_back(EngineEvent::Start);
        Ok(())
    }

    fn stop(&mut self) {
        let mut log = self.log.borrow_mut();
        log.stops += 1;
        if log.running {
            log.running = false;
            log.pending.push_back(EngineEvent::End);
        }
    }

    fn abort(&mut self) {
        let mut log = self.log.borrow_mut();
        log.aborts += 1;
        log.running = false;
        log.pending.clear();
    }
}

#[derive(Debug, Default)]
struct MicrophoneLog {
    denied: bool,
    acquired: u32,
    released: u32,
}

/// Microphone gate with a fixed permission answer
#[derive(Debug, Clone, Default)]
pub struct ScriptedMicrophone {
    log: Rc<RefCell<MicrophoneLog>>,
}

impl ScriptedMicrophone {
    pub fn granted() -> Self {
        Self::default()
    }

    pub fn denied() -> Self {
        let mic = Self::default();
        mic.log.borrow_mut().denied = true;
        mic
    }

    pub fn acquired(&self) -> u32 {
        self.log.borrow().acquired
    }

    pub fn released(&self) -> u32 {
        self.log.borrow().released
    }
}

struct ScriptedStream {
    log: Rc<RefCell<MicrophoneLog>>,
    stopped: bool,
}

impl MediaStream for ScriptedStream {
    fn stop_tracks(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.log.borrow_mut().released += 1;
        }
    }
}

impl MicrophoneAccess for ScriptedMicrophone {
    fn request_audio(&mut self) -> Result<Box<dyn MediaStream>, VoiceError> {
        let mut log = self.log.borrow_mut();
        if log.denied {
            return Err(VoiceError::PermissionDenied);
        }
        log.acquired += 1;
        Ok(Box::new(ScriptedStream {
            log: Rc::clone(&self.log),
            stopped: false,
        }))
    }
}
