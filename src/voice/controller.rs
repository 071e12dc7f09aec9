//! Recognition session controller.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::engine::{MicrophoneAccess, RecognitionEngine};
use super::error::VoiceError;
use super::locale::resolve_option;
use super::policy::{EndContext, EndDecision, RecoveryPolicy, VoiceTiming};
use super::probe::{BrowserProfile, optimal_settings};
use super::transcript::TranscriptBuffer;
use super::types::{EngineEvent, RecognitionConfig, ResultBatch, SessionState, VoiceEvent};

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Engine asked to start
    Started,
    /// A session is already active; nothing changed
    AlreadyActive,
    /// Host has no recognition capability
    Unsupported,
    /// Microphone access refused
    PermissionDenied,
    /// Engine refused to start
    EngineFailed,
}

#[derive(Debug, Clone, Copy, Default)]
struct Timers {
    restart: Option<Instant>,
    silence: Option<Instant>,
    autostop: Option<Instant>,
}

impl Timers {
    fn clear(&mut self) {
        *self = Timers::default();
    }

    fn next(&self) -> Option<Instant> {
        [self.restart, self.silence, self.autostop]
            .into_iter()
            .flatten()
            .min()
    }
}

/// Owns one recognition session at a time.
///
/// Engine callbacks are fed through [`handle_engine_event`](Self::handle_engine_event)
/// in arrival order and timers fire from [`tick`](Self::tick). Output is
/// queued as [`VoiceEvent`]s and drained with [`poll_events`](Self::poll_events).
pub struct SessionController {
    profile: BrowserProfile,
    host_locale: String,
    config: RecognitionConfig,
    policy: RecoveryPolicy,
    engine: Box<dyn RecognitionEngine>,
    microphone: Box<dyn MicrophoneAccess>,
    state: SessionState,
    buffer: TranscriptBuffer,
    timers: Timers,
    stop_requested: bool,
    /// A final result arrived since the last `start_listening`
    committed: bool,
    restart_attempts: u32,
    last_error: Option<VoiceError>,
    events: VecDeque<VoiceEvent>,
}

impl SessionController {
    /// Create a controller with the profile's default settings
    pub fn new(
        profile: BrowserProfile,
        host_locale: &str,
        language: &str,
        timing: VoiceTiming,
        engine: Box<dyn RecognitionEngine>,
        microphone: Box<dyn MicrophoneAccess>,
    ) -> Self {
        let settings = optimal_settings(&profile, host_locale, &timing);
        let config = RecognitionConfig {
            language: resolve_option(language, host_locale),
            continuous: settings.continuous,
            interim_results: settings.interim_results,
        };
        Self::with_config(profile, host_locale, config, timing, engine, microphone)
    }

    /// Create a controller with an explicit configuration
    pub fn with_config(
        profile: BrowserProfile,
        host_locale: &str,
        config: RecognitionConfig,
        timing: VoiceTiming,
        engine: Box<dyn RecognitionEngine>,
        microphone: Box<dyn MicrophoneAccess>,
    ) -> Self {
        let auto_restart = !profile.is_mobile;
        Self {
            profile,
            host_locale: host_locale.to_string(),
            config,
            policy: RecoveryPolicy::new(timing, auto_restart),
            engine,
            microphone,
            state: SessionState::Idle,
            buffer: TranscriptBuffer::new(),
            timers: Timers::default(),
            stop_requested: false,
            committed: false,
            restart_attempts: 0,
            last_error: None,
            events: VecDeque::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.state.is_listening()
    }

    pub fn is_supported(&self) -> bool {
        self.profile.supports_recognition
    }

    pub fn profile(&self) -> &BrowserProfile {
        &self.profile
    }

    pub fn config(&self) -> &RecognitionConfig {
        &self.config
    }

    pub fn transcript(&self) -> &TranscriptBuffer {
        &self.buffer
    }

    pub fn last_error(&self) -> Option<&VoiceError> {
        self.last_error.as_ref()
    }

    /// True while a restart is scheduled
    pub fn restart_pending(&self) -> bool {
        self.timers.restart.is_some()
    }

    /// Earliest pending timer, for drivers that sleep between ticks
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next()
    }

    /// Take queued events
    pub fn poll_events(&mut self) -> Vec<VoiceEvent> {
        self.events.drain(..).collect()
    }

    /// Start a session.
    ///
    /// Ignored while a session is active. Microphone access is checked and
    /// released before the engine is started.
    pub fn start_listening(&mut self, now: Instant) -> StartOutcome {
        if !self.profile.supports_recognition {
            let err = VoiceError::CapabilityUnsupported {
                browser: self.profile.vendor.to_string(),
            };
            self.report_error(err);
            return StartOutcome::Unsupported;
        }

        if self.state.is_active() {
            debug!(state = %self.state, "start ignored, session already active");
            return StartOutcome::AlreadyActive;
        }

        self.timers.clear();

        match self.microphone.request_audio() {
            Ok(mut stream) => stream.stop_tracks(),
            Err(err) => {
                warn!("microphone access failed: {}", err);
                self.report_error(VoiceError::PermissionDenied);
                return StartOutcome::PermissionDenied;
            }
        }

        self.buffer.clear();
        self.last_error = None;
        self.stop_requested = false;
        self.committed = false;
        self.restart_attempts = 0;

        if self.start_engine() {
            StartOutcome::Started
        } else {
            StartOutcome::EngineFailed
        }
    }

    /// Request a graceful stop; no-op unless starting or listening
    pub fn stop_listening(&mut self) {
        if self.timers.restart.take().is_some() {
            debug!("pending restart cancelled by stop");
            self.events.push_back(VoiceEvent::Ended);
        }

        if !matches!(self.state, SessionState::Starting | SessionState::Listening) {
            return;
        }

        self.request_stop();
    }

    pub fn reset_transcript(&mut self) {
        self.buffer.clear();
    }

    /// Switch recognition language.
    ///
    /// The configuration is immutable while a session runs, so an active
    /// session is torn down first. The caller starts listening again.
    pub fn change_language(&mut self, locale: &str) {
        let language = resolve_option(locale, &self.host_locale);
        if language == self.config.language {
            return;
        }
        info!(from = %self.config.language, to = %language, "changing recognition language");
        let was_active = self.state.is_active() || self.timers.restart.is_some();
        self.teardown();
        if was_active {
            self.events.push_back(VoiceEvent::Ended);
        }
        self.config = self.config.with_language(language);
    }

    /// Abort any session and invalidate every timer
    pub fn teardown(&mut self) {
        self.timers.clear();
        if self.state.is_active() {
            debug!(state = %self.state, "tearing down recognition session");
            self.engine.abort();
        }
        self.state = SessionState::Idle;
        self.stop_requested = false;
    }

    /// Process one engine event
    pub fn handle_engine_event(&mut self, event: EngineEvent, now: Instant) {
        match event {
            EngineEvent::Start => self.on_start(now),
            EngineEvent::Result(batch) => self.on_result(&batch, now),
            EngineEvent::Error { code } => self.on_error(&code),
            EngineEvent::End => self.on_end(now),
        }
    }

    /// Fire expired timers
    pub fn tick(&mut self, now: Instant) {
        if self.timers.restart.is_some_and(|at| at <= now) {
            self.timers.restart = None;
            self.restart();
        }

        if self.timers.silence.is_some_and(|at| at <= now) {
            self.timers.silence = None;
            if self.state == SessionState::Listening {
                info!("no speech within silence window, stopping");
                self.request_stop();
            }
        }

        if self.timers.autostop.is_some_and(|at| at <= now) {
            self.timers.autostop = None;
            if self.state == SessionState::Listening {
                debug!("mobile auto-stop after final result");
                self.request_stop();
            }
        }
    }

    fn start_engine(&mut self) -> bool {
        self.state = SessionState::Starting;
        match self.engine.start(&self.config) {
            Ok(()) => {
                debug!(language = %self.config.language, "recognition starting");
                true
            }
            Err(err) => {
                warn!("recognition engine failed to start: {}", err);
                self.state = SessionState::Idle;
                self.report_error(VoiceError::Unknown(err.to_string()));
                false
            }
        }
    }

    fn restart(&mut self) {
        if self.state.is_active() {
            return;
        }
        self.restart_attempts += 1;
        info!(attempt = self.restart_attempts, "restarting recognition");
        self.state = SessionState::Starting;
        if let Err(err) = self.engine.start(&self.config) {
            warn!("auto-restart failed: {}", err);
            self.state = SessionState::Idle;
            self.events.push_back(VoiceEvent::Ended);
        }
    }

    fn request_stop(&mut self) {
        self.stop_requested = true;
        self.timers.silence = None;
        self.timers.autostop = None;
        self.state = SessionState::Stopping;
        self.engine.stop();
    }

    fn on_start(&mut self, now: Instant) {
        if self.state != SessionState::Starting {
            debug!(state = %self.state, "ignoring stale start event");
            return;
        }
        self.state = SessionState::Listening;
        self.last_error = None;
        self.timers.silence = self
            .policy
            .silence_timeout(&self.profile, &self.config)
            .map(|window| now + window);
        self.events.push_back(VoiceEvent::Started);
    }

    fn on_result(&mut self, batch: &ResultBatch, now: Instant) {
        if !matches!(self.state, SessionState::Listening | SessionState::Stopping) {
            debug!(state = %self.state, "ignoring result outside a session");
            return;
        }

        self.timers.silence = None;
        self.restart_attempts = 0;

        let buffer = self.buffer.apply(batch);
        let is_final = buffer.interim().is_empty();
        let transcript = buffer.full();
        let committed = batch.delivered().iter().any(|r| r.is_final);
        self.committed |= committed;

        if let Some(delay) = self.policy.mobile_autostop(&self.profile) {
            if !is_final {
                self.timers.autostop = None;
            } else if committed && self.state == SessionState::Listening {
                self.timers.autostop.get_or_insert(now + delay);
            }
        }

        self.events
            .push_back(VoiceEvent::Result { transcript, is_final });
    }

    fn on_error(&mut self, code: &str) {
        if !self.state.is_active() {
            debug!(code, "ignoring error outside a session");
            return;
        }
        let err = VoiceError::from_code(code);
        if err.is_terminal(&self.profile) {
            warn!(code, state = %self.state, "recognition error");
        } else {
            info!(code, state = %self.state, "transient recognition error, session closed");
        }
        self.timers.clear();
        self.state = SessionState::Erroring;
        self.report_error(err);
        self.state = SessionState::Idle;
    }

    fn on_end(&mut self, now: Instant) {
        if !self.state.is_active() {
            debug!("end event after session already closed");
            return;
        }

        self.timers.silence = None;
        self.timers.autostop = None;
        self.state = SessionState::Idle;

        let decision = self.policy.on_end(EndContext {
            profile: &self.profile,
            config: &self.config,
            has_finalized: self.committed,
            error_set: self.last_error.is_some(),
            stop_requested: self.stop_requested,
            restart_attempts: self.restart_attempts,
        });
        self.stop_requested = false;

        match decision {
            EndDecision::Complete => self.events.push_back(VoiceEvent::Ended),
            EndDecision::Restart { delay, attempt } => {
                debug!(attempt, delay_ms = delay.as_millis() as u64, "scheduling restart");
                self.timers.restart = Some(now + delay);
                self.events
                    .push_back(VoiceEvent::RestartScheduled { attempt });
            }
            EndDecision::Exhausted { attempts } => {
                self.report_error(VoiceError::RestartsExhausted(attempts));
                self.events.push_back(VoiceEvent::Ended);
            }
        }
    }

    fn report_error(&mut self, err: VoiceError) {
        let message = err.user_message(&self.profile);
        self.last_error = Some(err);
        self.events.push_back(VoiceEvent::Error { message });
    }

    /// Timing heuristics in use
    pub fn timing(&self) -> &VoiceTiming {
        self.policy.timing()
    }

    /// Time until the next timer fires, if any
    pub fn time_until_deadline(&self, now: Instant) -> Option<Duration> {
        self.next_deadline()
            .map(|at| at.saturating_duration_since(now))
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.teardown();
    }
}
