//! Widget bindings.
//!
//! Each widget owns one [`SessionController`] and turns its events into the
//! text-level updates a form needs.

use std::time::Instant;

use super::controller::{SessionController, StartOutcome};
use super::transcript::append_fragment;
use super::types::{EngineEvent, VoiceEvent};

/// Output of a widget after processing input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Committed text for the host form
    Transcript(String),
    /// Live preview text
    Interim(String),
    /// Message to show next to the control
    Error(String),
    /// Listening indicator changed
    Listening(bool),
}

/// Microphone toggle button.
///
/// Final results are delivered as [`WidgetEvent::Transcript`] and the
/// transcript is reset; interim results become [`WidgetEvent::Interim`].
pub struct VoiceButton {
    controller: SessionController,
    disabled: bool,
    error: Option<String>,
}

impl VoiceButton {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            disabled: false,
            error: None,
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn is_listening(&self) -> bool {
        self.controller.is_listening()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn controller(&self) -> &SessionController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SessionController {
        &mut self.controller
    }

    /// Tooltip for the current state
    pub fn title(&self) -> &'static str {
        if !self.controller.is_supported() {
            "Voice input not supported"
        } else if self.controller.state().is_active() {
            "Stop recording"
        } else {
            "Start voice input"
        }
    }

    /// Press the button
    pub fn toggle(&mut self, now: Instant) -> Vec<WidgetEvent> {
        if self.disabled && self.controller.is_supported() {
            return Vec::new();
        }
        if self.controller.state().is_active() || self.controller.restart_pending() {
            self.controller.stop_listening();
        } else {
            self.error = None;
            if self.controller.start_listening(now) == StartOutcome::AlreadyActive {
                return Vec::new();
            }
        }
        self.drain()
    }

    pub fn on_engine_event(&mut self, event: EngineEvent, now: Instant) -> Vec<WidgetEvent> {
        self.controller.handle_engine_event(event, now);
        self.drain()
    }

    pub fn tick(&mut self, now: Instant) -> Vec<WidgetEvent> {
        self.controller.tick(now);
        self.drain()
    }

    /// Release the session, e.g. when the widget is removed
    pub fn unmount(&mut self) {
        self.controller.teardown();
    }

    fn drain(&mut self) -> Vec<WidgetEvent> {
        let mut out = Vec::new();
        for event in self.controller.poll_events() {
            match event {
                VoiceEvent::Started => out.push(WidgetEvent::Listening(true)),
                VoiceEvent::Ended => out.push(WidgetEvent::Listening(false)),
                VoiceEvent::RestartScheduled { .. } => {}
                VoiceEvent::Error { message } => {
                    self.error = Some(message.clone());
                    out.push(WidgetEvent::Error(message));
                    out.push(WidgetEvent::Listening(false));
                }
                VoiceEvent::Result {
                    transcript,
                    is_final,
                } => {
                    let text = transcript.trim();
                    if text.is_empty() {
                        continue;
                    }
                    if is_final {
                        out.push(WidgetEvent::Transcript(text.to_string()));
                        self.controller.reset_transcript();
                    } else {
                        out.push(WidgetEvent::Interim(text.to_string()));
                    }
                }
            }
        }
        out
    }
}

/// Text area with a voice button.
///
/// While listening the displayed text is the committed value plus the live
/// preview; typed edits are ignored until listening ends.
pub struct VoiceTextarea {
    button: VoiceButton,
    value: String,
    display: String,
    previewing: bool,
}

impl VoiceTextarea {
    pub fn new(controller: SessionController, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            button: VoiceButton::new(controller),
            display: value.clone(),
            value,
            previewing: false,
        }
    }

    /// Committed text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Text currently shown
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn button(&self) -> &VoiceButton {
        &self.button
    }

    /// Typed input; returns false when ignored during a voice preview
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if self.previewing {
            return false;
        }
        self.value = text.into();
        self.display = self.value.clone();
        true
    }

    pub fn toggle(&mut self, now: Instant) -> Vec<WidgetEvent> {
        let events = self.button.toggle(now);
        self.apply(events)
    }

    pub fn on_engine_event(&mut self, event: EngineEvent, now: Instant) -> Vec<WidgetEvent> {
        let events = self.button.on_engine_event(event, now);
        self.apply(events)
    }

    pub fn tick(&mut self, now: Instant) -> Vec<WidgetEvent> {
        let events = self.button.tick(now);
        self.apply(events)
    }

    pub fn unmount(&mut self) {
        self.button.unmount();
        self.previewing = false;
        self.display = self.value.clone();
    }

    fn apply(&mut self, events: Vec<WidgetEvent>) -> Vec<WidgetEvent> {
        for event in &events {
            match event {
                WidgetEvent::Interim(text) => {
                    self.previewing = true;
                    self.display = append_fragment(&self.value, text);
                }
                WidgetEvent::Transcript(text) => {
                    self.previewing = false;
                    self.value = append_fragment(&self.value, text);
                    self.display = self.value.clone();
                }
                WidgetEvent::Listening(false) | WidgetEvent::Error(_) => {
                    self.previewing = false;
                    self.display = self.value.clone();
                }
                WidgetEvent::Listening(true) => {}
            }
        }
        events
    }
}

/// Single-utterance voice input: the first final transcript is delivered,
/// then the session is reset and stopped.
pub struct VoiceInput {
    button: VoiceButton,
    live: String,
    placeholder: String,
}

impl VoiceInput {
    pub fn new(controller: SessionController) -> Self {
        Self {
            button: VoiceButton::new(controller),
            live: String::new(),
            placeholder: "Click to speak...".to_string(),
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Live transcript panel text
    pub fn live_text(&self) -> &str {
        if self.live.is_empty() {
            &self.placeholder
        } else {
            &self.live
        }
    }

    pub fn is_listening(&self) -> bool {
        self.button.is_listening()
    }

    pub fn button(&self) -> &VoiceButton {
        &self.button
    }

    pub fn toggle(&mut self, now: Instant) -> Vec<WidgetEvent> {
        let events = self.button.toggle(now);
        self.apply(events)
    }

    pub fn on_engine_event(&mut self, event: EngineEvent, now: Instant) -> Vec<WidgetEvent> {
        let events = self.button.on_engine_event(event, now);
        self.apply(events)
    }

    pub fn tick(&mut self, now: Instant) -> Vec<WidgetEvent> {
        let events = self.button.tick(now);
        self.apply(events)
    }

    pub fn unmount(&mut self) {
        self.button.unmount();
    }

    fn apply(&mut self, events: Vec<WidgetEvent>) -> Vec<WidgetEvent> {
        let mut out = Vec::with_capacity(events.len());
        for event in events {
            match &event {
                WidgetEvent::Interim(text) => self.live = text.clone(),
                WidgetEvent::Transcript(_) => {
                    self.live.clear();
                    self.button.controller_mut().stop_listening();
                }
                WidgetEvent::Listening(true) => self.live.clear(),
                _ => {}
            }
            out.push(event);
        }
        out
    }
}
