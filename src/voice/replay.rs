//! Deterministic replay of a recognition session.
//!
//! A [`ReplayScript`] lists timed user actions and engine events. The driver
//! feeds them to a widget backed by a [`ScriptedEngine`] on a virtual clock,
//! firing controller timers in between, and records every widget event.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::controller::SessionController;
use super::engine::{ScriptedEngine, ScriptedMicrophone};
use super::policy::VoiceTiming;
use super::probe::{BrowserProfile, HostEnvironment};
use super::types::{EngineEvent, RecognitionConfig};
use super::widgets::{VoiceButton, VoiceInput, VoiceTextarea, WidgetEvent};

/// Desktop Chrome, the best-supported host
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Time allowed after the last step for pending timers to fire
const SETTLE: Duration = Duration::from_secs(30);

/// Upper bound on timer firings, in case a policy keeps rescheduling
const MAX_TIMER_FIRINGS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    #[default]
    Button,
    Textarea,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MicrophoneAnswer {
    #[default]
    Granted,
    Denied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayAction {
    /// Press the microphone button
    Toggle,
    /// Deliver an engine event
    Engine { event: EngineEvent },
    /// Make the engine refuse its next start
    FailNextStart { reason: String },
    /// Type into the textarea
    SetText { text: String },
    /// Remove the widget
    Unmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayStep {
    /// Offset from the start of the replay
    pub at_ms: u64,
    pub action: ReplayAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Host locale; empty means `en-IN`
    #[serde(default)]
    pub locale: String,
    /// Recognition language or "auto"; unset uses the caller's default
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_engine_available")]
    pub engine_available: bool,
    #[serde(default)]
    pub microphone: MicrophoneAnswer,
    #[serde(default)]
    pub widget: WidgetKind,
    /// Starting textarea content
    #[serde(default)]
    pub initial_text: String,
    pub steps: Vec<ReplayStep>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_engine_available() -> bool {
    true
}

/// One widget event with its virtual timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayLine {
    pub at_ms: u64,
    pub event: WidgetEvent,
}

#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub profile: BrowserProfile,
    pub language: String,
    pub lines: Vec<ReplayLine>,
    /// Textarea value, otherwise every committed transcript joined
    pub text: String,
    pub engine_starts: usize,
    /// Configuration of every engine start, in order
    pub engine_configs: Vec<RecognitionConfig>,
}

enum Widget {
    Button(VoiceButton),
    Textarea(VoiceTextarea),
    Input(VoiceInput),
}

impl Widget {
    fn controller(&self) -> &SessionController {
        match self {
            Widget::Button(b) => b.controller(),
            Widget::Textarea(t) => t.button().controller(),
            Widget::Input(i) => i.button().controller(),
        }
    }

    fn toggle(&mut self, now: Instant) -> Vec<WidgetEvent> {
        match self {
            Widget::Button(b) => b.toggle(now),
            Widget::Textarea(t) => t.toggle(now),
            Widget::Input(i) => i.toggle(now),
        }
    }

    fn on_engine_event(&mut self, event: EngineEvent, now: Instant) -> Vec<WidgetEvent> {
        match self {
            Widget::Button(b) => b.on_engine_event(event, now),
            Widget::Textarea(t) => t.on_engine_event(event, now),
            Widget::Input(i) => i.on_engine_event(event, now),
        }
    }

    fn tick(&mut self, now: Instant) -> Vec<WidgetEvent> {
        match self {
            Widget::Button(b) => b.tick(now),
            Widget::Textarea(t) => t.tick(now),
            Widget::Input(i) => i.tick(now),
        }
    }

    fn unmount(&mut self) {
        match self {
            Widget::Button(b) => b.unmount(),
            Widget::Textarea(t) => t.unmount(),
            Widget::Input(i) => i.unmount(),
        }
    }
}

struct Driver {
    base: Instant,
    widget: Widget,
    engine: ScriptedEngine,
    lines: Vec<ReplayLine>,
    committed: String,
}

impl Driver {
    fn record(&mut self, now: Instant, events: Vec<WidgetEvent>) {
        let at_ms = now.saturating_duration_since(self.base).as_millis() as u64;
        for event in events {
            if let WidgetEvent::Transcript(text) = &event {
                self.committed = super::transcript::append_fragment(&self.committed, text);
            }
            self.lines.push(ReplayLine { at_ms, event });
        }
    }

    /// Feed back whatever the engine raised in response to controller calls
    fn pump(&mut self, now: Instant) {
        loop {
            let pending = self.engine.drain_pending();
            if pending.is_empty() {
                break;
            }
            for event in pending {
                let events = self.widget.on_engine_event(event, now);
                self.record(now, events);
            }
        }
    }

    fn run_timers(&mut self, until: Instant) {
        for _ in 0..MAX_TIMER_FIRINGS {
            let Some(deadline) = self.widget.controller().next_deadline() else {
                return;
            };
            if deadline > until {
                return;
            }
            let events = self.widget.tick(deadline);
            self.record(deadline, events);
            self.pump(deadline);
        }
        warn!("Timer limit reached during replay");
    }

    fn apply(&mut self, action: ReplayAction, now: Instant) {
        let events = match action {
            ReplayAction::Toggle => self.widget.toggle(now),
            ReplayAction::Engine { event } => self.widget.on_engine_event(event, now),
            ReplayAction::FailNextStart { reason } => {
                self.engine.fail_next_start(reason);
                Vec::new()
            }
            ReplayAction::SetText { text } => {
                match &mut self.widget {
                    Widget::Textarea(t) => {
                        if !t.set_text(text) {
                            debug!("Typed text ignored during voice preview");
                        }
                    }
                    _ => warn!("set_text only applies to the textarea widget"),
                }
                Vec::new()
            }
            ReplayAction::Unmount => {
                self.widget.unmount();
                Vec::new()
            }
        };
        self.record(now, events);
        self.pump(now);
    }
}

/// Run a script to completion.
///
/// `default_language` applies when the script does not name a language.
pub fn run(script: &ReplayScript, timing: VoiceTiming, default_language: &str) -> ReplayOutcome {
    let locale = if script.locale.trim().is_empty() {
        "en-IN".to_string()
    } else {
        script.locale.clone()
    };
    let env = HostEnvironment {
        user_agent: script.user_agent.clone(),
        locale: locale.clone(),
        speech_recognition: false,
        webkit_speech_recognition: script.engine_available,
    };
    let profile = BrowserProfile::detect(&env);

    let engine = ScriptedEngine::new();
    let microphone = match script.microphone {
        MicrophoneAnswer::Granted => ScriptedMicrophone::granted(),
        MicrophoneAnswer::Denied => ScriptedMicrophone::denied(),
    };
    let controller = SessionController::new(
        profile,
        &locale,
        script.language.as_deref().unwrap_or(default_language),
        timing,
        Box::new(engine.clone()),
        Box::new(microphone),
    );
    let language = controller.config().language.clone();

    let widget = match script.widget {
        WidgetKind::Button => Widget::Button(VoiceButton::new(controller)),
        WidgetKind::Textarea => {
            Widget::Textarea(VoiceTextarea::new(controller, script.initial_text.clone()))
        }
        WidgetKind::Input => Widget::Input(VoiceInput::new(controller)),
    };

    let base = Instant::now();
    let mut driver = Driver {
        base,
        widget,
        engine,
        lines: Vec::new(),
        committed: String::new(),
    };

    let mut steps = script.steps.clone();
    steps.sort_by_key(|step| step.at_ms);
    let mut last = base;
    for step in steps {
        let at = base + Duration::from_millis(step.at_ms);
        driver.run_timers(at);
        driver.apply(step.action, at);
        last = at;
    }
    driver.run_timers(last + SETTLE);

    let text = match &driver.widget {
        Widget::Textarea(t) => t.value().to_string(),
        Widget::Button(_) | Widget::Input(_) => driver.committed.clone(),
    };

    ReplayOutcome {
        profile,
        language,
        text,
        engine_starts: driver.engine.start_count(),
        engine_configs: driver.engine.starts(),
        lines: driver.lines,
    }
}
