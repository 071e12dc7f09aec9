//! Recovery and restart policy.
//!
//! Every decision here is a pure function of the profile, the session
//! configuration and what has happened in the session so far. The controller
//! owns the timers; the policy only says when they should fire.

use std::time::Duration;

use super::probe::BrowserProfile;
use super::types::RecognitionConfig;

/// Heuristic durations of the voice subsystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTiming {
    /// Delay before restarting a desktop session the engine ended on its own
    pub restart_delay: Duration,
    /// Restarts allowed per `start_listening`
    pub max_auto_restarts: u32,
    /// Silence window on desktop before a forced stop
    pub silence_timeout_desktop: Duration,
    /// Silence window on mobile before a forced stop
    pub silence_timeout_mobile: Duration,
    /// Mobile auto-stop after a final result with no interim activity
    pub mobile_autostop: Duration,
}

impl Default for VoiceTiming {
    fn default() -> Self {
        Self {
            restart_delay: Duration::from_millis(300),
            max_auto_restarts: 3,
            silence_timeout_desktop: Duration::from_millis(3000),
            silence_timeout_mobile: Duration::from_millis(2000),
            mobile_autostop: Duration::from_millis(500),
        }
    }
}

impl VoiceTiming {
    pub fn silence_timeout(&self, profile: &BrowserProfile) -> Duration {
        if profile.is_mobile {
            self.silence_timeout_mobile
        } else {
            self.silence_timeout_desktop
        }
    }
}

/// What the controller knows when the engine reports `end`
#[derive(Debug, Clone, Copy)]
pub struct EndContext<'a> {
    pub profile: &'a BrowserProfile,
    pub config: &'a RecognitionConfig,
    pub has_finalized: bool,
    pub error_set: bool,
    pub stop_requested: bool,
    pub restart_attempts: u32,
}

/// Outcome of an `end` event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDecision {
    /// Session is over
    Complete,
    /// Restart after the delay; `attempt` is 1-based
    Restart { delay: Duration, attempt: u32 },
    /// Restart budget used up
    Exhausted { attempts: u32 },
}

#[derive(Debug, Clone, Default)]
pub struct RecoveryPolicy {
    timing: VoiceTiming,
    auto_restart: bool,
}

impl RecoveryPolicy {
    pub fn new(timing: VoiceTiming, auto_restart: bool) -> Self {
        Self {
            timing,
            auto_restart,
        }
    }

    pub fn timing(&self) -> &VoiceTiming {
        &self.timing
    }

    /// Decide what follows an `end` event.
    ///
    /// Mobile engines end eagerly after one utterance, so mobile sessions and
    /// sessions that already committed text are complete. Desktop continuous
    /// sessions that ended silently are restarted until the budget runs out.
    pub fn on_end(&self, ctx: EndContext<'_>) -> EndDecision {
        if ctx.profile.is_mobile
            || ctx.has_finalized
            || ctx.error_set
            || ctx.stop_requested
            || !ctx.config.continuous
            || !self.auto_restart
        {
            return EndDecision::Complete;
        }

        if ctx.restart_attempts >= self.timing.max_auto_restarts {
            return EndDecision::Exhausted {
                attempts: ctx.restart_attempts,
            };
        }

        EndDecision::Restart {
            delay: self.timing.restart_delay,
            attempt: ctx.restart_attempts + 1,
        }
    }

    /// Silence window armed when listening starts; continuous desktop sessions only
    pub fn silence_timeout(
        &self,
        profile: &BrowserProfile,
        config: &RecognitionConfig,
    ) -> Option<Duration> {
        (config.continuous && !profile.is_mobile).then(|| self.timing.silence_timeout(profile))
    }

    /// Auto-stop delay after a final result; mobile only
    pub fn mobile_autostop(&self, profile: &BrowserProfile) -> Option<Duration> {
        profile.is_mobile.then_some(self.timing.mobile_autostop)
    }
}
