//! Voice input settings

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::voice::VoiceTiming;

/// Voice input settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Recognition language: a locale tag (hi-IN, en-GB, ...) or "auto"
    /// to follow the host locale
    #[serde(default = "default_voice_language")]
    pub language: String,

    /// Delay before restarting a desktop session that ended without text (ms)
    #[serde(default = "default_restart_delay_ms")]
    pub restart_delay_ms: u64,

    /// Auto-restarts allowed per listening request
    #[serde(default = "default_max_auto_restarts")]
    pub max_auto_restarts: u32,

    /// Silence window before a forced stop on desktop (ms)
    #[serde(default = "default_silence_timeout_desktop_ms")]
    pub silence_timeout_desktop_ms: u64,

    /// Silence window before a forced stop on mobile (ms)
    #[serde(default = "default_silence_timeout_mobile_ms")]
    pub silence_timeout_mobile_ms: u64,

    /// Mobile auto-stop after a final result (ms)
    #[serde(default = "default_mobile_autostop_ms")]
    pub mobile_autostop_ms: u64,
}

fn default_voice_language() -> String {
    "auto".to_string()
}

fn default_restart_delay_ms() -> u64 {
    300
}

fn default_max_auto_restarts() -> u32 {
    3
}

fn default_silence_timeout_desktop_ms() -> u64 {
    3000
}

fn default_silence_timeout_mobile_ms() -> u64 {
    2000
}

fn default_mobile_autostop_ms() -> u64 {
    500 // engines keep the microphone open after the utterance otherwise
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            language: default_voice_language(),
            restart_delay_ms: default_restart_delay_ms(),
            max_auto_restarts: default_max_auto_restarts(),
            silence_timeout_desktop_ms: default_silence_timeout_desktop_ms(),
            silence_timeout_mobile_ms: default_silence_timeout_mobile_ms(),
            mobile_autostop_ms: default_mobile_autostop_ms(),
        }
    }
}

impl VoiceSettings {
    pub fn timing(&self) -> VoiceTiming {
        VoiceTiming {
            restart_delay: Duration::from_millis(self.restart_delay_ms),
            max_auto_restarts: self.max_auto_restarts,
            silence_timeout_desktop: Duration::from_millis(self.silence_timeout_desktop_ms),
            silence_timeout_mobile: Duration::from_millis(self.silence_timeout_mobile_ms),
            mobile_autostop: Duration::from_millis(self.mobile_autostop_ms),
        }
    }
}
