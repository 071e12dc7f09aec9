//! Voice error taxonomy and user-facing messages.

use super::probe::{BrowserProfile, DeviceOs};

/// Errors surfaced by the voice subsystem.
///
/// `Display` is the developer-facing text used in logs; the host UI shows
/// [`VoiceError::user_message`], which depends on the device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoiceError {
    #[error("speech recognition is not supported in {browser}")]
    CapabilityUnsupported { browser: String },

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("no speech detected")]
    NoSpeechDetected,

    #[error("audio capture unavailable")]
    AudioCaptureUnavailable,

    #[error("network error during recognition")]
    NetworkError,

    #[error("recognition service not allowed")]
    ServiceNotAllowed,

    #[error("recognition grammar error")]
    BadGrammar,

    #[error("language not supported")]
    LanguageNotSupported,

    #[error("speech recognition error: {0}")]
    Unknown(String),

    #[error("recognition stopped after {0} restart attempts")]
    RestartsExhausted(u32),
}

impl VoiceError {
    /// Map a platform error code to the fixed vocabulary
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" | "permission-denied" => VoiceError::PermissionDenied,
            "no-speech" => VoiceError::NoSpeechDetected,
            "audio-capture" => VoiceError::AudioCaptureUnavailable,
            "network" => VoiceError::NetworkError,
            "service-not-allowed" => VoiceError::ServiceNotAllowed,
            "bad-grammar" => VoiceError::BadGrammar,
            "language-not-supported" => VoiceError::LanguageNotSupported,
            other => VoiceError::Unknown(other.to_string()),
        }
    }

    /// Platform code for this error, if it came from the engine vocabulary
    pub fn code(&self) -> &str {
        match self {
            VoiceError::CapabilityUnsupported { .. } => "not-supported",
            VoiceError::PermissionDenied => "permission-denied",
            VoiceError::NoSpeechDetected => "no-speech",
            VoiceError::AudioCaptureUnavailable => "audio-capture",
            VoiceError::NetworkError => "network",
            VoiceError::ServiceNotAllowed => "service-not-allowed",
            VoiceError::BadGrammar => "bad-grammar",
            VoiceError::LanguageNotSupported => "language-not-supported",
            VoiceError::Unknown(code) => code,
            VoiceError::RestartsExhausted(_) => "restarts-exhausted",
        }
    }

    /// Whether the condition ends the current attempt on this device.
    ///
    /// `no-speech` and `network` are transient only for desktop continuous
    /// sessions; everything else, including unknown codes, is terminal.
    pub fn is_terminal(&self, profile: &BrowserProfile) -> bool {
        match self {
            VoiceError::NoSpeechDetected | VoiceError::NetworkError => profile.is_mobile,
            _ => true,
        }
    }

    /// Human-readable, device-aware message for the host UI
    pub fn user_message(&self, profile: &BrowserProfile) -> String {
        let android = profile.os == DeviceOs::Android;
        match self {
            VoiceError::CapabilityUnsupported { browser } => {
                format!("Voice input not supported in {}", browser)
            }
            VoiceError::PermissionDenied => "Microphone permission denied. Please allow microphone access in your browser settings and try again.".to_string(),
            VoiceError::NoSpeechDetected if android => {
                "No speech detected. Please speak clearly and close to your device microphone."
                    .to_string()
            }
            VoiceError::NoSpeechDetected => "No speech was detected. Please try again.".to_string(),
            VoiceError::AudioCaptureUnavailable => {
                "Microphone not found. Please check your device microphone settings.".to_string()
            }
            VoiceError::NetworkError => {
                "Network error occurred. Please check your internet connection and try again."
                    .to_string()
            }
            VoiceError::ServiceNotAllowed if android => {
                "Speech service not available. Please use Chrome or Edge browser.".to_string()
            }
            VoiceError::ServiceNotAllowed => "Speech recognition service not available.".to_string(),
            VoiceError::BadGrammar => "Speech recognition grammar error. Please try again.".to_string(),
            VoiceError::LanguageNotSupported => {
                "Selected language not supported. Switching to English.".to_string()
            }
            VoiceError::Unknown(_) | VoiceError::RestartsExhausted(_) if profile.is_mobile => {
                "Voice input failed. Please use Chrome or Edge browser, or try refreshing the page."
                    .to_string()
            }
            VoiceError::Unknown(code) => format!("Speech recognition error: {}", code),
            VoiceError::RestartsExhausted(_) => {
                "Voice input stopped listening. Please press the microphone to try again."
                    .to_string()
            }
        }
    }
}
