//! Host capability probing.
//!
//! The profile is derived once from the user-agent string and the presence of
//! recognition constructors, then injected wherever device-specific behaviour
//! is needed.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

use super::locale::resolve_language;
use super::policy::VoiceTiming;

static MOBILE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)android|webos|iphone|ipad|ipod|blackberry|iemobile|opera mini")
        .expect("valid mobile regex")
});
static ANDROID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)android").expect("valid android regex"));
static IOS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)iphone|ipad|ipod").expect("valid ios regex"));
static CHROME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)chrome").expect("valid chrome regex"));
static EDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)edg").expect("valid edge regex"));
static SAFARI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)safari").expect("valid safari regex"));
static FIREFOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)firefox").expect("valid firefox regex"));

/// What the probe can observe about the host
#[derive(Debug, Clone, Default)]
pub struct HostEnvironment {
    pub user_agent: String,
    /// Preferred locale, e.g. `en-US`
    pub locale: String,
    /// Standard `SpeechRecognition` constructor present
    pub speech_recognition: bool,
    /// Vendor-prefixed `webkitSpeechRecognition` constructor present
    pub webkit_speech_recognition: bool,
}

/// Browser vendor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserVendor {
    Chrome,
    Edge,
    Safari,
    Firefox,
    #[default]
    Unknown,
}

impl std::fmt::Display for BrowserVendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrowserVendor::Chrome => write!(f, "Chrome"),
            BrowserVendor::Edge => write!(f, "Edge"),
            BrowserVendor::Safari => write!(f, "Safari"),
            BrowserVendor::Firefox => write!(f, "Firefox"),
            BrowserVendor::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Mobile operating system family, used for device-specific messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceOs {
    Android,
    Ios,
    #[default]
    Other,
}

/// Capability descriptor of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrowserProfile {
    pub is_mobile: bool,
    pub os: DeviceOs,
    pub vendor: BrowserVendor,
    pub supports_recognition: bool,
}

impl BrowserProfile {
    /// Detect the profile of a host environment
    pub fn detect(env: &HostEnvironment) -> Self {
        let ua = env.user_agent.as_str();

        let os = if ANDROID_RE.is_match(ua) {
            DeviceOs::Android
        } else if IOS_RE.is_match(ua) {
            DeviceOs::Ios
        } else {
            DeviceOs::Other
        };

        let is_chrome = CHROME_RE.is_match(ua);
        let is_edge = EDGE_RE.is_match(ua);
        let vendor = if is_chrome && !is_edge {
            BrowserVendor::Chrome
        } else if is_edge {
            BrowserVendor::Edge
        } else if SAFARI_RE.is_match(ua) && !is_chrome {
            BrowserVendor::Safari
        } else if FIREFOX_RE.is_match(ua) {
            BrowserVendor::Firefox
        } else {
            BrowserVendor::Unknown
        };

        Self {
            is_mobile: MOBILE_RE.is_match(ua),
            os,
            vendor,
            supports_recognition: env.speech_recognition || env.webkit_speech_recognition,
        }
    }
}

/// Default recognition settings for a profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSettings {
    pub continuous: bool,
    pub interim_results: bool,
    pub default_language: String,
    pub silence_timeout: Duration,
    pub auto_restart: bool,
}

/// Mobile engines are unreliable in continuous mode and with interim results
pub fn optimal_settings(profile: &BrowserProfile, locale: &str, timing: &VoiceTiming) -> SpeechSettings {
    let desktop = !profile.is_mobile;
    SpeechSettings {
        continuous: desktop,
        interim_results: desktop,
        default_language: resolve_language(locale),
        silence_timeout: timing.silence_timeout(profile),
        auto_restart: desktop,
    }
}

/// Support verdict with suggestions for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSupport {
    pub is_supported: bool,
    pub message: String,
    pub recommendations: Vec<String>,
}

pub fn check_speech_support(profile: &BrowserProfile) -> SpeechSupport {
    if profile.supports_recognition {
        return SpeechSupport {
            is_supported: true,
            message: "Voice input is supported".to_string(),
            recommendations: Vec::new(),
        };
    }

    let mut recommendations = Vec::new();
    if profile.is_mobile {
        recommendations.push("Use Chrome or Edge browser for voice features".to_string());
        if profile.os == DeviceOs::Android {
            recommendations.push("Update your Chrome browser to latest version".to_string());
            recommendations.push("Check if microphone permission is granted".to_string());
        }
    } else {
        recommendations.push("Try using Chrome, Edge, or Safari browser".to_string());
        recommendations.push("Ensure your browser is up to date".to_string());
    }

    SpeechSupport {
        is_supported: false,
        message: format!("Voice input not supported in {}", profile.vendor),
        recommendations,
    }
}
