//! Probe command implementation

use std::path::Path;

use anyhow::Result;

use farmhand::context::host_locale;
use farmhand::voice::locale::resolve_option;
use farmhand::voice::{BrowserProfile, HostEnvironment, check_speech_support, optimal_settings};

use super::load_config;

/// Classify a user agent and show the recognition settings it would get
pub fn probe_command(
    work_dir: &Path,
    config_path: Option<&Path>,
    user_agent: &str,
    locale: Option<String>,
    has_engine: bool,
) -> Result<()> {
    let config = load_config(work_dir, config_path)?;
    let locale = locale.unwrap_or_else(host_locale);

    let env = HostEnvironment {
        user_agent: user_agent.to_string(),
        locale: locale.clone(),
        speech_recognition: false,
        webkit_speech_recognition: has_engine,
    };
    let profile = BrowserProfile::detect(&env);
    let support = check_speech_support(&profile);
    let settings = optimal_settings(&profile, &locale, &config.voice.timing());
    let language = resolve_option(&config.voice.language, &locale);

    println!("Browser:     {}", profile.vendor);
    println!("Mobile:      {} ({:?})", profile.is_mobile, profile.os);
    println!("Supported:   {}", support.message);
    println!("Language:    {}", language);
    if language != settings.default_language {
        println!("Host locale: {}", settings.default_language);
    }
    println!("Continuous:  {}", settings.continuous);
    println!("Interim:     {}", settings.interim_results);
    println!("Silence:     {} ms", settings.silence_timeout.as_millis());
    println!("Restart:     {}", settings.auto_restart);

    if !support.recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in &support.recommendations {
            println!("  • {}", rec);
        }
    }

    Ok(())
}
