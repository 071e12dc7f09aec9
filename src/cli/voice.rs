//! Voice replay command implementation

use std::path::Path;

use anyhow::{Context, Result};

use farmhand::voice::WidgetEvent;
use farmhand::voice::replay::{self, ReplayScript};

use super::load_config;

/// Replay a recorded session script and print the widget's output
pub fn voice_command(work_dir: &Path, config_path: Option<&Path>, script_path: &Path) -> Result<()> {
    let config = load_config(work_dir, config_path)?;

    let content = std::fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read script: {}", script_path.display()))?;
    let script: ReplayScript = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse script: {}", script_path.display()))?;

    let outcome = replay::run(&script, config.voice.timing(), &config.voice.language);

    println!(
        "{} {} | language {} | widget {:?}\n",
        if outcome.profile.is_mobile { "mobile" } else { "desktop" },
        outcome.profile.vendor,
        outcome.language,
        script.widget
    );

    for line in &outcome.lines {
        let description = match &line.event {
            WidgetEvent::Listening(true) => "listening".to_string(),
            WidgetEvent::Listening(false) => "stopped".to_string(),
            WidgetEvent::Interim(text) => format!("interim    {:?}", text),
            WidgetEvent::Transcript(text) => format!("transcript {:?}", text),
            WidgetEvent::Error(message) => format!("error      {}", message),
        };
        println!("[{:>6} ms] {}", line.at_ms, description);
    }

    println!("\nText: {:?}", outcome.text);
    println!("Engine starts: {}", outcome.engine_starts);

    Ok(())
}
