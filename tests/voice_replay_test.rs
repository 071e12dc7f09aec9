//! End-to-end voice sessions driven through the replay driver

use farmhand::voice::replay::{self, ReplayLine, ReplayScript};
use farmhand::voice::{VoiceTiming, WidgetEvent};

const CHROME_ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Mobile Safari/537.36";

fn run(json: &str) -> replay::ReplayOutcome {
    let script: ReplayScript = serde_json::from_str(json).expect("valid script");
    replay::run(&script, VoiceTiming::default(), "auto")
}

fn events(lines: &[ReplayLine]) -> Vec<(u64, WidgetEvent)> {
    lines.iter().map(|l| (l.at_ms, l.event.clone())).collect()
}

#[test]
fn test_mobile_no_speech_does_not_restart() {
    let outcome = run(&format!(
        r#"{{
            "user_agent": "{}",
            "locale": "hi-IN",
            "steps": [
                {{"at_ms": 0, "action": {{"kind": "toggle"}}}},
                {{"at_ms": 1500, "action": {{"kind": "engine", "event": {{"type": "error", "code": "no-speech"}}}}}},
                {{"at_ms": 1510, "action": {{"kind": "engine", "event": {{"type": "end"}}}}}}
            ]
        }}"#,
        CHROME_ANDROID
    ));

    assert!(outcome.profile.is_mobile);
    assert_eq!(outcome.language, "hi-IN");
    assert_eq!(outcome.engine_starts, 1);
    assert_eq!(
        events(&outcome.lines),
        vec![
            (0, WidgetEvent::Listening(true)),
            (
                1500,
                WidgetEvent::Error(
                    "No speech detected. Please speak clearly and close to your device microphone."
                        .to_string()
                )
            ),
            (1500, WidgetEvent::Listening(false)),
        ]
    );
}

#[test]
fn test_desktop_silent_end_restarts_then_silence_stops() {
    let outcome = run(
        r#"{
            "steps": [
                {"at_ms": 0, "action": {"kind": "toggle"}},
                {"at_ms": 1000, "action": {"kind": "engine", "event": {"type": "end"}}}
            ]
        }"#,
    );

    assert!(!outcome.profile.is_mobile);
    assert_eq!(outcome.engine_starts, 2);
    assert_eq!(
        events(&outcome.lines),
        vec![
            (0, WidgetEvent::Listening(true)),
            (1300, WidgetEvent::Listening(true)),
            (4300, WidgetEvent::Listening(false)),
        ]
    );
}

#[test]
fn test_textarea_appends_and_guards_typing() {
    let outcome = run(
        r#"{
            "widget": "textarea",
            "initial_text": "Sow wheat",
            "steps": [
                {"at_ms": 0, "action": {"kind": "toggle"}},
                {"at_ms": 100, "action": {"kind": "engine", "event":
                    {"type": "result", "result_index": 0, "results": [{"transcript": "in", "is_final": false}]}}},
                {"at_ms": 150, "action": {"kind": "set_text", "text": "typed over"}},
                {"at_ms": 400, "action": {"kind": "engine", "event":
                    {"type": "result", "result_index": 0, "results": [{"transcript": "in November", "is_final": true}]}}},
                {"at_ms": 600, "action": {"kind": "toggle"}}
            ]
        }"#,
    );

    assert_eq!(outcome.text, "Sow wheat in November");
    assert!(
        outcome
            .lines
            .iter()
            .any(|l| l.event == WidgetEvent::Transcript("in November".to_string()))
    );
}

#[test]
fn test_input_stops_after_first_final() {
    let outcome = run(
        r#"{
            "widget": "input",
            "steps": [
                {"at_ms": 0, "action": {"kind": "toggle"}},
                {"at_ms": 100, "action": {"kind": "engine", "event":
                    {"type": "result", "result_index": 0, "results": [{"transcript": "tomato", "is_final": false}]}}},
                {"at_ms": 500, "action": {"kind": "engine", "event":
                    {"type": "result", "result_index": 0, "results": [{"transcript": "tomato price", "is_final": true}]}}}
            ]
        }"#,
    );

    assert_eq!(outcome.text, "tomato price");
    assert_eq!(outcome.engine_starts, 1);
    assert_eq!(
        events(&outcome.lines),
        vec![
            (0, WidgetEvent::Listening(true)),
            (100, WidgetEvent::Interim("tomato".to_string())),
            (500, WidgetEvent::Transcript("tomato price".to_string())),
            (500, WidgetEvent::Listening(false)),
        ]
    );
}

#[test]
fn test_engine_refusing_to_start() {
    let outcome = run(
        r#"{
            "steps": [
                {"at_ms": 0, "action": {"kind": "fail_next_start", "reason": "audio busy"}},
                {"at_ms": 10, "action": {"kind": "toggle"}}
            ]
        }"#,
    );

    assert_eq!(outcome.engine_starts, 0);
    assert_eq!(
        events(&outcome.lines),
        vec![
            (
                10,
                WidgetEvent::Error(
                    "Speech recognition error: recognition engine unavailable: audio busy"
                        .to_string()
                )
            ),
            (10, WidgetEvent::Listening(false)),
        ]
    );
}

#[test]
fn test_unsupported_browser() {
    let outcome = run(
        r#"{
            "engine_available": false,
            "steps": [{"at_ms": 0, "action": {"kind": "toggle"}}]
        }"#,
    );
    assert!(!outcome.profile.supports_recognition);
    assert_eq!(outcome.engine_starts, 0);
    assert!(matches!(
        outcome.lines.first().map(|l| &l.event),
        Some(WidgetEvent::Error(message)) if message.starts_with("Voice input not supported in")
    ));
}
