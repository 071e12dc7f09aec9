//! Unit tests for voice module.

use std::time::{Duration, Instant};

use super::*;

const CHROME_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
const CHROME_ANDROID: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Mobile Safari/537.36";
const EDGE_DESKTOP: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36 Edg/126.0.0.0";
const SAFARI_IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";
const FIREFOX_DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:127.0) Gecko/20100101 Firefox/127.0";

fn profile(user_agent: &str, supported: bool) -> BrowserProfile {
    BrowserProfile::detect(&HostEnvironment {
        user_agent: user_agent.to_string(),
        locale: "en-IN".to_string(),
        speech_recognition: false,
        webkit_speech_recognition: supported,
    })
}

fn controller(
    profile: BrowserProfile,
    mic: ScriptedMicrophone,
) -> (SessionController, ScriptedEngine) {
    let engine = ScriptedEngine::new();
    let controller = SessionController::new(
        profile,
        "en-IN",
        "auto",
        VoiceTiming::default(),
        Box::new(engine.clone()),
        Box::new(mic),
    );
    (controller, engine)
}

/// Deliver lifecycle events the scripted engine raised
fn pump(controller: &mut SessionController, engine: &ScriptedEngine, now: Instant) {
    for event in engine.drain_pending() {
        controller.handle_engine_event(event, now);
    }
}

fn result(index: usize, results: Vec<RecognitionResult>) -> EngineEvent {
    EngineEvent::Result(ResultBatch::new(index, results))
}

#[test]
fn test_detect_desktop_chrome() {
    let p = profile(CHROME_DESKTOP, true);
    assert!(!p.is_mobile);
    assert_eq!(p.vendor, BrowserVendor::Chrome);
    assert!(p.supports_recognition);
}

#[test]
fn test_detect_vendors() {
    assert_eq!(profile(EDGE_DESKTOP, true).vendor, BrowserVendor::Edge);
    assert_eq!(profile(FIREFOX_DESKTOP, false).vendor, BrowserVendor::Firefox);

    let iphone = profile(SAFARI_IPHONE, true);
    assert_eq!(iphone.vendor, BrowserVendor::Safari);
    assert_eq!(iphone.os, DeviceOs::Ios);
    assert!(iphone.is_mobile);

    let android = profile(CHROME_ANDROID, true);
    assert_eq!(android.os, DeviceOs::Android);
    assert!(android.is_mobile);
}

#[test]
fn test_detect_is_idempotent() {
    let env = HostEnvironment {
        user_agent: CHROME_ANDROID.to_string(),
        locale: "hi-IN".to_string(),
        speech_recognition: true,
        webkit_speech_recognition: false,
    };
    assert_eq!(BrowserProfile::detect(&env), BrowserProfile::detect(&env));
}

#[test]
fn test_optimal_settings_by_device() {
    let timing = VoiceTiming::default();

    let mobile = optimal_settings(&profile(CHROME_ANDROID, true), "en-GB", &timing);
    assert!(!mobile.continuous);
    assert!(!mobile.interim_results);
    assert!(!mobile.auto_restart);
    assert_eq!(mobile.silence_timeout, Duration::from_millis(2000));
    assert_eq!(mobile.default_language, "en-GB");

    let desktop = optimal_settings(&profile(CHROME_DESKTOP, true), "xx-yy", &timing);
    assert!(desktop.continuous);
    assert!(desktop.interim_results);
    assert!(desktop.auto_restart);
    assert_eq!(desktop.silence_timeout, Duration::from_millis(3000));
    assert_eq!(desktop.default_language, DEFAULT_LANGUAGE);
}

#[test]
fn test_speech_support_recommendations() {
    let supported = check_speech_support(&profile(CHROME_DESKTOP, true));
    assert!(supported.is_supported);
    assert!(supported.recommendations.is_empty());

    let firefox = check_speech_support(&profile(FIREFOX_DESKTOP, false));
    assert!(!firefox.is_supported);
    assert_eq!(firefox.message, "Voice input not supported in Firefox");
    assert_eq!(firefox.recommendations.len(), 2);

    let android = check_speech_support(&profile(CHROME_ANDROID, false));
    assert_eq!(android.recommendations.len(), 3);
}

#[test]
fn test_error_codes_map_to_vocabulary() {
    assert_eq!(VoiceError::from_code("not-allowed"), VoiceError::PermissionDenied);
    assert_eq!(VoiceError::from_code("no-speech"), VoiceError::NoSpeechDetected);
    assert_eq!(
        VoiceError::from_code("aborted"),
        VoiceError::Unknown("aborted".to_string())
    );

    let desktop = profile(CHROME_DESKTOP, true);
    let mobile = profile(CHROME_ANDROID, true);
    assert!(!VoiceError::NetworkError.is_terminal(&desktop));
    assert!(VoiceError::NetworkError.is_terminal(&mobile));
    assert!(VoiceError::AudioCaptureUnavailable.is_terminal(&desktop));

    assert_eq!(
        VoiceError::Unknown("aborted".to_string()).user_message(&desktop),
        "Speech recognition error: aborted"
    );
    assert!(
        VoiceError::Unknown("aborted".to_string())
            .user_message(&mobile)
            .starts_with("Voice input failed")
    );
}

#[test]
fn test_start_releases_microphone_and_listens() {
    let mic = ScriptedMicrophone::granted();
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), mic.clone());
    let now = Instant::now();

    assert_eq!(c.start_listening(now), StartOutcome::Started);
    assert_eq!(c.state(), SessionState::Starting);
    assert_eq!(mic.acquired(), 1);
    assert_eq!(mic.released(), 1);

    pump(&mut c, &engine, now);
    assert!(c.is_listening());
    assert_eq!(c.poll_events(), vec![VoiceEvent::Started]);

    let config = &engine.starts()[0];
    assert!(config.continuous);
    assert!(config.interim_results);
    assert_eq!(config.language, "en-IN");
}

#[test]
fn test_permission_denied_never_starts_engine() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::denied());

    assert_eq!(c.start_listening(Instant::now()), StartOutcome::PermissionDenied);
    assert_eq!(engine.start_count(), 0);
    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.last_error(), Some(&VoiceError::PermissionDenied));
    match c.poll_events().as_slice() {
        [VoiceEvent::Error { message }] => assert!(message.starts_with("Microphone permission denied")),
        other => panic!("Expected one error event, got {:?}", other),
    }
}

#[test]
fn test_unsupported_short_circuits() {
    let mic = ScriptedMicrophone::granted();
    let (mut c, engine) = controller(profile(FIREFOX_DESKTOP, false), mic.clone());

    assert_eq!(c.start_listening(Instant::now()), StartOutcome::Unsupported);
    assert_eq!(engine.start_count(), 0);
    assert_eq!(mic.acquired(), 0);
    assert_eq!(
        c.poll_events(),
        vec![VoiceEvent::Error {
            message: "Voice input not supported in Firefox".to_string()
        }]
    );
}

#[test]
fn test_start_while_listening_is_ignored() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.handle_engine_event(result(0, vec![RecognitionResult::final_text("sow wheat")]), now);

    assert_eq!(c.start_listening(now), StartOutcome::AlreadyActive);
    assert_eq!(engine.start_count(), 1);
    assert_eq!(c.transcript().finalized(), "sow wheat");
}

#[test]
fn test_desktop_interim_then_final() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.poll_events();

    c.handle_engine_event(result(0, vec![RecognitionResult::interim("hello")]), now);
    c.handle_engine_event(result(0, vec![RecognitionResult::final_text("hello world")]), now);

    let events = c.poll_events();
    assert_eq!(
        events,
        vec![
            VoiceEvent::Result {
                transcript: "hello".to_string(),
                is_final: false
            },
            VoiceEvent::Result {
                transcript: "hello world".to_string(),
                is_final: true
            },
        ]
    );
    assert_eq!(c.transcript().full(), "hello world");
}

#[test]
fn test_error_stops_and_blocks_restart() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.poll_events();

    c.handle_engine_event(EngineEvent::Error { code: "network".to_string() }, now);
    c.handle_engine_event(EngineEvent::End, now);

    assert_eq!(c.state(), SessionState::Idle);
    assert!(!c.restart_pending());
    assert_eq!(c.next_deadline(), None);
    assert_eq!(c.last_error(), Some(&VoiceError::NetworkError));

    c.tick(now + Duration::from_secs(10));
    assert_eq!(engine.start_count(), 1);
}

#[test]
fn test_mobile_no_speech_error() {
    let (mut c, engine) = controller(profile(CHROME_ANDROID, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.poll_events();

    c.handle_engine_event(EngineEvent::Error { code: "no-speech".to_string() }, now);
    c.handle_engine_event(EngineEvent::End, now);

    assert!(!c.is_listening());
    assert!(!c.restart_pending());
    assert_eq!(
        c.poll_events(),
        vec![VoiceEvent::Error {
            message: "No speech detected. Please speak clearly and close to your device microphone."
                .to_string()
        }]
    );
}

#[test]
fn test_desktop_silent_end_restarts_after_delay() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.poll_events();

    c.handle_engine_event(EngineEvent::End, now);
    assert!(c.restart_pending());
    assert_eq!(c.poll_events(), vec![VoiceEvent::RestartScheduled { attempt: 1 }]);

    c.tick(now + Duration::from_millis(100));
    assert_eq!(engine.start_count(), 1);

    c.tick(now + Duration::from_millis(300));
    assert_eq!(engine.start_count(), 2);
    pump(&mut c, &engine, now + Duration::from_millis(300));
    assert!(c.is_listening());
}

#[test]
fn test_restart_budget_exhausted_reports_error() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let mut now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);

    for _ in 0..3 {
        c.handle_engine_event(EngineEvent::End, now);
        now += Duration::from_millis(300);
        c.tick(now);
        pump(&mut c, &engine, now);
    }
    c.poll_events();
    c.handle_engine_event(EngineEvent::End, now);

    assert!(!c.restart_pending());
    assert_eq!(c.last_error(), Some(&VoiceError::RestartsExhausted(3)));
    assert_eq!(engine.start_count(), 4);
}

#[test]
fn test_failed_restart_is_swallowed() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.handle_engine_event(EngineEvent::End, now);
    c.poll_events();

    engine.fail_next_start("engine torn down");
    c.tick(now + Duration::from_secs(1));

    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.last_error(), None);
    assert_eq!(c.poll_events(), vec![VoiceEvent::Ended]);
}

#[test]
fn test_end_after_final_text_completes() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.handle_engine_event(result(0, vec![RecognitionResult::final_text("irrigate")]), now);
    c.handle_engine_event(EngineEvent::End, now);

    assert!(!c.restart_pending());
    assert_eq!(c.poll_events().last(), Some(&VoiceEvent::Ended));
}

#[test]
fn test_stop_is_graceful_and_does_not_restart() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);

    c.stop_listening();
    assert_eq!(c.state(), SessionState::Stopping);
    pump(&mut c, &engine, now);

    assert_eq!(c.state(), SessionState::Idle);
    assert!(!c.restart_pending());
    assert_eq!(engine.stop_count(), 1);
}

#[test]
fn test_stop_when_idle_is_noop() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    c.stop_listening();
    assert_eq!(engine.stop_count(), 0);
    assert!(c.poll_events().is_empty());
}

#[test]
fn test_stop_cancels_pending_restart() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.handle_engine_event(EngineEvent::End, now);
    assert!(c.restart_pending());

    c.stop_listening();
    c.tick(now + Duration::from_secs(5));
    assert_eq!(engine.start_count(), 1);
}

#[test]
fn test_silence_timeout_forces_stop() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    assert_eq!(c.next_deadline(), Some(now + Duration::from_millis(3000)));

    c.tick(now + Duration::from_millis(3000));
    assert_eq!(engine.stop_count(), 1);
    pump(&mut c, &engine, now + Duration::from_millis(3000));

    assert_eq!(c.state(), SessionState::Idle);
    assert!(!c.restart_pending());
    assert_eq!(c.last_error(), None);
    assert_eq!(c.poll_events().last(), Some(&VoiceEvent::Ended));
}

#[test]
fn test_first_result_clears_silence_timer() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.handle_engine_event(result(0, vec![RecognitionResult::interim("pot")]), now);

    c.tick(now + Duration::from_secs(10));
    assert_eq!(engine.stop_count(), 0);
    assert!(c.is_listening());
}

#[test]
fn test_mobile_autostop_after_final() {
    let (mut c, engine) = controller(profile(CHROME_ANDROID, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    assert!(!engine.starts()[0].continuous);

    c.handle_engine_event(result(0, vec![RecognitionResult::final_text("tomato price")]), now);
    c.tick(now + Duration::from_millis(499));
    assert_eq!(engine.stop_count(), 0);

    c.tick(now + Duration::from_millis(500));
    assert_eq!(engine.stop_count(), 1);
}

#[test]
fn test_mobile_interim_cancels_autostop() {
    let engine = ScriptedEngine::new();
    let config = RecognitionConfig {
        language: "hi-IN".to_string(),
        continuous: false,
        interim_results: true,
    };
    let mut c = SessionController::with_config(
        profile(CHROME_ANDROID, true),
        "hi-IN",
        config,
        VoiceTiming::default(),
        Box::new(engine.clone()),
        Box::new(ScriptedMicrophone::granted()),
    );
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);

    c.handle_engine_event(result(0, vec![RecognitionResult::final_text("gehun")]), now);
    c.handle_engine_event(
        result(1, vec![RecognitionResult::final_text("gehun"), RecognitionResult::interim(" ka")]),
        now,
    );
    c.tick(now + Duration::from_secs(1));
    assert_eq!(engine.stop_count(), 0);
}

#[test]
fn test_teardown_aborts_and_invalidates_timers() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);

    c.teardown();
    assert_eq!(engine.abort_count(), 1);
    assert_eq!(c.next_deadline(), None);
    assert!(!engine.is_running());

    c.tick(now + Duration::from_secs(60));
    assert_eq!(engine.start_count(), 1);
    assert_eq!(engine.stop_count(), 0);
}

#[test]
fn test_drop_aborts_active_session() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    c.start_listening(Instant::now());
    drop(c);
    assert_eq!(engine.abort_count(), 1);
}

#[test]
fn test_change_language_rebuilds_config() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);

    c.change_language("ta-IN");
    assert_eq!(c.state(), SessionState::Idle);
    assert_eq!(c.config().language, "ta-IN");
    assert_eq!(engine.abort_count(), 1);

    c.start_listening(now);
    assert_eq!(engine.starts()[1].language, "ta-IN");
}

#[test]
fn test_voice_button_end_to_end() {
    let (c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let mut button = VoiceButton::new(c);
    let now = Instant::now();

    assert!(button.toggle(now).is_empty());
    let mut events = Vec::new();
    for event in engine.drain_pending() {
        events.extend(button.on_engine_event(event, now));
    }
    events.extend(button.on_engine_event(result(0, vec![RecognitionResult::interim("hello")]), now));
    events.extend(button.on_engine_event(
        result(0, vec![RecognitionResult::final_text("hello world")]),
        now,
    ));

    assert_eq!(
        events,
        vec![
            WidgetEvent::Listening(true),
            WidgetEvent::Interim("hello".to_string()),
            WidgetEvent::Transcript("hello world".to_string()),
        ]
    );
    assert_eq!(button.controller().transcript().full(), "");
    assert_eq!(button.title(), "Stop recording");
}

#[test]
fn test_voice_textarea_appends_with_space() {
    let (c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let mut area = VoiceTextarea::new(c, "Leaves are yellow");
    let now = Instant::now();

    area.toggle(now);
    for event in engine.drain_pending() {
        area.on_engine_event(event, now);
    }
    area.on_engine_event(result(0, vec![RecognitionResult::interim("since")]), now);
    assert_eq!(area.display(), "Leaves are yellow since");
    assert_eq!(area.value(), "Leaves are yellow");
    assert!(!area.set_text("typed"));

    area.on_engine_event(result(0, vec![RecognitionResult::final_text("since monday")]), now);
    assert_eq!(area.value(), "Leaves are yellow since monday");
    assert_eq!(area.display(), area.value());
    assert!(area.set_text("typed"));
}

#[test]
fn test_voice_input_stops_after_first_final() {
    let (c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let mut input = VoiceInput::new(c);
    let now = Instant::now();

    input.toggle(now);
    for event in engine.drain_pending() {
        input.on_engine_event(event, now);
    }
    assert_eq!(input.live_text(), "Click to speak...");

    let events = input.on_engine_event(result(0, vec![RecognitionResult::final_text("onion")]), now);
    assert_eq!(events, vec![WidgetEvent::Transcript("onion".to_string())]);
    assert_eq!(engine.stop_count(), 1);

    let mut tail = Vec::new();
    for event in engine.drain_pending() {
        tail.extend(input.on_engine_event(event, now));
    }
    assert_eq!(tail, vec![WidgetEvent::Listening(false)]);
    assert!(!input.is_listening());
}

#[test]
fn test_button_end_after_committed_text_does_not_restart() {
    let (c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let mut button = VoiceButton::new(c);
    let now = Instant::now();

    button.toggle(now);
    let mut events = Vec::new();
    for event in engine.drain_pending() {
        events.extend(button.on_engine_event(event, now));
    }
    events.extend(button.on_engine_event(
        result(0, vec![RecognitionResult::final_text("hello world")]),
        now,
    ));
    events.extend(button.on_engine_event(EngineEvent::End, now + Duration::from_millis(100)));
    events.extend(button.tick(now + Duration::from_secs(1)));

    assert_eq!(
        events,
        vec![
            WidgetEvent::Listening(true),
            WidgetEvent::Transcript("hello world".to_string()),
            WidgetEvent::Listening(false),
        ]
    );
    assert!(!button.controller().restart_pending());
    assert_eq!(engine.start_count(), 1);
}

#[test]
fn test_committed_text_is_forgotten_on_next_start() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.handle_engine_event(result(0, vec![RecognitionResult::final_text("wheat")]), now);
    c.reset_transcript();
    c.handle_engine_event(EngineEvent::End, now);
    assert!(!c.restart_pending());

    c.start_listening(now);
    pump(&mut c, &engine, now);
    c.handle_engine_event(EngineEvent::End, now);
    assert!(c.restart_pending());
}

#[test]
fn test_mobile_continuous_has_no_silence_window() {
    let engine = ScriptedEngine::new();
    let config = RecognitionConfig {
        language: "hi-IN".to_string(),
        continuous: true,
        interim_results: true,
    };
    let mut c = SessionController::with_config(
        profile(CHROME_ANDROID, true),
        "hi-IN",
        config,
        VoiceTiming::default(),
        Box::new(engine.clone()),
        Box::new(ScriptedMicrophone::granted()),
    );
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);

    assert_eq!(c.next_deadline(), None);
    c.tick(now + Duration::from_secs(10));
    assert_eq!(engine.stop_count(), 0);
    assert!(c.is_listening());
}

#[test]
fn test_autostop_after_user_stop_stops_engine_once() {
    let (mut c, engine) = controller(profile(CHROME_ANDROID, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);

    c.handle_engine_event(result(0, vec![RecognitionResult::final_text("pyaaz")]), now);
    c.stop_listening();
    assert_eq!(c.state(), SessionState::Stopping);

    c.tick(now + Duration::from_secs(1));
    assert_eq!(engine.stop_count(), 1);
}

#[test]
fn test_desktop_no_speech_is_transient_but_ends_session() {
    let (mut c, engine) = controller(profile(CHROME_DESKTOP, true), ScriptedMicrophone::granted());
    let now = Instant::now();
    c.start_listening(now);
    pump(&mut c, &engine, now);

    c.handle_engine_event(EngineEvent::Error { code: "no-speech".to_string() }, now);
    let err = c.last_error().cloned();
    assert_eq!(err, Some(VoiceError::NoSpeechDetected));
    assert!(err.is_some_and(|e| !e.is_terminal(c.profile())));
    assert_eq!(c.state(), SessionState::Idle);
    assert!(!c.restart_pending());
}
