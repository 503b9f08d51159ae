//! End-to-end pipeline tests: prompt -> plan -> timeline.
//!
//! Each case runs the full public surface the way the CLI does, asserting
//! the scheduling invariants hold for whatever the interpreter produced.

use choreo::{interpret, schedule, ActionKind, ParamValue, Timeline};
use pretty_assertions::assert_eq;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Invariants that hold for every timeline: starts at zero, packs back to
/// back, total equals the last end time.
fn assert_well_formed(timeline: &Timeline) {
    if timeline.is_empty() {
        assert_eq!(timeline.total_duration, 0.0);
        return;
    }
    assert_eq!(timeline.timeline[0].start_time, 0.0);
    for pair in timeline.timeline.windows(2) {
        assert_eq!(pair[1].start_time, pair[0].end_time);
    }
    for action in &timeline.timeline {
        assert!(action.duration >= 0.0);
        assert!(close(action.end_time - action.start_time, action.duration));
    }
    assert_eq!(
        timeline.total_duration,
        timeline.timeline.last().unwrap().end_time
    );
}

fn pipeline(prompt: &str) -> Timeline {
    let timeline = schedule(&interpret(prompt).value);
    assert_well_formed(&timeline);
    timeline
}

#[test]
fn test_reference_scenario() {
    // "wave slowly then jump high": wave at 2.0 * 1.4, jump at default 1.5
    let timeline = pipeline("make the character wave slowly then jump high");

    assert_eq!(timeline.len(), 2);

    let wave = &timeline.timeline[0];
    assert_eq!(wave.kind, ActionKind::Wave);
    assert_eq!(wave.start_time, 0.0);
    assert!(close(wave.end_time, 2.8));
    assert_eq!(
        wave.params.get("duration_mult"),
        Some(&ParamValue::Number(1.4))
    );

    let jump = &timeline.timeline[1];
    assert_eq!(jump.kind, ActionKind::Jump);
    assert!(close(jump.start_time, 2.8));
    assert!(close(jump.end_time, 4.3));
    assert_eq!(jump.params.get("height"), Some(&ParamValue::Number(3.5)));

    assert!(close(timeline.total_duration, 4.3));
}

#[test]
fn test_wave_and_jump_defaults() {
    let timeline = pipeline("wave and jump");
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.timeline[0].kind, ActionKind::Wave);
    assert_eq!(timeline.timeline[1].kind, ActionKind::Jump);
    assert!(close(timeline.total_duration, 3.5));

    // comma + then segments identically
    let with_comma = pipeline("wave, then jump");
    assert_eq!(with_comma, timeline);
}

#[test]
fn test_fallback_prompts_idle_for_two_seconds() {
    for prompt in ["", "xyz no keywords"] {
        let timeline = pipeline(prompt);
        assert_eq!(timeline.len(), 1, "prompt: {prompt:?}");
        assert_eq!(timeline.timeline[0].kind, ActionKind::Idle);
        assert_eq!(timeline.timeline[0].duration, 2.0);
        assert!(timeline.timeline[0].params.is_empty());
    }
}

#[test]
fn test_single_clause_priority() {
    let timeline = pipeline("jump and wave in one move");
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline.timeline[0].kind, ActionKind::Jump);
}

#[test]
fn test_quick_jump_after_sandwich_wave() {
    // "sandwich" must survive clause splitting intact; "quick" scales the jump
    let timeline = pipeline("do a sandwich wave then a quick jump");
    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline.timeline[0].kind, ActionKind::Wave);
    assert_eq!(timeline.timeline[0].duration, 2.0);
    assert_eq!(timeline.timeline[1].kind, ActionKind::Jump);
    assert!(close(timeline.timeline[1].duration, 0.9));
    assert!(close(timeline.total_duration, 2.9));
}

#[test]
fn test_longer_chain_accumulates() {
    let timeline = pipeline("wave, jump high, wave quickly, then jump");
    assert_eq!(timeline.len(), 4);
    // 2.0 + 1.5 + 1.2 + 1.5
    assert!(close(timeline.total_duration, 6.2));
}

#[test]
fn test_interpret_then_schedule_is_repeatable() {
    let prompt = "wave energetically then jump big";
    let first = pipeline(prompt);
    let second = pipeline(prompt);
    assert_eq!(first, second);
}

#[test]
fn test_payload_roundtrip() {
    let timeline = pipeline("wave fast then jump high");
    let json = serde_json::to_string_pretty(&timeline).unwrap();
    let parsed: Timeline = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, timeline);
}
