//! Tests for the headless scenario runner

use crate::headless_runner::{run_loaded_scenario, run_scenario, ScenarioRunner};
use crate::headless_runtime::HeadlessRunConfig;
use crate::headless_scenario::HeadlessScenario;
use swipekit_widgets::{CellState, SwipeConfig};

fn states(outcome: &crate::RunOutcome) -> Vec<CellState> {
    outcome.report().transitions.iter().map(|t| t.state).collect()
}

const FLING_OPEN_THEN_CLOSE: &str = r#"{
    "steps": [
        {"type": "begin"},
        {"type": "drag", "dx": -30},
        {"type": "drag", "dx": -30},
        {"type": "release"},
        {"type": "wait", "ms": 400},
        {"type": "assert_state", "state": "open"},
        {"type": "assert_offset", "value": -90},
        {"type": "close"},
        {"type": "wait", "ms": 400},
        {"type": "assert_state", "state": "closed"},
        {"type": "assert_offset", "value": 0}
    ]
}"#;

const SLOW_RELEASE: &str = r#"{
    "steps": [
        {"type": "begin"},
        {"type": "drag", "dx": -25},
        {"type": "drag", "dx": -25},
        {"type": "wait", "ms": 600},
        {"type": "release"},
        {"type": "wait", "ms": 400}
    ]
}"#;

#[test]
fn test_fling_open_then_close() {
    let outcome = run_scenario(FLING_OPEN_THEN_CLOSE).unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report());

    let report = outcome.report();
    assert_eq!(report.elapsed_frames, 52);
    assert_eq!(report.elapsed_ms, 832);
    assert_eq!(report.final_state, CellState::Closed);
    assert_eq!(
        states(&outcome),
        vec![
            CellState::Moving,
            CellState::Open,
            CellState::Moving,
            CellState::Closed
        ]
    );
    // The first drag sample arrives after one frame
    assert_eq!(report.transitions[0].frame, 1);
    assert_eq!(report.transitions[0].elapsed_ms, 16);
}

#[test]
fn test_failed_assertion_reports_step() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                {"type": "begin"},
                {"type": "drag", "dx": -10},
                {"type": "release"},
                {"type": "wait", "ms": 400},
                {"type": "assert_state", "state": "open"},
                {"type": "assert_offset", "value": 0}
            ]
        }"#,
    )
    .unwrap();

    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.failed_step_index, Some(4));
    assert_eq!(report.assertion.as_deref(), Some("assert_state"));
    assert_eq!(report.final_state, CellState::Closed);
    assert_eq!(report.final_offset, 0.0);
}

#[test]
fn test_vertical_drag_never_reaches_cell() {
    let scenario = HeadlessScenario::from_json(
        r#"{
            "steps": [
                {"type": "begin"},
                {"type": "drag", "dx": -3, "dy": 20},
                {"type": "drag", "dx": -60},
                {"type": "release"},
                {"type": "assert_state", "state": "closed"},
                {"type": "assert_offset", "value": 0, "tolerance": 0}
            ]
        }"#,
    )
    .unwrap();

    let mut runner = ScenarioRunner::new(&scenario, HeadlessRunConfig::default(), None).unwrap();
    let outcome = runner.run(&scenario.steps).unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report());
    assert!(outcome.report().transitions.is_empty());
    assert_eq!(runner.cell().host().attach_count, 0);
}

#[test]
fn test_rested_pointer_settles_by_position() {
    let outcome = run_scenario(SLOW_RELEASE).unwrap();
    assert_eq!(outcome.report().final_state, CellState::Open);
    assert_eq!(outcome.report().final_offset, -90.0);
}

#[test]
fn test_config_override_wins() {
    let scenario = HeadlessScenario::from_json(SLOW_RELEASE).unwrap();
    let config = SwipeConfig {
        open_threshold: 0.9,
        ..Default::default()
    };
    let outcome =
        run_loaded_scenario(&scenario, HeadlessRunConfig::default(), Some(config)).unwrap();
    assert_eq!(outcome.report().final_state, CellState::Closed);
}

#[test]
fn test_drag_interrupts_settle() {
    let scenario = HeadlessScenario::from_json(
        r#"{
            "steps": [
                {"type": "begin"},
                {"type": "drag", "dx": -30},
                {"type": "drag", "dx": -30},
                {"type": "release"},
                {"type": "tick", "frames": 3},
                {"type": "assert_state", "state": "moving"},
                {"type": "begin"},
                {"type": "drag", "dx": 40},
                {"type": "release"},
                {"type": "wait", "ms": 400},
                {"type": "assert_state", "state": "closed"}
            ]
        }"#,
    )
    .unwrap();

    let mut runner = ScenarioRunner::new(&scenario, HeadlessRunConfig::default(), None).unwrap();
    let outcome = runner.run(&scenario.steps).unwrap();
    assert!(!outcome.is_failed(), "{:?}", outcome.report());
    assert_eq!(states(&outcome), vec![CellState::Moving, CellState::Closed]);
    assert_eq!(runner.cell().host().attach_count, 1);
    assert!(!runner.cell().host().panel_attached);
}

#[test]
fn test_invalid_setup_is_an_error() {
    let bad_config = r#"{"config": {"resistance": 0.0}, "steps": []}"#;
    assert!(run_scenario(bad_config).is_err());

    let scenario = HeadlessScenario::from_json(r#"{"steps": []}"#).unwrap();
    let cfg = HeadlessRunConfig { tick_ms: 0 };
    assert!(run_loaded_scenario(&scenario, cfg, None).is_err());
}
