//! Bridge tests against a fake engine.
//!
//! A shell script stands in for Blender: it receives the same argv the real
//! engine would and touches the output scene file. Nothing here needs a real
//! Blender install.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use choreo::{interpret, schedule, Timeline};
use stageconf::BlenderConfig;
use stagehand::{bake, BridgeError};

struct FakeEngine {
    dir: tempfile::TempDir,
    config: BlenderConfig,
    model: PathBuf,
}

/// Lay out a fake engine executable, a dummy engine script, and a dummy
/// model inside a temp dir.
fn fake_engine(body: &str) -> FakeEngine {
    let dir = tempfile::tempdir().expect("create temp dir");

    let executable = dir.path().join("fake-blender");
    fs::write(&executable, format!("#!/bin/sh\n{body}\n")).expect("write fake engine");
    fs::set_permissions(&executable, fs::Permissions::from_mode(0o755))
        .expect("mark fake engine executable");

    let script = dir.path().join("apply_animation.py");
    fs::write(&script, "# consumed by the fake engine\n").expect("write engine script");

    let model = dir.path().join("Remy.fbx");
    fs::write(&model, b"not a real model").expect("write model");

    let mut config = BlenderConfig::default();
    config.executable = executable;
    config.script = script;
    config.timeout_secs = 10;

    FakeEngine { dir, config, model }
}

fn sample_timeline() -> Timeline {
    schedule(&interpret("wave slowly then jump high").value)
}

#[tokio::test]
async fn test_bake_writes_payload_and_reports_scene() {
    // argv: -b --python <script> -- <payload> <model> <blend>
    let engine = fake_engine("touch \"$7\"");
    let output = engine.dir.path().join("Remy_animated.blend");
    let timeline = sample_timeline();

    let report = bake(&engine.config, &timeline, &engine.model, &output)
        .await
        .expect("bake should succeed");

    assert_eq!(report.blend_path, output);
    assert!(output.exists(), "fake engine should have touched the scene");

    // the sidecar holds the exact payload the engine consumed
    assert_eq!(report.timeline_path, output.with_extension("json"));
    let payload = fs::read_to_string(&report.timeline_path).unwrap();
    let parsed: Timeline = serde_json::from_str(&payload).unwrap();
    assert_eq!(parsed, timeline);
}

#[tokio::test]
async fn test_bake_creates_output_directory() {
    let engine = fake_engine("touch \"$7\"");
    let output = engine.dir.path().join("outputs/blends/scene.blend");

    bake(&engine.config, &sample_timeline(), &engine.model, &output)
        .await
        .expect("bake should create missing output dirs");

    assert!(output.exists());
}

#[tokio::test]
async fn test_missing_model_is_rejected_before_launch() {
    let engine = fake_engine("touch \"$7\"");
    let output = engine.dir.path().join("out.blend");

    let err = bake(
        &engine.config,
        &sample_timeline(),
        Path::new("no/such/model.fbx"),
        &output,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, BridgeError::ModelNotFound(_)));
    // nothing was written
    assert!(!output.with_extension("json").exists());
}

#[tokio::test]
async fn test_missing_script_is_rejected_before_launch() {
    let mut engine = fake_engine("touch \"$7\"");
    engine.config.script = engine.dir.path().join("nowhere.py");
    let output = engine.dir.path().join("out.blend");

    let err = bake(&engine.config, &sample_timeline(), &engine.model, &output)
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::ScriptNotFound(_)));
}

#[tokio::test]
async fn test_engine_failure_surfaces_stderr() {
    let engine = fake_engine("echo 'ImportError: no armature' >&2\nexit 3");
    let output = engine.dir.path().join("out.blend");

    let err = bake(&engine.config, &sample_timeline(), &engine.model, &output)
        .await
        .unwrap_err();

    match err {
        BridgeError::EngineFailed { status, stderr } => {
            assert_eq!(status, 3);
            assert!(stderr.contains("no armature"));
        }
        other => panic!("expected EngineFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_engine_hits_timeout() {
    let mut engine = fake_engine("sleep 30");
    engine.config.timeout_secs = 1;
    let output = engine.dir.path().join("out.blend");

    let err = bake(&engine.config, &sample_timeline(), &engine.model, &output)
        .await
        .unwrap_err();

    assert!(matches!(err, BridgeError::Timeout(1)));
}
