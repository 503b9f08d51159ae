//! Launching the engine and collecting the result.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use choreo::Timeline;
use stageconf::BlenderConfig;
use thiserror::Error;
use tokio::process::Command;

/// Bridge failures, all at the process boundary - nothing in here is a
/// scheduling concern.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("model not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("engine script not found: {0}")]
    ScriptNotFound(PathBuf),

    #[error("failed to encode timeline payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write timeline payload {path}: {source}")]
    PayloadWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to launch engine {executable}: {source}")]
    Spawn {
        executable: PathBuf,
        source: std::io::Error,
    },

    #[error("failed while waiting for the engine: {0}")]
    Wait(std::io::Error),

    #[error("engine did not finish within {0} seconds")]
    Timeout(u64),

    #[error("engine exited with {status}: {stderr}")]
    EngineFailed { status: i32, stderr: String },
}

/// What a successful bake produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BakeReport {
    /// The saved scene file.
    pub blend_path: PathBuf,
    /// The payload sidecar the engine consumed.
    pub timeline_path: PathBuf,
    /// Wall-clock time the engine ran for.
    pub elapsed: Duration,
}

/// Bake a timeline onto a model and save the scene.
///
/// Writes the payload JSON next to `output` (same name, `.json`), then runs
/// `executable -b --python <script> -- <payload> <model> <output>` and waits
/// for it, killing the child if the configured timeout expires. The engine's
/// scene output is never inspected beyond the exit status.
pub async fn bake(
    blender: &BlenderConfig,
    timeline: &Timeline,
    model: &Path,
    output: &Path,
) -> Result<BakeReport, BridgeError> {
    if !model.exists() {
        return Err(BridgeError::ModelNotFound(model.to_path_buf()));
    }

    let script = resolve_script(&blender.script)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| BridgeError::PayloadWrite {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let sidecar = output.with_extension("json");
    let payload = serde_json::to_string_pretty(timeline)?;
    std::fs::write(&sidecar, payload).map_err(|source| BridgeError::PayloadWrite {
        path: sidecar.clone(),
        source,
    })?;

    tracing::info!(
        executable = %blender.executable.display(),
        model = %model.display(),
        actions = timeline.len(),
        total_duration = timeline.total_duration,
        "launching headless engine"
    );
    tracing::debug!(
        script = %script.display(),
        payload = %sidecar.display(),
        output = %output.display(),
        "engine argv assembled"
    );

    let mut command = Command::new(&blender.executable);
    command
        .arg("-b")
        .arg("--python")
        .arg(&script)
        .arg("--")
        .arg(&sidecar)
        .arg(model)
        .arg(output)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let started = Instant::now();
    let child = command.spawn().map_err(|source| BridgeError::Spawn {
        executable: blender.executable.clone(),
        source,
    })?;

    let result = tokio::time::timeout(
        Duration::from_secs(blender.timeout_secs),
        child.wait_with_output(),
    )
    .await;

    let engine_output = match result {
        // timeout elapsed; kill_on_drop reaps the child
        Err(_) => return Err(BridgeError::Timeout(blender.timeout_secs)),
        Ok(Err(source)) => return Err(BridgeError::Wait(source)),
        Ok(Ok(engine_output)) => engine_output,
    };

    tracing::debug!(
        "engine stdout:\n{}",
        String::from_utf8_lossy(&engine_output.stdout)
    );

    if !engine_output.status.success() {
        return Err(BridgeError::EngineFailed {
            status: engine_output.status.code().unwrap_or(-1),
            stderr: tail(&String::from_utf8_lossy(&engine_output.stderr)),
        });
    }

    let elapsed = started.elapsed();
    tracing::info!(
        blend = %output.display(),
        elapsed_secs = elapsed.as_secs_f64(),
        "engine saved scene"
    );

    Ok(BakeReport {
        blend_path: output.to_path_buf(),
        timeline_path: sidecar,
        elapsed,
    })
}

/// Resolve the engine-side script to an absolute path, relative paths
/// against the current directory, and require that it exists - a missing
/// script otherwise surfaces as an opaque engine error.
fn resolve_script(script: &Path) -> Result<PathBuf, BridgeError> {
    let resolved = if script.is_absolute() {
        script.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(script))
            .unwrap_or_else(|_| script.to_path_buf())
    };

    if !resolved.exists() {
        return Err(BridgeError::ScriptNotFound(resolved));
    }
    Ok(resolved)
}

/// Last few lines of engine stderr, enough to see the actual failure
/// without replaying the whole import log.
fn tail(stderr: &str) -> String {
    const MAX_LINES: usize = 20;
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(MAX_LINES);
    lines[start..].join("\n")
}
