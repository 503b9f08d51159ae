//! Headless Blender bridge.
//!
//! The core pipeline ends at a [`choreo::Timeline`]; this crate hands that
//! payload to the external rendering engine: it writes the timeline JSON
//! sidecar, spawns Blender in background mode with the engine-side script,
//! and reports what got saved. The engine's keyframing internals are its
//! own business - the bridge only owns transport and process lifecycle.

pub mod bake;

pub use bake::{bake, BakeReport, BridgeError};

use std::path::Path;

/// Default scene name for a model: `<stem>_animated.blend`, with spaces
/// flattened so the name survives shell quoting elsewhere.
pub fn default_blend_name(model: &Path) -> String {
    let stem = model
        .file_stem()
        .map(|s| s.to_string_lossy().replace(' ', "_"))
        .unwrap_or_else(|| "scene".to_string());
    format!("{stem}_animated.blend")
}
