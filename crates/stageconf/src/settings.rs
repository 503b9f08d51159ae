//! Configuration sections - all fixed for the lifetime of an invocation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The external rendering engine and how to drive it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlenderConfig {
    /// Blender executable. A bare name is resolved via PATH.
    /// Default: blender
    #[serde(default = "BlenderConfig::default_executable")]
    pub executable: PathBuf,

    /// Engine-side entry point passed to `--python`.
    /// Default: scripts/apply_animation.py
    #[serde(default = "BlenderConfig::default_script")]
    pub script: PathBuf,

    /// Kill the engine process after this many seconds.
    /// Default: 600
    #[serde(default = "BlenderConfig::default_timeout_secs")]
    pub timeout_secs: u64,

    /// Scene frame rate the engine bakes at.
    /// Default: 24
    #[serde(default = "BlenderConfig::default_frame_rate")]
    pub frame_rate: u32,
}

impl BlenderConfig {
    fn default_executable() -> PathBuf {
        PathBuf::from("blender")
    }

    fn default_script() -> PathBuf {
        PathBuf::from("scripts/apply_animation.py")
    }

    fn default_timeout_secs() -> u64 {
        600
    }

    fn default_frame_rate() -> u32 {
        24
    }
}

impl Default for BlenderConfig {
    fn default() -> Self {
        Self {
            executable: Self::default_executable(),
            script: Self::default_script(),
            timeout_secs: Self::default_timeout_secs(),
            frame_rate: Self::default_frame_rate(),
        }
    }
}

/// Output locations for baked artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for saved .blend scenes.
    /// Default: outputs/blends
    #[serde(default = "PathsConfig::default_output_dir")]
    pub output_dir: PathBuf,

    /// Directory for timeline payload JSON files.
    /// Default: outputs/timelines
    #[serde(default = "PathsConfig::default_timelines_dir")]
    pub timelines_dir: PathBuf,
}

impl PathsConfig {
    fn default_output_dir() -> PathBuf {
        PathBuf::from("outputs/blends")
    }

    fn default_timelines_dir() -> PathBuf {
        PathBuf::from("outputs/timelines")
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
            timelines_dir: Self::default_timelines_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level / filter directive (trace, debug, info, warn, error).
    /// Default: info
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
