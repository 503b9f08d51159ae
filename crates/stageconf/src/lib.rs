//! Configuration loading for Stagecraft.
//!
//! Everything here is boundary configuration: where Blender lives, where
//! artifacts go, how loud the logs are. The animation vocabulary itself
//! (keyword tables, per-kind default durations) is fixed behavior in the
//! `choreo` crate and deliberately not configurable.
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/stagecraft/config.toml` (system)
//! 2. `~/.config/stagecraft/config.toml` (user)
//! 3. `./stagecraft.toml` (local override, or the `--config` path)
//! 4. Environment variables (`STAGECRAFT_*`, `RUST_LOG`)
//!
//! # Example Config
//!
//! ```toml
//! [blender]
//! executable = "/opt/blender/blender"
//! script = "scripts/apply_animation.py"
//! timeout_secs = 300
//! frame_rate = 24
//!
//! [paths]
//! output_dir = "outputs/blends"
//! timelines_dir = "outputs/timelines"
//!
//! [telemetry]
//! log_level = "info"
//! ```

pub mod loader;
pub mod settings;

pub use loader::{discover_config_files_with_override, expand_path, ConfigSources};
pub use settings::{BlenderConfig, PathsConfig, TelemetryConfig};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Complete Stagecraft configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StageConfig {
    #[serde(default)]
    pub blender: BlenderConfig,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl StageConfig {
    /// Load configuration from all standard sources.
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration with a CLI-provided file taking the place of the
    /// local override.
    pub fn load_from(config_path: Option<&std::path::Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and report where each layer came from.
    pub fn load_with_sources_from(
        config_path: Option<&std::path::Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        let mut sources = ConfigSources::default();
        let mut config = StageConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            config = loader::load_from_file(config, &path)?;
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources);

        Ok((config, sources))
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Build TOML manually for nicer formatting
        let mut output = String::new();

        output.push_str("# Stagecraft Configuration\n\n");

        output.push_str("[blender]\n");
        output.push_str(&format!(
            "executable = \"{}\"\n",
            self.blender.executable.display()
        ));
        output.push_str(&format!("script = \"{}\"\n", self.blender.script.display()));
        output.push_str(&format!("timeout_secs = {}\n", self.blender.timeout_secs));
        output.push_str(&format!("frame_rate = {}\n", self.blender.frame_rate));

        output.push_str("\n[paths]\n");
        output.push_str(&format!(
            "output_dir = \"{}\"\n",
            self.paths.output_dir.display()
        ));
        output.push_str(&format!(
            "timelines_dir = \"{}\"\n",
            self.paths.timelines_dir.display()
        ));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!("log_level = \"{}\"\n", self.telemetry.log_level));

        output
    }
}
