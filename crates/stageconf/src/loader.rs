//! Config file discovery, loading, and environment variable overlay.

use std::env;
use std::path::{Path, PathBuf};

use crate::{ConfigError, StageConfig};

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local).
/// Only returns files that exist.
pub fn discover_config_files() -> Vec<PathBuf> {
    discover_config_files_with_override(None)
}

/// Discover config files, optionally with a CLI override path.
///
/// If `cli_path` is provided and exists, it replaces the local override.
/// Returns paths in load order (system, user, local/cli).
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc/stagecraft/config.toml");
    if system.exists() {
        files.push(system);
    }

    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join("stagecraft/config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    // CLI override takes precedence over local
    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from("stagecraft.toml");
    if local.exists() {
        files.push(local);
    }

    files
}

/// Load config from a TOML file, overlaying `base`.
pub fn load_from_file(base: StageConfig, path: &Path) -> Result<StageConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_toml(base, &contents, path)
}

/// Overlay config fields present in a TOML string onto `base`.
///
/// Walks the raw table by hand so a partial file only touches the fields
/// it names; everything else keeps the value from earlier sources.
pub(crate) fn parse_toml(
    mut config: StageConfig,
    contents: &str,
    path: &Path,
) -> Result<StageConfig, ConfigError> {
    let table: toml::Table = contents
        .parse()
        .map_err(|e: toml::de::Error| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if let Some(blender) = table.get("blender").and_then(|v| v.as_table()) {
        if let Some(v) = blender.get("executable").and_then(|v| v.as_str()) {
            config.blender.executable = expand_path(v);
        }
        if let Some(v) = blender.get("script").and_then(|v| v.as_str()) {
            config.blender.script = expand_path(v);
        }
        if let Some(v) = blender.get("timeout_secs").and_then(|v| v.as_integer()) {
            config.blender.timeout_secs = v as u64;
        }
        if let Some(v) = blender.get("frame_rate").and_then(|v| v.as_integer()) {
            config.blender.frame_rate = v as u32;
        }
    }

    if let Some(paths) = table.get("paths").and_then(|v| v.as_table()) {
        if let Some(v) = paths.get("output_dir").and_then(|v| v.as_str()) {
            config.paths.output_dir = expand_path(v);
        }
        if let Some(v) = paths.get("timelines_dir").and_then(|v| v.as_str()) {
            config.paths.timelines_dir = expand_path(v);
        }
    }

    if let Some(telemetry) = table.get("telemetry").and_then(|v| v.as_table()) {
        if let Some(v) = telemetry.get("log_level").and_then(|v| v.as_str()) {
            config.telemetry.log_level = v.to_string();
        }
    }

    Ok(config)
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut StageConfig, sources: &mut ConfigSources) {
    if let Ok(v) = env::var("STAGECRAFT_BLENDER") {
        config.blender.executable = expand_path(&v);
        sources.env_overrides.push("STAGECRAFT_BLENDER".to_string());
    }
    if let Ok(v) = env::var("STAGECRAFT_SCRIPT") {
        config.blender.script = expand_path(&v);
        sources.env_overrides.push("STAGECRAFT_SCRIPT".to_string());
    }
    if let Ok(v) = env::var("STAGECRAFT_TIMEOUT_SECS") {
        if let Ok(secs) = v.parse() {
            config.blender.timeout_secs = secs;
            sources
                .env_overrides
                .push("STAGECRAFT_TIMEOUT_SECS".to_string());
        }
    }
    if let Ok(v) = env::var("STAGECRAFT_OUTPUT_DIR") {
        config.paths.output_dir = expand_path(&v);
        sources.env_overrides.push("STAGECRAFT_OUTPUT_DIR".to_string());
    }
    if let Ok(v) = env::var("STAGECRAFT_TIMELINES_DIR") {
        config.paths.timelines_dir = expand_path(&v);
        sources
            .env_overrides
            .push("STAGECRAFT_TIMELINES_DIR".to_string());
    }
    if let Ok(v) = env::var("STAGECRAFT_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("STAGECRAFT_LOG_LEVEL".to_string());
    }
    // Also support RUST_LOG
    if let Ok(v) = env::var("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }
}

/// Expand ~ and environment variables in a path.
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(stripped);
        }
        PathBuf::from(path)
    } else if let Some(stripped) = path.strip_prefix('$') {
        // Handle $VAR/rest/of/path
        if let Some(slash_pos) = stripped.find('/') {
            let var_name = &stripped[..slash_pos];
            if let Ok(var_value) = env::var(var_name) {
                PathBuf::from(var_value).join(&stripped[slash_pos + 1..])
            } else {
                PathBuf::from(path)
            }
        } else {
            env::var(stripped)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(path))
        }
    } else {
        PathBuf::from(path)
    }
}
