use std::path::Path;

use tracing::debug;

use super::env_overrides::{apply_env_overrides, EnvSource, StdEnvSource};
use super::TriggerConfig;
use crate::error::ConfigError;

/// Raw (unprefixed) variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SYNTHEA_TRIGGER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "./synthea-trigger.toml";

/// Load configuration from the process environment and working directory.
pub fn load_config() -> Result<TriggerConfig, ConfigError> {
    load_config_from(&StdEnvSource, Path::new(DEFAULT_CONFIG_FILE))
}

/// Load configuration against an arbitrary environment and fallback file.
///
/// An explicit `SYNTHEA_TRIGGER_CONFIG` path must exist; the fallback file is
/// only read when present.
pub fn load_config_from<E: EnvSource + ?Sized>(
    env: &E,
    fallback_file: &Path,
) -> Result<TriggerConfig, ConfigError> {
    let mut config = match env.get_raw(CONFIG_PATH_ENV) {
        Some(path) if !path.trim().is_empty() => read_file(Path::new(path.trim()))?,
        _ if fallback_file.exists() => read_file(fallback_file)?,
        _ => TriggerConfig::default(),
    };

    apply_env_overrides(&mut config, env)?;
    config.validate()?;
    Ok(config)
}

fn read_file(path: &Path) -> Result<TriggerConfig, ConfigError> {
    debug!(path = %path.display(), "loading trigger config file");
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    TriggerConfig::from_toml_str(&content, &path.display().to_string())
}
