//! Session settings for the host. Later layers win: built-in defaults, then
//! `SNAKE_*` environment variables, then a JSON file, then command-line flags.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use snake_core::SessionConfig;

use crate::util::parse_seed;

pub const ENV_DISPLAY_WIDTH: &str = "SNAKE_DISPLAY_WIDTH";
pub const ENV_DISPLAY_HEIGHT: &str = "SNAKE_DISPLAY_HEIGHT";
pub const ENV_STATUS_BAR_HEIGHT: &str = "SNAKE_STATUS_BAR_HEIGHT";
pub const ENV_TICK_MS: &str = "SNAKE_TICK_MS";
pub const ENV_BONUS_MS: &str = "SNAKE_BONUS_MS";
pub const ENV_START_LENGTH: &str = "SNAKE_START_LENGTH";
pub const ENV_SEED: &str = "SNAKE_SEED";

/// Values given on the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfigOverrides {
    pub seed: Option<u32>,
}

pub fn session_config_from_env() -> SessionConfig {
    let defaults = SessionConfig::default();
    SessionConfig {
        display_width: read_env_i32(ENV_DISPLAY_WIDTH, defaults.display_width),
        display_height: read_env_i32(ENV_DISPLAY_HEIGHT, defaults.display_height),
        status_bar_height: read_env_i32_allow_zero(
            ENV_STATUS_BAR_HEIGHT,
            defaults.status_bar_height,
        ),
        tick_interval_ms: read_env_u32(ENV_TICK_MS, defaults.tick_interval_ms),
        bonus_interval_ms: read_env_u32(ENV_BONUS_MS, defaults.bonus_interval_ms),
        start_length: read_env_usize(ENV_START_LENGTH, defaults.start_length),
        seed: read_env_seed(ENV_SEED, defaults.seed),
    }
}

/// Merge the fields present in a JSON object file over `base`.
pub fn apply_config_file(base: SessionConfig, path: &Path) -> Result<SessionConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading config file {}", path.display()))?;
    let file: serde_json::Value = serde_json::from_str(&data)
        .with_context(|| format!("invalid JSON in config file {}", path.display()))?;
    let fields = file
        .as_object()
        .ok_or_else(|| anyhow!("config file {} must hold a JSON object", path.display()))?;

    let mut merged = serde_json::to_value(base)?;
    let known = merged
        .as_object_mut()
        .ok_or_else(|| anyhow!("session config did not serialize to an object"))?;
    for (key, value) in fields {
        if !known.contains_key(key) {
            tracing::warn!(%key, path = %path.display(), "ignoring unknown config key");
            continue;
        }
        known.insert(key.clone(), value.clone());
    }

    serde_json::from_value(merged)
        .with_context(|| format!("config file {} has invalid values", path.display()))
}

pub fn load_session_config(
    file: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<SessionConfig> {
    let mut config = session_config_from_env();
    if let Some(path) = file {
        config = apply_config_file(config, path)?;
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }

    config
        .validate()
        .context("invalid session configuration")?;
    Ok(config)
}

pub fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub fn read_env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub fn read_env_i32(name: &str, default: i32) -> i32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub fn read_env_i32_allow_zero(name: &str, default: i32) -> i32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<i32>().ok())
        .filter(|value| *value >= 0)
        .unwrap_or(default)
}

/// Hex or decimal, like `--seed`.
pub fn read_env_seed(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| parse_seed(&value).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn unset_or_garbage_env_falls_back_to_defaults() {
        assert_eq!(read_env_u32("SNAKE_TEST_UNSET_U32", 7), 7);
        assert_eq!(read_env_i32("SNAKE_TEST_UNSET_I32", -3), -3);
        assert_eq!(read_env_seed("SNAKE_TEST_UNSET_SEED", 9), 9);
    }

    #[test]
    fn file_fields_layer_over_the_base() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"tick_interval_ms": 50, "seed": 12, "colour": "green"}}"#).unwrap();

        let base = SessionConfig::default().with_seed(99);
        let merged = apply_config_file(base, file.path()).unwrap();
        assert_eq!(merged.tick_interval_ms, 50);
        assert_eq!(merged.seed, 12);
        assert_eq!(merged.bonus_interval_ms, base.bonus_interval_ms);
        assert_eq!(merged.display_width, base.display_width);
    }

    #[test]
    fn non_object_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        let err = apply_config_file(SessionConfig::default(), file.path()).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }

    #[test]
    fn invalid_layered_config_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"display_width": 20}}"#).unwrap();
        let err = load_session_config(Some(file.path()), ConfigOverrides::default()).unwrap_err();
        assert!(err.to_string().contains("invalid session configuration"));
    }

    #[test]
    fn seed_flag_wins_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"seed": 12}}"#).unwrap();
        let config =
            load_session_config(Some(file.path()), ConfigOverrides { seed: Some(77) }).unwrap();
        assert_eq!(config.seed, 77);
    }
}
