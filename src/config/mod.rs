// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Every field is optional on disk. Accessors clamp the stored value into
//! the ranges declared in [`defaults`] so a hand-edited file can never push
//! the layout engine or the filters outside their valid domain.
//!
//! # Examples
//!
//! ```no_run
//! use imeditor::config::{self, Config};
//!
//! let mut config = config::load().unwrap_or_default();
//! config.scale_factor = Some(2.0);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::*;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "ImEditor";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "IMEDITOR_CONFIG_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scale_factor: Option<f32>,
    #[serde(default)]
    pub target_fps: Option<u32>,
    #[serde(default)]
    pub window_width: Option<u32>,
    #[serde(default)]
    pub window_height: Option<u32>,
    #[serde(default)]
    pub blur_max_radius: Option<u32>,
    #[serde(default)]
    pub sharpen_max_amount: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale_factor: Some(DEFAULT_SCALE_FACTOR),
            target_fps: Some(DEFAULT_TARGET_FPS),
            window_width: Some(DEFAULT_WINDOW_WIDTH),
            window_height: Some(DEFAULT_WINDOW_HEIGHT),
            blur_max_radius: Some(DEFAULT_BLUR_MAX_RADIUS),
            sharpen_max_amount: Some(DEFAULT_SHARPEN_MAX_AMOUNT),
        }
    }
}

impl Config {
    #[must_use]
    pub fn scale_factor(&self) -> f32 {
        let value = self.scale_factor.unwrap_or(DEFAULT_SCALE_FACTOR);
        if value.is_finite() {
            value.clamp(MIN_SCALE_FACTOR, MAX_SCALE_FACTOR)
        } else {
            DEFAULT_SCALE_FACTOR
        }
    }

    #[must_use]
    pub fn target_fps(&self) -> u32 {
        self.target_fps
            .unwrap_or(DEFAULT_TARGET_FPS)
            .clamp(MIN_TARGET_FPS, MAX_TARGET_FPS)
    }

    /// Window size in logical pixels.
    #[must_use]
    pub fn window_size(&self) -> (u32, u32) {
        (
            self.window_width
                .unwrap_or(DEFAULT_WINDOW_WIDTH)
                .max(MIN_WINDOW_WIDTH),
            self.window_height
                .unwrap_or(DEFAULT_WINDOW_HEIGHT)
                .max(MIN_WINDOW_HEIGHT),
        )
    }

    #[must_use]
    pub fn blur_max_radius(&self) -> u32 {
        self.blur_max_radius
            .unwrap_or(DEFAULT_BLUR_MAX_RADIUS)
            .clamp(MIN_FILTER_MAX, MAX_BLUR_MAX_RADIUS)
    }

    #[must_use]
    pub fn sharpen_max_amount(&self) -> u32 {
        self.sharpen_max_amount
            .unwrap_or(DEFAULT_SHARPEN_MAX_AMOUNT)
            .clamp(MIN_FILTER_MAX, MAX_SHARPEN_MAX_AMOUNT)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    let dir = match std::env::var_os(ENV_CONFIG_DIR) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|path| path.join(APP_NAME)),
    };
    dir.map(|dir| dir.join(CONFIG_FILE))
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            scale_factor: Some(1.5),
            target_fps: Some(60),
            blur_max_radius: Some(30),
            ..Config::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults_when_read() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "target_fps = 30\n").expect("write partial config");

        let loaded = load_from_path(&config_path).expect("load partial config");
        assert_eq!(loaded.target_fps(), 30);
        assert_eq!(loaded.scale_factor(), DEFAULT_SCALE_FACTOR);
        assert_eq!(loaded.blur_max_radius(), DEFAULT_BLUR_MAX_RADIUS);
    }

    #[test]
    fn accessors_clamp_out_of_range_values() {
        let config = Config {
            scale_factor: Some(12.0),
            target_fps: Some(0),
            window_width: Some(10),
            window_height: Some(10),
            blur_max_radius: Some(1000),
            sharpen_max_amount: Some(0),
        };
        assert_eq!(config.scale_factor(), MAX_SCALE_FACTOR);
        assert_eq!(config.target_fps(), MIN_TARGET_FPS);
        assert_eq!(config.window_size(), (MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT));
        assert_eq!(config.blur_max_radius(), MAX_BLUR_MAX_RADIUS);
        assert_eq!(config.sharpen_max_amount(), MIN_FILTER_MAX);
    }

    #[test]
    fn non_finite_scale_factor_uses_default() {
        let config = Config {
            scale_factor: Some(f32::NAN),
            ..Config::default()
        };
        assert_eq!(config.scale_factor(), DEFAULT_SCALE_FACTOR);
    }
}
