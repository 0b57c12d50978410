//! Configuration file support for ntrflash.
//!
//! Configuration is loaded from multiple sources with the following
//! priority (highest first):
//! 1. Command-line arguments
//! 2. Environment variables (NTRFLASH_*)
//! 3. Local config file (./ntrflash.toml)
//! 4. Global config file (~/.config/ntrflash/config.toml)

use directories::ProjectDirs;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Cart defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    /// Default cart family (dsone, dsonei, r4isdhc-hk).
    pub family: Option<String>,
    /// Default image file backing the emulated cart.
    pub image: Option<PathBuf>,
    /// Polling budget for erase/program verification loops.
    pub poll_attempts: Option<u32>,
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Cart defaults.
    #[serde(default)]
    pub cart: CartConfig,
}

impl Config {
    /// Load configuration from all available sources.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global_config) = Self::load_from_file(&global_path) {
                debug!("Loaded global config from {}", global_path.display());
                config.merge(global_config);
            }
        }

        if let Some(local_config) = Self::load_from_file(Path::new("ntrflash.toml")) {
            debug!("Loaded local config from ntrflash.toml");
            config.merge(local_config);
        }

        config
    }

    /// Load configuration from a specific file path (--config flag).
    pub fn load_from_path(path: &Path) -> Self {
        if let Some(config) = Self::load_from_file(path) {
            debug!("Loaded config from {}", path.display());
            config
        } else {
            warn!(
                "Could not load config from {}, using defaults",
                path.display()
            );
            Self::default()
        }
    }

    fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    warn!("Failed to parse TOML config {}: {e}", path.display());
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read config {}: {e}", path.display());
                None
            }
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "ntrflash")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn merge(&mut self, other: Self) {
        if other.cart.family.is_some() {
            self.cart.family = other.cart.family;
        }
        if other.cart.image.is_some() {
            self.cart.image = other.cart.image;
        }
        if other.cart.poll_attempts.is_some() {
            self.cart.poll_attempts = other.cart.poll_attempts;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_later_source() {
        let mut base = Config::default();
        base.cart.family = Some("dsone".into());

        let mut local = Config::default();
        local.cart.family = Some("r4isdhc-hk".into());
        local.cart.poll_attempts = Some(1000);

        base.merge(local);
        assert_eq!(base.cart.family.as_deref(), Some("r4isdhc-hk"));
        assert_eq!(base.cart.poll_attempts, Some(1000));
    }

    #[test]
    fn parse_minimal_config() {
        let config: Config = toml::from_str(
            r#"
            [cart]
            family = "dsonei"
            poll_attempts = 4096
            "#,
        )
        .unwrap();
        assert_eq!(config.cart.family.as_deref(), Some("dsonei"));
        assert_eq!(config.cart.poll_attempts, Some(4096));
        assert!(config.cart.image.is_none());
    }
}
