//! Configuration module
//!
//! Settings for the demo binary, read from TOML:
//!
//! ```toml
//! [debug]
//! default = false
//! delay_secs = 3
//! debugger = "report"   # rust-gdb, gdb, lldb or report
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::debug::debugger::by_name;
use crate::debug::DebugConfig;

/// Environment variable naming a config file to use instead of the lookup
pub const CONFIG_ENV: &str = "CLAPWRAP_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub debug: DebugSection,
}

/// `[debug]` section: settings of the `--debug` flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugSection {
    /// Whether `--debug` is on by default
    #[serde(default)]
    pub default: bool,

    /// Seconds to wait before starting the debugger
    #[serde(default = "default_delay_secs")]
    pub delay_secs: u64,

    /// Debugger name; resolved automatically when unset
    #[serde(default)]
    pub debugger: Option<String>,
}

impl Default for DebugSection {
    fn default() -> Self {
        Self {
            default: false,
            delay_secs: default_delay_secs(),
            debugger: None,
        }
    }
}

fn default_delay_secs() -> u64 {
    3
}

impl From<&DebugSection> for DebugConfig {
    fn from(section: &DebugSection) -> Self {
        let debugger = section.debugger.as_deref().and_then(|name| {
            let found = by_name(name);
            if found.is_none() {
                warn!(debugger = name, "unknown debugger in config, using default");
            }
            found
        });
        Self {
            default: section.default,
            delay: Duration::from_secs(section.delay_secs),
            debugger,
        }
    }
}

impl Config {
    /// Load config from default locations
    ///
    /// `CLAPWRAP_CONFIG` wins, then a local `.clapwrap/config.toml`, then
    /// the global one. Without any of them the defaults are used.
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }

        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Find local .clapwrap/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(".clapwrap").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Global config path, e.g. `~/.config/clapwrap/config.toml`
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "clapwrap").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Settings for the debug decorator
    pub fn debug_config(&self) -> DebugConfig {
        DebugConfig::from(&self.debug)
    }
}
