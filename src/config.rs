use anyhow::Result;
use serde::{Deserialize, Serialize};
use slotgrid_core::DEFAULT_NOTIFICATION_DURATION;
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/slotgrid.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HostConfig {
    /// Directory backing the inventory key-value store.
    pub save_dir: PathBuf,
    /// Initial viewport width in pixels.
    pub viewport_width: u32,
    /// Notification display time in seconds.
    pub notification_secs: f32,
    /// Apply the stock layout when nothing has been saved yet.
    pub sample_fill: bool,
    /// JSON item catalog replacing the built-in items.
    pub catalog_path: Option<PathBuf>,
    /// Seed for debug fills; entropy when unset.
    pub seed: Option<u64>,
    /// JSON-lines file receiving every presenter call.
    pub event_log: Option<PathBuf>,
    /// Action name -> key names.
    pub bindings: HashMap<String, Vec<String>>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from("saves"),
            viewport_width: 1024,
            notification_secs: 2.0,
            sample_fill: true,
            catalog_path: None,
            seed: None,
            event_log: None,
            bindings: HashMap::new(),
        }
    }
}

impl HostConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<HostConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    HostConfig::default()
                }
            },
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound
                    && path == Path::new(DEFAULT_CONFIG_PATH)
                {
                    tracing::debug!("No host config at {}. Using defaults", path.display());
                } else {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                HostConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    /// Notification duration, with negative values treated as zero.
    ///
    /// Values that do not fit a `Duration` fall back to the default duration.
    pub fn notification_duration(&self) -> Duration {
        if self.notification_secs <= 0.0 {
            return Duration::ZERO;
        }
        match Duration::try_from_secs_f32(self.notification_secs) {
            Ok(duration) => duration,
            Err(err) => {
                warn!(
                    "notification_secs = {} is out of range ({err}). Using default",
                    self.notification_secs
                );
                DEFAULT_NOTIFICATION_DURATION
            }
        }
    }
}
