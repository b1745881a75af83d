use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::classifier::BackgroundPolicy;
use crate::core::distribution::PartitionStrategy;

/// Persistent user settings that are saved between sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Last source folder that was split
    pub last_source_folder: Option<PathBuf>,

    /// Last designer count entered in the UI
    pub last_num_designers: usize,

    /// Selected white-background heuristic
    #[serde(default)]
    pub background_policy: BackgroundPolicy,

    /// Selected cluster partition strategy
    #[serde(default)]
    pub partition_strategy: PartitionStrategy,

    /// Whether the scan descends into subfolders
    #[serde(default)]
    pub recursive_scan: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_source_folder: None,
            last_num_designers: 1,
            background_policy: BackgroundPolicy::default(),
            partition_strategy: PartitionStrategy::default(),
            recursive_scan: false,
        }
    }
}

impl Settings {
    /// Get the path to the settings file (in the same directory as the executable)
    pub fn get_config_path() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|exe_path| exe_path.parent().map(|dir| dir.to_path_buf()))
            .map(|dir| dir.join("settings.json"))
    }

    /// Load settings from disk, or return defaults if file doesn't exist or is corrupted
    pub fn load() -> Self {
        if let Some(config_path) = Self::get_config_path() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_json::from_str::<Settings>(&contents) {
                    Ok(settings) => {
                        info!("Loaded settings from: {:?}", config_path);
                        return settings;
                    }
                    Err(e) => {
                        warn!("Failed to parse settings file: {}. Using defaults.", e);
                    }
                },
                Err(e) => {
                    // It's normal for the file not to exist on first run
                    if e.kind() != std::io::ErrorKind::NotFound {
                        warn!("Failed to read settings file: {}. Using defaults.", e);
                    }
                }
            }
        } else {
            warn!("Could not determine config directory. Using defaults.");
        }

        Self::default()
    }

    /// Save settings to disk
    pub fn save(&self) {
        if let Some(config_path) = Self::get_config_path() {
            match serde_json::to_string_pretty(self) {
                Ok(json) => {
                    if let Err(e) = fs::write(&config_path, json) {
                        warn!("Failed to write settings file: {}", e);
                    } else {
                        info!("Settings saved to: {:?}", config_path);
                    }
                }
                Err(e) => {
                    warn!("Failed to serialize settings: {}", e);
                }
            }
        } else {
            warn!("Could not determine config directory. Settings not saved.");
        }
    }
}
