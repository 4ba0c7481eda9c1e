// Settings persistence: user-wide splitter configuration.
// Uses platform-native config dir: e.g. ~/Library/Application Support/sashbox/settings.json
// on macOS, ~/.config/sashbox/settings.json on Linux.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use sash_input::SplitterSettings;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SashSettings {
    #[serde(default)]
    pub splitter: SplitterSettings,
}

fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("sashbox").join("settings.json"))
}

pub fn load_settings() -> SashSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => SashSettings::default(),
    }
}

/// Missing files give defaults; unparsable ones are logged and give defaults.
pub fn load_settings_from(path: &Path) -> SashSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                SashSettings::default()
            }
        },
        Err(_) => SashSettings::default(),
    }
}

pub fn save_settings_to(settings: &SashSettings, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}
