//! Configuration loading and data folder resolution

use crate::Result;
use std::path::{Path, PathBuf};

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. `VIVAPLAN_DATA` environment variable
/// 3. TOML config file (`data_folder` key)
/// 4. OS-dependent default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var("VIVAPLAN_DATA") {
        return PathBuf::from(path);
    }

    // Priority 3: TOML config file
    if let Some(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent default
    default_data_folder()
}

/// Locate the configuration file for the platform, if one exists
fn find_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("vivaplan").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/vivaplan/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("vivaplan"))
        .unwrap_or_else(|| PathBuf::from("./vivaplan_data"))
}

/// Ensure the data folder exists and return the database file path inside it
pub fn database_path(data_folder: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(data_folder)?;
    Ok(data_folder.join("vivaplan.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_takes_priority() {
        let folder = resolve_data_folder(Some("/tmp/vivaplan-cli"));
        assert_eq!(folder, PathBuf::from("/tmp/vivaplan-cli"));
    }

    #[test]
    fn database_path_creates_folder() {
        let dir = tempfile::tempdir().unwrap();
        let data_folder = dir.path().join("nested").join("data");

        let db_path = database_path(&data_folder).unwrap();

        assert!(data_folder.exists());
        assert_eq!(db_path, data_folder.join("vivaplan.db"));
    }
}
