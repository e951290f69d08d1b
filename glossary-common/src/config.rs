//! Configuration loading and root folder resolution
//!
//! The root folder holds the SQLite database file. Resolution priority:
//! 1. Command-line argument
//! 2. Environment variable
//! 3. `root_folder` key in the TOML config file
//! 4. OS-dependent default data directory

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "GLOSSARY_ROOT_FOLDER";

/// Database file name inside the root folder
const DB_FILE_NAME: &str = "glossary.db";

/// Resolve the root folder following the priority order above
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        return PathBuf::from(path);
    }

    if let Ok(config_path) = find_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    default_root_folder()
}

/// Path of the database file inside the root folder
pub fn db_path(root_folder: &Path) -> PathBuf {
    root_folder.join(DB_FILE_NAME)
}

/// Locate the platform config file, if any
fn find_config_file() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("glossary").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/glossary/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("glossary"))
        .unwrap_or_else(|| PathBuf::from("./glossary_data"))
}
