//! Storage Layer
//!
//! Resolves where configuration and lexicon data files live.

use anyhow::Result;
use std::path::PathBuf;

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "hanzireader", "HanziReader")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
}

/// Get the application data directory
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = project_dirs()?.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Path of `name` inside the data directory, if one can be determined
pub fn default_data_file(name: &str) -> Option<PathBuf> {
    get_data_dir().ok().map(|dir| dir.join(name))
}
