// src/discovery.rs - Locating a user configuration file

use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_NAME: &str = "leafwind.toml";

pub fn get_config_dir() -> PathBuf {
    let config_home = dirs::config_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".config")
    });
    config_home.join("leafwind")
}

/// Candidate locations, highest priority first
pub fn config_candidates(working_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![
        working_dir.join(LOCAL_CONFIG_NAME),
        get_config_dir().join("theme.toml"),
    ];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".leafwind").join("theme.toml"));
    }
    paths
}

pub fn find_config_file() -> Option<PathBuf> {
    find_config_file_in(Path::new("."))
}

pub fn find_config_file_in(working_dir: &Path) -> Option<PathBuf> {
    config_candidates(working_dir)
        .into_iter()
        .find(|p| p.is_file())
}
