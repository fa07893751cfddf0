//! Platform directories for the store, the global config file and logs.

use crate::error::ApiError;
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Result<ProjectDirs, ApiError> {
    ProjectDirs::from("", "termiweb", "termiweb").ok_or_else(|| {
        ApiError::ConfigError("Could not determine platform directories (HOME not set)".to_string())
    })
}

/// `$XDG_DATA_HOME/termiweb/store`
pub fn default_store_path() -> Result<PathBuf, ApiError> {
    Ok(project_dirs()?.data_dir().join("store"))
}

/// `$XDG_CONFIG_HOME/termiweb/config.toml`, if the platform has a config dir.
pub fn global_config_path() -> Option<PathBuf> {
    project_dirs()
        .ok()
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// State directory for log files; falls back to the data directory on
/// platforms without one.
pub fn state_dir() -> Result<PathBuf, ApiError> {
    let dirs = project_dirs()?;
    Ok(dirs
        .state_dir()
        .map(|dir| dir.to_path_buf())
        .unwrap_or_else(|| dirs.data_dir().to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_store_path_shape() {
        let path = default_store_path().unwrap();
        assert!(path.ends_with("store"));
        assert!(path.to_string_lossy().contains("termiweb"));
    }

    #[test]
    fn test_global_config_path_shape() {
        let path = global_config_path().unwrap();
        assert!(path.ends_with("config.toml"));
    }
}
