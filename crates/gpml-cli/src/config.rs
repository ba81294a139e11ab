//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use gpml::{GpmlError, config::ConverterConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for GpmlError {
    fn from(err: ConfigError) -> Self {
        GpmlError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (gpml/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or holds invalid values
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<ConverterConfig, GpmlError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("gpml/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "gpml", "gpml") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(ConverterConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - The indent width is out of range
fn load_config_file(path: impl AsRef<Path>) -> Result<ConverterConfig, GpmlError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: ConverterConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if config.indent() > MAX_INDENT {
        return Err(ConfigError::Validation(format!(
            "indent must be at most {MAX_INDENT}, got {}",
            config.indent()
        ))
        .into());
    }

    Ok(config)
}

const MAX_INDENT: usize = 16;

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    use gpml::GpmlVersion;

    #[test]
    fn test_explicit_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "output_version = \"legacy\"\nindent = 4\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.output_version(), GpmlVersion::Legacy);
        assert_eq!(config.indent(), 4);
    }

    #[test]
    fn test_missing_explicit_config() {
        let temp_dir = tempdir().unwrap();
        let err = load_config(Some(temp_dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, GpmlError::Config(ref msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        fs::write(&path, "output_version = \"gpml1999\"\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, GpmlError::Config(ref msg) if msg.starts_with("Failed to parse")));

        fs::write(&path, "indent = 40\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, GpmlError::Config(ref msg) if msg.contains("at most 16")));
    }
}
