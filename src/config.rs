//! Serve preset loader.
//!
//! Loads [`SimConfig`] values from YAML files, allowing named serve setups
//! (flat, kick, slice, ...) to be tweaked without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! presets/
//! ├── flat_serve.yaml
//! ├── kick_serve.yaml
//! └── slice_serve.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::types::SimConfig;

/// Error type for preset loading operations.
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            ConfigError::NotFound(name) => write!(f, "Preset not found: {}", name),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err)
    }
}

/// Preset loader with configurable base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    /// Create a new loader reading from the given directory.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a preset by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = PresetLoader::new("presets");
    /// let config = loader.load("kick_serve")?;
    /// ```
    pub fn load(&self, name: &str) -> Result<SimConfig, ConfigError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let config: SimConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// List all available presets, sorted by name.
    pub fn list(&self) -> Result<Vec<String>, ConfigError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn presets_path() -> PathBuf {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join("presets")
    }

    #[test]
    fn test_load_existing_preset() {
        let loader = PresetLoader::new(presets_path());
        let result = loader.load("flat_serve");

        assert!(result.is_ok(), "Should load flat_serve: {:?}", result.err());
        let config = result.unwrap();
        assert!(config.initial_velocity >= 50.0 && config.initial_velocity <= 150.0);
        assert!(config.server_height > 0.0);
    }

    #[test]
    fn test_load_nonexistent_preset() {
        let loader = PresetLoader::new(presets_path());
        let result = loader.load("nonexistent_preset_xyz");

        assert!(result.is_err());
        match result {
            Err(ConfigError::NotFound(name)) => {
                assert_eq!(name, "nonexistent_preset_xyz");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_list_presets() {
        let loader = PresetLoader::new(presets_path());
        let result = loader.list();

        assert!(result.is_ok());
        let presets = result.unwrap();
        assert!(presets.contains(&"flat_serve".to_string()));
        assert!(presets.contains(&"kick_serve".to_string()));
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let loader = PresetLoader::new("/nonexistent/preset/dir");
        let presets = loader.list().unwrap();
        assert!(presets.is_empty());
    }

    #[test]
    fn test_presets_roundtrip_defaults() {
        // A serialized default config parses back to the same value
        let config = SimConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: SimConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
