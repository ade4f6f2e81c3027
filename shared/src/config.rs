//! Configuration persistence utilities
//!
//! Each clock keeps one TOML file, named after the clock, inside a config
//! directory. [`ConfigStore::platform`] resolves the per-user directory.

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    NoConfigDir,
    /// IO error while reading/writing config
    Io(io::Error),
    /// Failed to parse config file
    Parse(toml::de::Error),
    /// Failed to serialize config
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// A directory holding one `<clock_name>.toml` file per clock
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the per-user platform config directory
    pub fn platform() -> Result<Self, ConfigError> {
        ProjectDirs::from("com", "clock-series", "clocks")
            .map(|dirs| Self::at(dirs.config_dir()))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Store rooted at an explicit directory
    pub fn at(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory this store reads from and writes to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Configuration file path for a specific clock
    pub fn path(&self, clock_name: &str) -> PathBuf {
        self.dir.join(format!("{}.toml", clock_name))
    }

    /// Load configuration for a specific clock
    ///
    /// Returns `None` if the config file doesn't exist yet.
    /// Returns an error if the file exists but can't be parsed.
    pub fn load<T: DeserializeOwned>(&self, clock_name: &str) -> Result<Option<T>, ConfigError> {
        let path = self.path(clock_name);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let config: T = toml::from_str(&contents)?;
        Ok(Some(config))
    }

    /// Load configuration, substituting the default when the file is missing
    pub fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        clock_name: &str,
    ) -> Result<T, ConfigError> {
        Ok(self.load(clock_name)?.unwrap_or_default())
    }

    /// Save configuration for a specific clock
    pub fn save<T: Serialize>(&self, clock_name: &str, config: &T) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.dir)?;
        let contents = toml::to_string_pretty(config)?;
        fs::write(self.path(clock_name), contents)?;
        Ok(())
    }

    /// Delete configuration for a specific clock
    pub fn delete(&self, clock_name: &str) -> Result<(), ConfigError> {
        let path = self.path(clock_name);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct TestConfig {
        name: String,
        value: i32,
    }

    /// Store in a fresh directory, removed when the guard drops
    fn scratch_store() -> (TempDir, ConfigStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("clocks"));
        (dir, store)
    }

    #[test]
    fn test_config_path() {
        let store = ConfigStore::at("/tmp/clocks");
        let path = store.path("test_clock");
        assert!(path.to_string_lossy().ends_with("test_clock.toml"));
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = scratch_store();
        let config = TestConfig {
            name: "echo".to_string(),
            value: 8,
        };
        store.save("test_clock", &config).unwrap();
        let loaded: Option<TestConfig> = store.load("test_clock").unwrap();
        assert_eq!(loaded, Some(config));
    }

    #[test]
    fn test_missing_file_is_none() {
        let (_dir, store) = scratch_store();
        assert!(!store.dir().exists());
        let loaded: Option<TestConfig> = store.load("nothing_here").unwrap();
        assert!(loaded.is_none());
        let fallback: TestConfig = store.load_or_default("nothing_here").unwrap();
        assert_eq!(fallback, TestConfig::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let (_dir, store) = scratch_store();
        fs::create_dir_all(store.dir()).unwrap();
        fs::write(store.path("broken"), "name = [unclosed").unwrap();
        let result: Result<Option<TestConfig>, _> = store.load("broken");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_delete() {
        let (_dir, store) = scratch_store();
        store.save("gone", &TestConfig::default()).unwrap();
        store.delete("gone").unwrap();
        assert!(!store.path("gone").exists());
        // Deleting twice is fine
        store.delete("gone").unwrap();
    }
}
