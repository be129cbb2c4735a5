use crate::models::UserConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// Configuration manager for loading and saving the YAML configuration file.
///
/// Manages `LungScan Config.yaml` inside a configuration directory that is
/// created on demand. A missing file is not an error: defaults are returned
/// (and can be persisted with [`save_user_config`](Self::save_user_config)).
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    user_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            user_config_path: config_dir.join("LungScan Config.yaml"),
            config_dir,
        })
    }

    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Load the user configuration file, or defaults if it doesn't exist.
    pub fn load_user_config(&self) -> Result<UserConfig> {
        if !self.user_config_path.exists() {
            tracing::warn!(
                "User config file not found at {}, using defaults",
                self.user_config_path
            );
            return Ok(UserConfig::default());
        }

        let file_contents = fs::read_to_string(&self.user_config_path)
            .with_context(|| format!("Failed to read user config: {}", self.user_config_path))?;

        let config: UserConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse user config: {}", self.user_config_path))?;

        tracing::info!("Loaded user config from {}", self.user_config_path);
        Ok(config)
    }

    /// Save the user configuration file.
    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize user config to YAML")?;

        fs::write(&self.user_config_path, yaml_string)
            .with_context(|| format!("Failed to write user config: {}", self.user_config_path))?;

        tracing::info!("Saved user config to {}", self.user_config_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(temp: &TempDir) -> ConfigManager {
        let dir = Utf8PathBuf::try_from(temp.path().join("LungScan Data")).unwrap();
        ConfigManager::new(dir).unwrap()
    }

    #[test]
    fn test_creates_config_directory() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);
        assert!(mgr.config_dir().exists());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = manager(&temp).load_user_config().unwrap();
        assert_eq!(config.settings.gateway_delay, 2);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp = TempDir::new().unwrap();
        let mgr = manager(&temp);

        let mut config = UserConfig::default();
        config.settings.gateway_delay = 7;
        config.settings.skeleton_rows = 3;
        mgr.save_user_config(&config).unwrap();

        let reloaded = mgr.load_user_config().unwrap();
        assert_eq!(reloaded.settings.gateway_delay, 7);
        assert_eq!(reloaded.settings.skeleton_rows, 3);
    }
}
