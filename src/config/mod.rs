use crate::models::AppSettings;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::collections::HashMap;
use std::fs;

/// Prefix of environment variables overriding settings (e.g. `MYSTERE_DEBUG_MODE=true`)
pub const ENV_PREFIX: &str = "MYSTERE";

/// Settings file name inside the configuration directory
pub const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// Configuration manager for loading and saving application settings.
///
/// Settings are layered, later sources winning:
/// 1. Built-in defaults ([`AppSettings::default`])
/// 2. `settings.yaml` in the configuration directory (optional)
/// 3. `MYSTERE_*` environment variables
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    settings_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing `settings.yaml` (created if missing)
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            settings_path: config_dir.join(SETTINGS_FILE_NAME),
            config_dir,
        })
    }

    /// Load settings from defaults, the settings file and the environment.
    pub fn load_settings(&self) -> Result<AppSettings> {
        self.build_settings(None)
    }

    /// Layer the settings sources. `env` replaces the process environment
    /// when given.
    fn build_settings(&self, env: Option<HashMap<String, String>>) -> Result<AppSettings> {
        if !self.settings_path.exists() {
            tracing::warn!(
                "Settings file not found at {}, using defaults",
                self.settings_path
            );
        }

        let defaults = config::Config::try_from(&AppSettings::default())
            .context("Failed to build default settings")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(
                config::File::from(self.settings_path.as_std_path())
                    .format(config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()
            .with_context(|| format!("Failed to read settings: {}", self.settings_path))?;

        let settings: AppSettings = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse settings: {}", self.settings_path))?;

        tracing::info!("Loaded settings from {}", self.config_dir);
        Ok(settings)
    }

    /// Save settings to `settings.yaml`.
    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(settings).context("Failed to serialize settings to YAML")?;

        fs::write(&self.settings_path, yaml_string)
            .with_context(|| format!("Failed to write settings: {}", self.settings_path))?;

        tracing::info!("Saved settings to {}", self.settings_path);
        Ok(())
    }

    /// Write the default settings file if none exists yet, so users have
    /// something to edit.
    pub fn ensure_settings_file(&self) -> Result<()> {
        if self.settings_path.exists() {
            return Ok(());
        }
        self.save_settings(&AppSettings::default())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn settings_path(&self) -> &Utf8Path {
        &self.settings_path
    }
}
