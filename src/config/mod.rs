use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_LOCAL_DATA_ROOT, DEFAULT_OUTPUT_ROOT,
    DEFAULT_REMOTE_BASE_URL, LOG_FILE_NAME, env_vars,
};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root URL of the remote JSON source, e.g. `https://host/football.json/v1`.
    /// Must serve documents in the `{country}/{season}/{league}.json` layout.
    #[serde(default = "default_remote_base_url")]
    pub remote_base_url: String,
    /// Directory holding local season documents in the `{country}/{season}` layout
    #[serde(default = "default_local_data_root")]
    pub local_data_root: String,
    /// Directory CSV artifacts are written to. Must exist before a run.
    #[serde(default = "default_output_root")]
    pub output_root: String,
    /// HTTP timeout in seconds for remote requests. Defaults to 30 seconds if not specified.
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

fn default_remote_base_url() -> String {
    DEFAULT_REMOTE_BASE_URL.to_string()
}

fn default_local_data_root() -> String {
    DEFAULT_LOCAL_DATA_ROOT.to_string()
}

fn default_output_root() -> String {
    DEFAULT_OUTPUT_ROOT.to_string()
}

/// Default HTTP timeout in seconds
fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECONDS
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote_base_url: default_remote_base_url(),
            local_data_root: default_local_data_root(),
            output_root: default_output_root(),
            http_timeout_seconds: default_http_timeout(),
            log_file_path: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables can override config file values.
    ///
    /// # Environment Variables
    /// - `FIXTURE_EXPORT_REMOTE_URL` - Override remote base URL
    /// - `FIXTURE_EXPORT_LOCAL_ROOT` - Override local data root
    /// - `FIXTURE_EXPORT_OUTPUT_ROOT` - Override output root
    /// - `FIXTURE_EXPORT_HTTP_TIMEOUT` - Override HTTP timeout in seconds (default: 30)
    /// - `FIXTURE_EXPORT_LOG_FILE` - Override log file path
    ///
    /// # Notes
    /// - A missing config file yields the defaults; nothing is written
    /// - Environment variables take precedence over config file
    pub async fn load() -> Result<Self, AppError> {
        Self::load_with_overrides(&get_config_path()).await
    }

    /// Same as [`Config::load`] but reads the given file.
    pub async fn load_with_overrides(path: &str) -> Result<Self, AppError> {
        let mut config = Self::load_stored(path).await?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Reads the file as stored, or the defaults when it does not exist.
    ///
    /// No environment overrides and no validation, so the result can be
    /// patched and saved back without picking up one-off values.
    pub async fn load_stored(path: &str) -> Result<Self, AppError> {
        if Path::new(path).exists() {
            Self::load_from_path(path).await
        } else {
            Ok(Config::default())
        }
    }

    /// Applies `FIXTURE_EXPORT_*` environment variables on top of the current values.
    ///
    /// # Errors
    /// * `AppError::Config` - If the timeout override is not a number of seconds
    pub fn apply_env_overrides(&mut self) -> Result<(), AppError> {
        if let Ok(url) = std::env::var(env_vars::REMOTE_URL) {
            self.remote_base_url = url;
        }

        if let Ok(root) = std::env::var(env_vars::LOCAL_ROOT) {
            self.local_data_root = root;
        }

        if let Ok(root) = std::env::var(env_vars::OUTPUT_ROOT) {
            self.output_root = root;
        }

        if let Ok(timeout) = std::env::var(env_vars::HTTP_TIMEOUT) {
            self.http_timeout_seconds = timeout.trim().parse::<u64>().map_err(|_| {
                AppError::config_error(format!(
                    "{}={timeout} is not a number of seconds",
                    env_vars::HTTP_TIMEOUT
                ))
            })?;
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }

        Ok(())
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(self)
    }

    /// Saves current configuration to the default config file location.
    ///
    /// # Notes
    /// - Creates config directory if it doesn't exist
    /// - Uses TOML format for storage
    pub async fn save(&self) -> Result<(), AppError> {
        let config_path = get_config_path();
        self.save_to_path(&config_path).await
    }

    /// Returns the platform-specific path for the config file.
    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    /// Returns the platform-specific path for the log directory.
    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Shows the effective defaults when no config file exists
    pub async fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();
        let config = Config::load().await?;

        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        if !Path::new(&config_path).exists() {
            println!("(Not created yet, showing defaults)");
        }
        println!("────────────────────────────────────");
        println!("Remote Source:");
        println!("{}", config.remote_base_url);
        println!("────────────────────────────────────");
        println!("Local Data Root:");
        println!("{}", config.local_data_root);
        println!("────────────────────────────────────");
        println!("Output Root:");
        println!("{}", config.output_root);
        println!("────────────────────────────────────");
        println!("HTTP Timeout:");
        println!("{} seconds", config.http_timeout_seconds);
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{LOG_FILE_NAME}");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path.
    ///
    /// Creates the parent directory if it doesn't exist and strips a trailing
    /// slash from the remote base URL.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub async fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            fs::create_dir_all(config_dir).await?;
        }

        let content = toml::to_string_pretty(&Config {
            remote_base_url: self.remote_base_url.trim_end_matches('/').to_string(),
            ..self.clone()
        })?;
        let mut file = fs::File::create(path).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    /// Loads configuration from a custom file path without environment overrides.
    pub async fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
