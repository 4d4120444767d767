use super::Config;
use crate::error::AppError;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Remote base URL must be an http(s) URL
/// - Local data root and output root cannot be empty
/// - HTTP timeout must be at least one second
/// - If log file path is provided, it cannot be empty
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    let url = config.remote_base_url.trim();
    if url.is_empty() {
        return Err(AppError::config_error("Remote base URL cannot be empty"));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(AppError::config_error(format!(
            "Remote base URL must start with http:// or https://, got '{url}'"
        )));
    }

    if config.local_data_root.trim().is_empty() {
        return Err(AppError::config_error("Local data root cannot be empty"));
    }
    if config.output_root.trim().is_empty() {
        return Err(AppError::config_error("Output root cannot be empty"));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if let Some(log_path) = &config.log_file_path
        && log_path.trim().is_empty()
    {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    Ok(())
}
