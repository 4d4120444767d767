use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // Provider errors
    #[error("Fixture source unavailable: {message} ({location})")]
    SourceUnavailable { location: String, message: String },

    #[error("Fixture source returned malformed data: {message} ({location})")]
    SourceMalformed { location: String, message: String },

    #[error("Season not found upstream: {dataset_key} ({location})")]
    SeasonNotFound {
        dataset_key: String,
        location: String,
    },

    // Export errors
    #[error("Cannot export an empty row-set ({artifact})")]
    EmptyDataset { artifact: String },

    #[error("Inconsistent row schema in {artifact}: {message}")]
    InconsistentSchema { artifact: String, message: String },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Export failed for {}", .failures.join("; "))]
    ExportFailed { failures: Vec<String> },

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a source unavailable error (network or filesystem access failure)
    pub fn source_unavailable(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a malformed source error (parse failure or broken references)
    pub fn source_malformed(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceMalformed {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a season not found error
    pub fn season_not_found(dataset_key: impl Into<String>, location: impl Into<String>) -> Self {
        Self::SeasonNotFound {
            dataset_key: dataset_key.into(),
            location: location.into(),
        }
    }

    pub fn empty_dataset(artifact: impl Into<String>) -> Self {
        Self::EmptyDataset {
            artifact: artifact.into(),
        }
    }

    pub fn inconsistent_schema(artifact: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InconsistentSchema {
            artifact: artifact.into(),
            message: message.into(),
        }
    }

    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Check if error originated while acquiring fixture data
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            AppError::SourceUnavailable { .. }
                | AppError::SourceMalformed { .. }
                | AppError::SeasonNotFound { .. }
        )
    }

    /// Check if error originated while exporting row-sets
    pub fn is_export_error(&self) -> bool {
        matches!(
            self,
            AppError::EmptyDataset { .. }
                | AppError::InconsistentSchema { .. }
                | AppError::WriteFailed { .. }
                | AppError::ExportFailed { .. }
                | AppError::Csv(_)
        )
    }

    /// Check if error indicates the requested season does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::SeasonNotFound { .. })
    }
}
