//! The fixture provider contract and the run-time choice between its backends

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::error;

use super::api::RemoteProvider;
use super::local::LocalProvider;
use super::models::{Club, ClubsDocument, Round, RoundsDocument};
use crate::config::Config;
use crate::error::AppError;
use crate::season::SeasonKey;

/// Supplies the clubs and rounds of one season.
///
/// Implementations make exactly one attempt per call and never retry.
pub trait FixtureDataProvider: Send + Sync {
    fn fetch_clubs(
        &self,
        key: &SeasonKey,
    ) -> impl Future<Output = Result<Vec<Club>, AppError>> + Send;

    fn fetch_rounds(
        &self,
        key: &SeasonKey,
    ) -> impl Future<Output = Result<Vec<Round>, AppError>> + Send;

    /// Human readable origin of the data, used in logs
    fn describe(&self) -> String;
}

/// Backend selected once per run
#[derive(Debug, Clone)]
pub enum DataSource {
    Remote(RemoteProvider),
    Local(LocalProvider),
}

impl DataSource {
    /// Builds the backend named by the `--local` switch from the loaded config.
    pub fn from_config(config: &Config, use_local: bool) -> Result<Self, AppError> {
        if use_local {
            Ok(DataSource::Local(LocalProvider::new(&config.local_data_root)))
        } else {
            Ok(DataSource::Remote(RemoteProvider::from_config(config)?))
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, DataSource::Local(_))
    }
}

impl FixtureDataProvider for DataSource {
    async fn fetch_clubs(&self, key: &SeasonKey) -> Result<Vec<Club>, AppError> {
        match self {
            DataSource::Remote(provider) => provider.fetch_clubs(key).await,
            DataSource::Local(provider) => provider.fetch_clubs(key).await,
        }
    }

    async fn fetch_rounds(&self, key: &SeasonKey) -> Result<Vec<Round>, AppError> {
        match self {
            DataSource::Remote(provider) => provider.fetch_rounds(key).await,
            DataSource::Local(provider) => provider.fetch_rounds(key).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            DataSource::Remote(provider) => provider.describe(),
            DataSource::Local(provider) => provider.describe(),
        }
    }
}

/// Parses a source document, classifying failures as `SourceMalformed`.
pub(crate) fn parse_document<T: DeserializeOwned>(text: &str, location: &str) -> Result<T, AppError> {
    match serde_json::from_str::<T>(text) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            error!("Failed to parse source document: {} ({})", e, location);
            let trimmed = text.trim_start();
            if trimmed.is_empty() {
                Err(AppError::source_malformed(location, "Document is empty"))
            } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
                Err(AppError::source_malformed(location, "Document is not valid JSON"))
            } else {
                Err(AppError::source_malformed(location, e.to_string()))
            }
        }
    }
}

pub(crate) fn clubs_from_document(doc: ClubsDocument) -> Vec<Club> {
    doc.clubs.into_iter().map(Club::from).collect()
}

pub(crate) fn rounds_from_document(doc: RoundsDocument) -> Vec<Round> {
    doc.rounds.into_iter().map(Round::from).collect()
}
