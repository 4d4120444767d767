//! Reads season documents from a local file tree laid out like the remote source

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument};

use super::api::{DocumentKind, document_file_name};
use super::models::{Club, ClubsDocument, Round, RoundsDocument};
use super::provider::{FixtureDataProvider, clubs_from_document, parse_document, rounds_from_document};
use crate::error::AppError;
use crate::season::SeasonKey;

#[derive(Debug, Clone)]
pub struct LocalProvider {
    root: PathBuf,
}

impl LocalProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `{root}/{country}/{season_label}/{league}.{suffix}`
    pub fn document_path(&self, key: &SeasonKey, kind: DocumentKind) -> PathBuf {
        local_document_path(&self.root, key, kind)
    }

    async fn read_document<T: DeserializeOwned>(
        &self,
        key: &SeasonKey,
        kind: DocumentKind,
    ) -> Result<T, AppError> {
        let path = self.document_path(key, kind);
        let location = path.display().to_string();
        debug!("Reading source document: {location}");

        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            error!("Failed to read {}: {}", location, e);
            AppError::source_unavailable(&location, e.to_string())
        })?;

        parse_document(&text, &location)
    }
}

/// Path of a season document below a local data root
pub fn local_document_path(root: &Path, key: &SeasonKey, kind: DocumentKind) -> PathBuf {
    root.join(key.country())
        .join(key.season_label())
        .join(document_file_name(key, kind))
}

impl FixtureDataProvider for LocalProvider {
    #[instrument(skip(self), fields(key = %key))]
    async fn fetch_clubs(&self, key: &SeasonKey) -> Result<Vec<Club>, AppError> {
        let doc: ClubsDocument = self.read_document(key, DocumentKind::Clubs).await?;
        info!("Read {} clubs from {}", doc.clubs.len(), self.root.display());
        Ok(clubs_from_document(doc))
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn fetch_rounds(&self, key: &SeasonKey) -> Result<Vec<Round>, AppError> {
        let doc: RoundsDocument = self.read_document(key, DocumentKind::Rounds).await?;
        info!("Read {} rounds from {}", doc.rounds.len(), self.root.display());
        Ok(rounds_from_document(doc))
    }

    fn describe(&self) -> String {
        format!("local files under {}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_provider_reads_documents() {
        let temp_dir = tempdir().unwrap();
        let dataset = TestDataBuilder::dataset_with_played_rounds(3, 2);
        TestDataBuilder::write_local_season(temp_dir.path(), &dataset)
            .await
            .unwrap();

        let provider = LocalProvider::new(temp_dir.path());
        let clubs = provider.fetch_clubs(&dataset.key).await.unwrap();
        let rounds = provider.fetch_rounds(&dataset.key).await.unwrap();

        assert_eq!(clubs, dataset.clubs);
        assert_eq!(rounds, dataset.rounds);
    }

    #[tokio::test]
    async fn test_missing_file_is_source_unavailable() {
        let temp_dir = tempdir().unwrap();
        let provider = LocalProvider::new(temp_dir.path());
        let key = SeasonKey::new(16, "de", "1").unwrap();

        let result = provider.fetch_clubs(&key).await;
        match result {
            Err(AppError::SourceUnavailable { location, .. }) => {
                assert!(location.ends_with("1.clubs.json"), "{location}")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_file_is_source_malformed() {
        let temp_dir = tempdir().unwrap();
        let key = SeasonKey::new(16, "de", "1").unwrap();
        let provider = LocalProvider::new(temp_dir.path());
        let path = provider.document_path(&key, DocumentKind::Rounds);
        tokio::fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let result = provider.fetch_rounds(&key).await;
        assert!(matches!(result, Err(AppError::SourceMalformed { .. })));
    }

    #[test]
    fn test_document_path_layout() {
        let key = SeasonKey::new(16, "de", "1").unwrap();
        let path = local_document_path(Path::new("/data"), &key, DocumentKind::Clubs);
        assert_eq!(path, PathBuf::from("/data/de/2016-2017/1.clubs.json"));
    }
}
