use reqwest::Client;
use tracing::{info, instrument};

use super::fetch_utils::fetch_document;
use super::http_client::create_http_client_with_timeout;
use super::urls::{DocumentKind, build_document_url};
use crate::config::Config;
use crate::data_fetcher::models::{Club, ClubsDocument, Round, RoundsDocument};
use crate::data_fetcher::provider::{FixtureDataProvider, clubs_from_document, rounds_from_document};
use crate::error::AppError;
use crate::season::SeasonKey;

/// Reads season documents from the versioned remote JSON repository
#[derive(Debug, Clone)]
pub struct RemoteProvider {
    client: Client,
    base_url: String,
}

impl RemoteProvider {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Builds a provider with an HTTP client honouring the configured timeout
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(config.http_timeout_seconds)?;
        Ok(Self::new(client, config.remote_base_url.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl FixtureDataProvider for RemoteProvider {
    #[instrument(skip(self), fields(key = %key))]
    async fn fetch_clubs(&self, key: &SeasonKey) -> Result<Vec<Club>, AppError> {
        let url = build_document_url(&self.base_url, key, DocumentKind::Clubs);
        let doc: ClubsDocument = fetch_document(&self.client, &url, &key.dataset_key()).await?;
        info!("Fetched {} clubs from {}", doc.clubs.len(), url);
        Ok(clubs_from_document(doc))
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn fetch_rounds(&self, key: &SeasonKey) -> Result<Vec<Round>, AppError> {
        let url = build_document_url(&self.base_url, key, DocumentKind::Rounds);
        let doc: RoundsDocument = fetch_document(&self.client, &url, &key.dataset_key()).await?;
        info!("Fetched {} rounds from {}", doc.rounds.len(), url);
        Ok(rounds_from_document(doc))
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::api::http_client::create_test_http_client;
    use crate::testing_utils::TestDataBuilder;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    #[tokio::test]
    async fn test_remote_provider_fetches_both_documents() {
        let mock_server = MockServer::start().await;
        let dataset = TestDataBuilder::dataset_with_played_rounds(2, 1);

        Mock::given(method("GET"))
            .and(path("/de/2016-2017/1.clubs.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(TestDataBuilder::clubs_document(&dataset)),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/de/2016-2017/1.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(TestDataBuilder::rounds_document(&dataset)),
            )
            .mount(&mock_server)
            .await;

        let provider = RemoteProvider::new(create_test_http_client(), mock_server.uri());
        let key = SeasonKey::new(16, "de", "1").unwrap();

        let clubs = provider.fetch_clubs(&key).await.unwrap();
        let rounds = provider.fetch_rounds(&key).await.unwrap();

        assert_eq!(clubs, dataset.clubs);
        assert_eq!(rounds, dataset.rounds);
    }

    #[tokio::test]
    async fn test_remote_provider_unknown_league_is_season_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let provider = RemoteProvider::new(create_test_http_client(), mock_server.uri());
        let key = SeasonKey::new(16, "de", "42").unwrap();

        let result = provider.fetch_rounds(&key).await;
        assert!(matches!(result, Err(AppError::SeasonNotFound { .. })));
    }

    #[test]
    fn test_describe_is_base_url() {
        let provider = RemoteProvider::new(create_test_http_client(), "http://localhost:1234");
        assert_eq!(provider.describe(), "http://localhost:1234");
        assert_eq!(provider.base_url(), "http://localhost:1234");
    }
}
