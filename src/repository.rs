use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::data_fetcher::{Dataset, FixtureDataProvider};
use crate::error::AppError;
use crate::reporter::{RunEvent, SharedReporter};
use crate::season::SeasonKey;

/// Loads one season through a provider and keeps it for the rest of the run.
pub struct SeasonRepository<P> {
    provider: P,
    reporter: SharedReporter,
    dataset: Option<Dataset>,
}

impl<P: FixtureDataProvider> SeasonRepository<P> {
    pub fn new(provider: P, reporter: SharedReporter) -> Self {
        Self {
            provider,
            reporter,
            dataset: None,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches clubs and rounds concurrently, checks that every match
    /// references a known club, and caches the result.
    ///
    /// When both fetches fail both errors are reported and the clubs error is
    /// returned. A failed load clears any previously cached dataset.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn load(&mut self, key: &SeasonKey) -> Result<&Dataset, AppError> {
        self.dataset = None;

        let (clubs, rounds) = tokio::join!(
            self.provider.fetch_clubs(key),
            self.provider.fetch_rounds(key)
        );

        let (clubs, rounds) = match (clubs, rounds) {
            (Ok(clubs), Ok(rounds)) => (clubs, rounds),
            (Err(e), Ok(_)) => {
                self.report_fetch_failure("clubs", &e);
                return Err(e);
            }
            (Ok(_), Err(e)) => {
                self.report_fetch_failure("rounds", &e);
                return Err(e);
            }
            (Err(clubs_error), Err(rounds_error)) => {
                self.report_fetch_failure("clubs", &clubs_error);
                self.report_fetch_failure("rounds", &rounds_error);
                return Err(clubs_error);
            }
        };

        let dataset = Dataset {
            key: key.clone(),
            clubs,
            rounds,
        };
        check_references(&dataset, &self.provider.describe())?;

        self.reporter.report(RunEvent::DatasetLoaded {
            dataset_key: key.dataset_key(),
            clubs: dataset.clubs.len(),
            rounds: dataset.rounds.len(),
            matches: dataset.match_count(),
        });

        Ok(&*self.dataset.insert(dataset))
    }

    /// The dataset of the last successful `load`
    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Club codes in the dataset's club order
    pub fn club_codes(dataset: &Dataset) -> Vec<String> {
        dataset.clubs.iter().map(|club| club.code.clone()).collect()
    }

    fn report_fetch_failure(&self, document: &'static str, error: &AppError) {
        self.reporter.report(RunEvent::FetchFailed {
            document,
            error: error.to_string(),
        });
    }
}

/// Club codes must be unique and every match must reference known clubs.
fn check_references(dataset: &Dataset, location: &str) -> Result<(), AppError> {
    let mut codes = HashSet::with_capacity(dataset.clubs.len());
    for club in &dataset.clubs {
        if !codes.insert(club.code.as_str()) {
            return Err(AppError::source_malformed(
                location,
                format!("duplicate club code '{}'", club.code),
            ));
        }
    }

    for (index, round) in dataset.rounds.iter().enumerate() {
        for m in &round.matches {
            for code in [&m.home, &m.away] {
                if !codes.contains(code.as_str()) {
                    return Err(AppError::source_malformed(
                        location,
                        format!(
                            "round {} ('{}') references unknown club code '{}'",
                            index + 1,
                            round.name,
                            code
                        ),
                    ));
                }
            }
        }
    }

    debug!(
        "Referential integrity ok: {} clubs, {} matches",
        codes.len(),
        dataset.match_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::{Club, Round};
    use crate::testing_utils::{RecordingReporter, StaticProvider, TestDataBuilder};
    use std::sync::Arc;

    fn key() -> SeasonKey {
        SeasonKey::new(16, "de", "1").unwrap()
    }

    #[tokio::test]
    async fn test_load_caches_dataset() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(3, 2);
        let reporter = Arc::new(RecordingReporter::default());
        let mut repository =
            SeasonRepository::new(StaticProvider::serving(&dataset), reporter.clone());

        assert!(repository.dataset().is_none());
        let loaded = repository.load(&key()).await.unwrap();
        assert_eq!(loaded.clubs, dataset.clubs);
        assert_eq!(loaded.rounds, dataset.rounds);
        assert!(repository.dataset().is_some());

        let events = reporter.events();
        assert!(matches!(
            events.as_slice(),
            [RunEvent::DatasetLoaded { clubs: 4, rounds: 3, .. }]
        ));
    }

    #[tokio::test]
    async fn test_club_codes_preserve_order() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(1, 1);
        let codes = SeasonRepository::<StaticProvider>::club_codes(&dataset);
        assert_eq!(codes, vec!["FCB", "SVW", "BVB", "S04"]);
    }

    #[tokio::test]
    async fn test_unknown_club_reference_is_malformed() {
        let mut dataset = TestDataBuilder::dataset_with_played_rounds(2, 1);
        dataset.rounds[1].matches[0].away = "HSV".to_string();
        let mut repository = SeasonRepository::new(
            StaticProvider::serving(&dataset),
            Arc::new(RecordingReporter::default()),
        );

        let result = repository.load(&key()).await;
        match result {
            Err(AppError::SourceMalformed { message, .. }) => {
                assert!(message.contains("round 2"), "{message}");
                assert!(message.contains("'HSV'"), "{message}");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(repository.dataset().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_club_code_is_malformed() {
        let mut dataset = TestDataBuilder::dataset_with_played_rounds(1, 1);
        dataset.clubs.push(Club {
            code: "FCB".to_string(),
            name: "FC Bayern II".to_string(),
            key: None,
        });
        let mut repository = SeasonRepository::new(
            StaticProvider::serving(&dataset),
            Arc::new(RecordingReporter::default()),
        );

        let result = repository.load(&key()).await;
        assert!(matches!(result, Err(AppError::SourceMalformed { .. })));
    }

    #[tokio::test]
    async fn test_both_fetch_failures_are_reported() {
        let reporter = Arc::new(RecordingReporter::default());
        let provider = StaticProvider::new(
            || Err(AppError::source_unavailable("clubs", "offline")),
            || Err(AppError::source_unavailable("rounds", "offline")),
        );
        let mut repository = SeasonRepository::new(provider, reporter.clone());

        let result = repository.load(&key()).await;
        match result {
            Err(AppError::SourceUnavailable { location, .. }) => assert_eq!(location, "clubs"),
            other => panic!("unexpected result: {other:?}"),
        }

        let failed: Vec<_> = reporter
            .events()
            .into_iter()
            .filter_map(|event| match event {
                RunEvent::FetchFailed { document, .. } => Some(document),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec!["clubs", "rounds"]);
    }

    #[tokio::test]
    async fn test_single_fetch_failure_is_propagated() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(1, 1);
        let clubs = dataset.clubs.clone();
        let provider = StaticProvider::new(
            move || Ok(clubs.clone()),
            || Err(AppError::season_not_found("2016-2017_de_1", "rounds")),
        );
        let mut repository = SeasonRepository::new(provider, Arc::new(RecordingReporter::default()));

        let result = repository.load(&key()).await;
        assert!(matches!(result, Err(AppError::SeasonNotFound { .. })));
    }

    #[tokio::test]
    async fn test_reload_replaces_cache() {
        let first = TestDataBuilder::dataset_with_played_rounds(2, 2);
        let mut repository = SeasonRepository::new(
            StaticProvider::serving(&first),
            Arc::new(RecordingReporter::default()),
        );
        repository.load(&key()).await.unwrap();

        let other_key = SeasonKey::new(17, "de", "1").unwrap();
        let reloaded = repository.load(&other_key).await.unwrap();
        assert_eq!(reloaded.key, other_key);
        assert_eq!(repository.dataset().unwrap().key, other_key);
    }

    #[tokio::test]
    async fn test_empty_rounds_are_allowed() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(1, 0);
        let clubs = dataset.clubs.clone();
        let provider = StaticProvider::new(move || Ok(clubs.clone()), || Ok(Vec::<Round>::new()));
        let mut repository = SeasonRepository::new(provider, Arc::new(RecordingReporter::default()));
        let loaded = repository.load(&key()).await.unwrap();
        assert!(loaded.rounds.is_empty());
    }
}
