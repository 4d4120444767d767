use std::path::Path;
use std::sync::{Mutex, PoisonError};

use chrono::{Duration, NaiveDate};
use serde_json::json;

use crate::data_fetcher::api::DocumentKind;
use crate::data_fetcher::local::local_document_path;
use crate::data_fetcher::models::{
    ClubsDocument, RoundsDocument, SourceClub, SourceMatch, SourceRound,
};
use crate::data_fetcher::{Club, Dataset, FixtureDataProvider, Match, Round};
use crate::error::AppError;
use crate::export::Row;
use crate::reporter::{Reporter, RunEvent};
use crate::season::SeasonKey;

/// Test utilities for creating season data and row-sets
pub struct TestDataBuilder;

const CLUBS: [(&str, &str, &str); 4] = [
    ("FCB", "Bayern München", "bayern"),
    ("SVW", "Werder Bremen", "bremen"),
    ("BVB", "Borussia Dortmund", "dortmund"),
    ("S04", "Schalke 04", "schalke"),
];

// Single round robin of the four clubs; repeated with home and away swapped.
const PAIRINGS: [[(usize, usize); 2]; 3] = [
    [(0, 1), (2, 3)],
    [(3, 0), (1, 2)],
    [(0, 2), (3, 1)],
];

impl TestDataBuilder {
    /// The four clubs every built season uses, in source order
    pub fn clubs() -> Vec<Club> {
        CLUBS
            .iter()
            .map(|(code, name, key)| Club {
                code: code.to_string(),
                name: name.to_string(),
                key: Some(key.to_string()),
            })
            .collect()
    }

    /// A 16/de/1 season with `rounds` rounds of two matches each, the first
    /// `played` of which carry results.
    pub fn dataset_with_played_rounds(rounds: usize, played: usize) -> Dataset {
        let key = SeasonKey::new(16, "de", "1").unwrap_or_else(|e| panic!("{e}"));
        let start = NaiveDate::from_ymd_opt(2016, 8, 26).unwrap_or_default();

        let rounds = (0..rounds)
            .map(|r| {
                let swap = (r / PAIRINGS.len()) % 2 == 1;
                let date = (start + Duration::weeks(r as i64))
                    .format("%Y-%m-%d")
                    .to_string();
                let matches = PAIRINGS[r % PAIRINGS.len()]
                    .iter()
                    .enumerate()
                    .map(|(m, &(h, a))| {
                        let (h, a) = if swap { (a, h) } else { (h, a) };
                        let is_played = r < played;
                        Match {
                            date: Some(date.clone()),
                            home: CLUBS[h].0.to_string(),
                            away: CLUBS[a].0.to_string(),
                            home_score: is_played.then_some(((r + m * 2) % 4) as u32),
                            away_score: is_played.then_some(((r * 3 + m) % 3) as u32),
                        }
                    })
                    .collect();
                Round {
                    name: format!("{}. Spieltag", r + 1),
                    matches,
                }
            })
            .collect();

        Dataset {
            key,
            clubs: Self::clubs(),
            rounds,
        }
    }

    /// The clubs document a source would serve for `dataset`
    pub fn clubs_document(dataset: &Dataset) -> ClubsDocument {
        ClubsDocument {
            name: Some(format!("1. Bundesliga {}", dataset.key.season_label())),
            clubs: dataset.clubs.iter().map(source_club).collect(),
        }
    }

    /// The rounds document a source would serve for `dataset`
    pub fn rounds_document(dataset: &Dataset) -> RoundsDocument {
        let lookup = |code: &str| {
            dataset.club(code).map(source_club).unwrap_or(SourceClub {
                key: None,
                name: code.to_string(),
                code: code.to_string(),
            })
        };

        RoundsDocument {
            name: Some(format!("1. Bundesliga {}", dataset.key.season_label())),
            rounds: dataset
                .rounds
                .iter()
                .map(|round| SourceRound {
                    name: round.name.clone(),
                    matches: round
                        .matches
                        .iter()
                        .map(|m| SourceMatch {
                            date: m.date.clone(),
                            team1: lookup(&m.home),
                            team2: lookup(&m.away),
                            score1: m.home_score,
                            score2: m.away_score,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Writes the clubs and rounds documents of `dataset` below `root` in the
    /// local provider layout.
    pub async fn write_local_season(root: &Path, dataset: &Dataset) -> Result<(), AppError> {
        let clubs_path = local_document_path(root, &dataset.key, DocumentKind::Clubs);
        let rounds_path = local_document_path(root, &dataset.key, DocumentKind::Rounds);

        if let Some(parent) = clubs_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let clubs = serde_json::to_string_pretty(&Self::clubs_document(dataset))
            .map_err(|e| AppError::config_error(e.to_string()))?;
        let rounds = serde_json::to_string_pretty(&Self::rounds_document(dataset))
            .map_err(|e| AppError::config_error(e.to_string()))?;

        tokio::fs::write(clubs_path, clubs).await?;
        tokio::fs::write(rounds_path, rounds).await?;
        Ok(())
    }

    /// `count` rows with the columns `team_h`, `team_a`, `result`
    pub fn result_rows(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| {
                let (home, away) = PAIRINGS[i % PAIRINGS.len()][0];
                let mut row = Row::new();
                row.insert("team_h".into(), json!(CLUBS[home].0));
                row.insert("team_a".into(), json!(CLUBS[away].0));
                row.insert("result".into(), json!(["H", "D", "A"][i % 3]));
                row
            })
            .collect()
    }

    /// `count` rows with the given columns; each cell holds `{column}{index}`
    pub fn rows_with_columns(columns: &[&str], count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| {
                columns
                    .iter()
                    .map(|column| (column.to_string(), json!(format!("{column}{i}"))))
                    .collect()
            })
            .collect()
    }
}

fn source_club(club: &Club) -> SourceClub {
    SourceClub {
        key: club.key.clone(),
        name: club.name.clone(),
        code: club.code.clone(),
    }
}

/// Collects every reported event in order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<RunEvent>>,
}

impl RecordingReporter {
    pub fn events(&self) -> Vec<RunEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: RunEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

type ClubsResponder = Box<dyn Fn() -> Result<Vec<Club>, AppError> + Send + Sync>;
type RoundsResponder = Box<dyn Fn() -> Result<Vec<Round>, AppError> + Send + Sync>;

/// In-memory provider whose answers are produced by closures
pub struct StaticProvider {
    clubs: ClubsResponder,
    rounds: RoundsResponder,
}

impl StaticProvider {
    pub fn new(
        clubs: impl Fn() -> Result<Vec<Club>, AppError> + Send + Sync + 'static,
        rounds: impl Fn() -> Result<Vec<Round>, AppError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            clubs: Box::new(clubs),
            rounds: Box::new(rounds),
        }
    }

    /// Serves the clubs and rounds of `dataset` on every call
    pub fn serving(dataset: &Dataset) -> Self {
        let clubs = dataset.clubs.clone();
        let rounds = dataset.rounds.clone();
        Self::new(move || Ok(clubs.clone()), move || Ok(rounds.clone()))
    }
}

impl FixtureDataProvider for StaticProvider {
    async fn fetch_clubs(&self, _key: &SeasonKey) -> Result<Vec<Club>, AppError> {
        (self.clubs)()
    }

    async fn fetch_rounds(&self, _key: &SeasonKey) -> Result<Vec<Round>, AppError> {
        (self.rounds)()
    }

    fn describe(&self) -> String {
        "static test data".to_string()
    }
}
