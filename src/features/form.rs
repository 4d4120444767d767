use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

use super::{FeatureConfig, FeatureEngineer, FeatureRows, RowBuilder};
use crate::constants::features::FORM_WINDOWS;
use crate::data_fetcher::{ClubMetaMap, Dataset, Match};
use crate::export::Row;

/// Rolling-form features computed from the matches each club played before
/// the round under consideration.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormFeatureEngineer;

#[derive(Debug, Clone, Copy)]
struct Outcome {
    points: u32,
    scored: u32,
    conceded: u32,
}

/// Played matches per club, oldest first
#[derive(Debug, Default)]
struct FormTable {
    history: HashMap<String, Vec<Outcome>>,
}

impl FormTable {
    fn record(&mut self, m: &Match) {
        let Some((home, away)) = m.score() else {
            return;
        };
        self.history.entry(m.home.clone()).or_default().push(Outcome {
            points: points_for(home, away),
            scored: home,
            conceded: away,
        });
        self.history.entry(m.away.clone()).or_default().push(Outcome {
            points: points_for(away, home),
            scored: away,
            conceded: home,
        });
    }

    fn outcomes(&self, code: &str) -> &[Outcome] {
        self.history.get(code).map_or(&[], Vec::as_slice)
    }

    /// Mean of `field` over the last `window` matches
    fn recent(&self, code: &str, window: usize, field: fn(&Outcome) -> u32) -> f64 {
        let recent: Vec<u32> = self.outcomes(code).iter().rev().take(window).map(field).collect();
        mean(&recent)
    }

    fn points_per_match(&self, code: &str) -> f64 {
        let points: Vec<u32> = self.outcomes(code).iter().map(|o| o.points).collect();
        mean(&points)
    }
}

fn points_for(scored: u32, conceded: u32) -> u32 {
    match scored.cmp(&conceded) {
        std::cmp::Ordering::Greater => 3,
        std::cmp::Ordering::Equal => 1,
        std::cmp::Ordering::Less => 0,
    }
}

fn mean(values: &[u32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u32 = values.iter().sum();
    rounded(f64::from(sum) / values.len() as f64)
}

fn rounded(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// `H`, `D` or `A` for a played match, empty otherwise
pub fn match_result(m: &Match) -> &'static str {
    match m.score() {
        Some((home, away)) if home > away => "H",
        Some((home, away)) if home == away => "D",
        Some(_) => "A",
        None => "",
    }
}

/// Metadata field names in club order, each listed once
fn meta_fields(dataset: &Dataset, meta: &ClubMetaMap) -> Vec<String> {
    let mut seen = HashSet::new();
    dataset
        .clubs
        .iter()
        .filter_map(|club| meta.get(&club.code))
        .flat_map(|fields| fields.keys())
        .filter(|field| seen.insert(field.as_str()))
        .cloned()
        .collect()
}

struct RowContext<'a> {
    table: &'a FormTable,
    meta: &'a ClubMetaMap,
    meta_fields: &'a [String],
    exclude: &'a HashSet<&'a str>,
    verbose: bool,
}

impl RowContext<'_> {
    fn row(&self, round_number: usize, m: &Match) -> Row {
        let mut row = RowBuilder::new(self.exclude);

        if self.verbose {
            row.push("round", round_number);
            row.push("team_h", m.home.as_str());
            row.push("team_a", m.away.as_str());
        }

        for (prefix, code) in [("team_h", &m.home), ("team_a", &m.away)] {
            for window in FORM_WINDOWS {
                row.push(
                    format!("{prefix}_form_last_{window}"),
                    self.table.recent(code, window, |o| o.points),
                );
            }
            for window in FORM_WINDOWS {
                row.push(
                    format!("{prefix}_goals_scored_last_{window}"),
                    self.table.recent(code, window, |o| o.scored),
                );
            }
            for window in FORM_WINDOWS {
                row.push(
                    format!("{prefix}_goals_conceded_last_{window}"),
                    self.table.recent(code, window, |o| o.conceded),
                );
            }
            row.push(
                format!("{prefix}_points_per_match"),
                self.table.points_per_match(code),
            );
        }

        for window in FORM_WINDOWS {
            let home = self.table.recent(&m.home, window, |o| o.points);
            let away = self.table.recent(&m.away, window, |o| o.points);
            row.push(format!("form_delta_last_{window}"), rounded(home - away));
        }
        row.push(
            "points_per_match_delta",
            rounded(self.table.points_per_match(&m.home) - self.table.points_per_match(&m.away)),
        );

        for (prefix, code) in [("team_h", &m.home), ("team_a", &m.away)] {
            let club_meta = self.meta.get(code);
            for field in self.meta_fields {
                let value = club_meta
                    .and_then(|fields| fields.get(field))
                    .cloned()
                    .unwrap_or(Value::Null);
                row.push(format!("{prefix}_{field}"), value);
            }
        }

        row.push("result", match_result(m));
        row.finish()
    }
}

impl FeatureEngineer for FormFeatureEngineer {
    fn build_rows(&self, dataset: &Dataset, meta: &ClubMetaMap, config: &FeatureConfig) -> FeatureRows {
        let last_completed = dataset.last_completed_round();
        let predicted = dataset.predicted_round();
        let exclude: HashSet<&str> = config.exclude.iter().map(String::as_str).collect();
        let meta_fields = meta_fields(dataset, meta);

        let mut table = FormTable::default();
        let mut rows = FeatureRows::default();

        for (index, round) in dataset.rounds.iter().enumerate() {
            let number = index + 1;
            let context = RowContext {
                table: &table,
                meta,
                meta_fields: &meta_fields,
                exclude: &exclude,
                verbose: config.verbose,
            };

            for m in &round.matches {
                let training =
                    number > config.min_matches && number <= last_completed && m.is_played();
                let test = if config.complete {
                    !m.is_played()
                } else {
                    predicted == Some(number)
                };

                if training {
                    rows.training.push(context.row(number, m));
                } else if test {
                    rows.test.push(context.row(number, m));
                }
            }

            // Matches of one round never see each other's results.
            for m in &round.matches {
                table.record(m);
            }
        }

        debug!(
            "Built {} training and {} test rows for {}",
            rows.training.len(),
            rows.test.len(),
            dataset.key
        );
        rows
    }
}
