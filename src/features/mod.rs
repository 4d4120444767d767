//! Turns a loaded season into training and test rows

pub mod form;
pub mod standings;

use std::collections::HashSet;

use serde_json::Value;

use crate::constants::features::DEFAULT_MIN_MATCHES;
use crate::data_fetcher::{ClubMetaMap, Dataset};
use crate::export::Row;

pub use form::FormFeatureEngineer;
pub use standings::{StandingRow, compute_standings, print_standings};

/// Options that shape the generated rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureConfig {
    /// Rounds at the start of the season that never become training rows
    pub min_matches: usize,
    /// Column names dropped from every row
    pub exclude: Vec<String>,
    /// Prepend `round`, `team_h` and `team_a`
    pub verbose: bool,
    /// Put every unplayed match into the test set instead of only the predicted round
    pub complete: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            min_matches: DEFAULT_MIN_MATCHES,
            exclude: Vec::new(),
            verbose: false,
            complete: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureRows {
    pub training: Vec<Row>,
    pub test: Vec<Row>,
}

/// Builds row-sets from a dataset. Rows of one call share a single column layout.
pub trait FeatureEngineer {
    fn build_rows(&self, dataset: &Dataset, meta: &ClubMetaMap, config: &FeatureConfig) -> FeatureRows;
}

/// Appends columns to a row, skipping excluded names
pub(crate) struct RowBuilder<'a> {
    row: Row,
    exclude: &'a HashSet<&'a str>,
}

impl<'a> RowBuilder<'a> {
    pub(crate) fn new(exclude: &'a HashSet<&'a str>) -> Self {
        Self {
            row: Row::new(),
            exclude,
        }
    }

    pub(crate) fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        if !self.exclude.contains(name.as_str()) {
            self.row.insert(name, value.into());
        }
    }

    pub(crate) fn finish(self) -> Row {
        self.row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_builder_skips_excluded() {
        let exclude: HashSet<&str> = ["b"].into_iter().collect();
        let mut builder = RowBuilder::new(&exclude);
        builder.push("a", 1);
        builder.push("b", 2);
        builder.push("c", "x");
        let row = builder.finish();
        assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_default_config() {
        let config = FeatureConfig::default();
        assert_eq!(config.min_matches, DEFAULT_MIN_MATCHES);
        assert!(!config.verbose && !config.complete);
    }
}
