//! Season addressing: every dataset and artifact is keyed by (year, country, league).

use crate::error::AppError;
use std::fmt;

/// Identifies one season of one league.
///
/// `year` is the two-digit year the season starts in, so `16` is the
/// 2016-2017 season.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeasonKey {
    year: u8,
    country: String,
    league: String,
}

impl SeasonKey {
    /// Creates a key, rejecting years outside `0..=99` and empty identifiers.
    ///
    /// The country code is normalized to lowercase.
    pub fn new(
        year: u8,
        country: impl Into<String>,
        league: impl Into<String>,
    ) -> Result<Self, AppError> {
        if year >= 100 {
            return Err(AppError::config_error(format!(
                "Season year must be a two-digit value (0-99), got {year}"
            )));
        }

        let country = country.into().trim().to_lowercase();
        let league = league.into().trim().to_string();
        if country.is_empty() {
            return Err(AppError::config_error("Country code cannot be empty"));
        }
        if league.is_empty() {
            return Err(AppError::config_error("League identifier cannot be empty"));
        }

        Ok(Self {
            year,
            country,
            league,
        })
    }

    pub fn year(&self) -> u8 {
        self.year
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn league(&self) -> &str {
        &self.league
    }

    /// Four-digit year the season starts in.
    pub fn start_year(&self) -> u16 {
        2000 + u16::from(self.year)
    }

    /// Season label such as `2016-2017`. The end year is always start + 1.
    pub fn season_label(&self) -> String {
        season_label(self.year)
    }

    /// Canonical dataset key such as `2016-2017_de_1`.
    pub fn dataset_key(&self) -> String {
        format!("{}_{}_{}", self.season_label(), self.country, self.league)
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dataset_key())
    }
}

/// Season label for a two-digit start year.
pub fn season_label(year: u8) -> String {
    let start = 2000 + u16::from(year);
    format!("{}-{}", start, start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_season_label_for_every_two_digit_year() {
        for year in 0..100u8 {
            let start = 2000 + u16::from(year);
            assert_eq!(season_label(year), format!("{}-{}", start, start + 1));
        }
    }

    #[test]
    fn test_bundesliga_2016_scenario() {
        let key = SeasonKey::new(16, "de", "1").unwrap();
        assert_eq!(key.season_label(), "2016-2017");
        assert_eq!(key.dataset_key(), "2016-2017_de_1");
        assert_eq!(key.to_string(), "2016-2017_de_1");
        assert_eq!(key.start_year(), 2016);
    }

    #[test]
    fn test_edge_years() {
        assert_eq!(season_label(0), "2000-2001");
        assert_eq!(season_label(99), "2099-2100");
    }

    #[test]
    fn test_year_out_of_range_is_rejected() {
        let result = SeasonKey::new(100, "de", "1");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_country_is_normalized() {
        let key = SeasonKey::new(15, " EN ", "1").unwrap();
        assert_eq!(key.country(), "en");
        assert_eq!(key.dataset_key(), "2015-2016_en_1");
    }

    #[test]
    fn test_empty_identifiers_are_rejected() {
        assert!(SeasonKey::new(16, "", "1").is_err());
        assert!(SeasonKey::new(16, "de", "  ").is_err());
    }

    #[test]
    fn test_dataset_key_is_injective_over_distinct_triples() {
        let mut keys = HashSet::new();
        let mut count = 0;
        for year in [14u8, 15, 16, 17] {
            for country in ["de", "en", "es", "it"] {
                for league in ["1", "2"] {
                    let key = SeasonKey::new(year, country, league).unwrap();
                    keys.insert(key.dataset_key());
                    count += 1;
                }
            }
        }
        assert_eq!(keys.len(), count);
    }
}
