use super::fixtures::{SourceClub, SourceMatch, SourceRound};
use crate::season::SeasonKey;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Club {
    pub code: String,
    pub name: String,
    pub key: Option<String>,
}

/// One fixture. Scores are absent until the match is played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub date: Option<String>,
    pub home: String,
    pub away: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

impl Match {
    pub fn is_played(&self) -> bool {
        self.home_score.is_some() && self.away_score.is_some()
    }

    /// Final score as `(home, away)` when played
    pub fn score(&self) -> Option<(u32, u32)> {
        self.home_score.zip(self.away_score)
    }
}

/// One matchday. Position in `Dataset::rounds` is its chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub name: String,
    pub matches: Vec<Match>,
}

impl Round {
    /// A round is complete when it has matches and all of them are played
    pub fn is_complete(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(Match::is_played)
    }
}

/// A season's clubs and rounds as produced by one provider load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    pub key: SeasonKey,
    pub clubs: Vec<Club>,
    pub rounds: Vec<Round>,
}

impl Dataset {
    /// 1-based number of the last round in which every match has a result.
    ///
    /// Counts consecutive complete rounds from the start; returns 0 when the
    /// first round is still open.
    pub fn last_completed_round(&self) -> usize {
        self.rounds
            .iter()
            .take_while(|round| round.is_complete())
            .count()
    }

    /// 1-based number of the round to predict, if the season has one left
    pub fn predicted_round(&self) -> Option<usize> {
        let next = self.last_completed_round() + 1;
        (next <= self.rounds.len()).then_some(next)
    }

    pub fn club(&self, code: &str) -> Option<&Club> {
        self.clubs.iter().find(|club| club.code == code)
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|round| round.matches.len()).sum()
    }
}

impl From<SourceClub> for Club {
    fn from(club: SourceClub) -> Self {
        Club {
            code: club.code,
            name: club.name,
            key: club.key,
        }
    }
}

impl From<SourceMatch> for Match {
    fn from(m: SourceMatch) -> Self {
        Match {
            date: m.date,
            home: m.team1.code,
            away: m.team2.code,
            home_score: m.score1,
            away_score: m.score2,
        }
    }
}

impl From<SourceRound> for Round {
    fn from(round: SourceRound) -> Self {
        Round {
            name: round.name,
            matches: round.matches.into_iter().map(Match::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_last_completed_round_stops_at_first_open_round() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(4, 2);
        assert_eq!(dataset.last_completed_round(), 2);
        assert_eq!(dataset.predicted_round(), Some(3));
    }

    #[test]
    fn test_finished_season_has_no_predicted_round() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(3, 3);
        assert_eq!(dataset.last_completed_round(), 3);
        assert_eq!(dataset.predicted_round(), None);
    }

    #[test]
    fn test_unstarted_season() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(3, 0);
        assert_eq!(dataset.last_completed_round(), 0);
        assert_eq!(dataset.predicted_round(), Some(1));
    }

    #[test]
    fn test_partially_played_match_is_not_played() {
        let m = Match {
            date: None,
            home: "FCB".to_string(),
            away: "SVW".to_string(),
            home_score: Some(1),
            away_score: None,
        };
        assert!(!m.is_played());
        assert_eq!(m.score(), None);
    }

    #[test]
    fn test_empty_round_is_not_complete() {
        let round = Round {
            name: "1. Spieltag".to_string(),
            matches: vec![],
        };
        assert!(!round.is_complete());
    }

    #[test]
    fn test_source_match_conversion_keeps_codes_and_scores() {
        let doc = TestDataBuilder::rounds_document(&TestDataBuilder::dataset_with_played_rounds(1, 1));
        let round = Round::from(doc.rounds[0].clone());
        assert_eq!(round.matches.len(), 2);
        assert_eq!(round.matches[0].home, "FCB");
        assert!(round.matches[0].is_played());
    }
}
