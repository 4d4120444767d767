pub mod fixtures;
pub mod season_data;

pub use fixtures::{ClubsDocument, RoundsDocument, SourceClub, SourceMatch, SourceRound};
pub use season_data::{Club, Dataset, Match, Round};
