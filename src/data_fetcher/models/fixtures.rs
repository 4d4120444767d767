use serde::{Deserialize, Serialize};

/// Club entry as it appears in the source documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceClub {
    #[serde(default)]
    pub key: Option<String>,
    pub name: String,
    pub code: String,
}

/// Clubs document, one per `{country}/{season}/{league}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClubsDocument {
    #[serde(default)]
    pub name: Option<String>,
    pub clubs: Vec<SourceClub>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceMatch {
    #[serde(default)]
    pub date: Option<String>,
    pub team1: SourceClub,
    pub team2: SourceClub,
    #[serde(default)]
    pub score1: Option<u32>,
    #[serde(default)]
    pub score2: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRound {
    pub name: String,
    #[serde(default)]
    pub matches: Vec<SourceMatch>,
}

/// Rounds document, one per `{country}/{season}/{league}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundsDocument {
    #[serde(default)]
    pub name: Option<String>,
    pub rounds: Vec<SourceRound>,
}
