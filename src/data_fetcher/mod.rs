pub mod api;
pub mod club_meta;
pub mod local;
pub mod models;
pub mod provider;

pub use api::RemoteProvider;
pub use club_meta::{ClubMetaLoader, ClubMetaMap, ClubMetaSource};
pub use local::LocalProvider;
pub use models::{Club, Dataset, Match, Round};
pub use provider::{DataSource, FixtureDataProvider};
