//! Football fixture dataset export library
//!
//! Loads one league season (clubs and match rounds) from an openfootball-style
//! JSON source, remote or local, turns it into feature rows and writes them as
//! CSV training and test sets.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fixture_export::data_fetcher::{ClubMetaMap, LocalProvider};
//! use fixture_export::export::{CsvExporter, ExportOrchestrator};
//! use fixture_export::features::{FeatureConfig, FeatureEngineer, FormFeatureEngineer};
//! use fixture_export::reporter::TracingReporter;
//! use fixture_export::repository::SeasonRepository;
//! use fixture_export::season::SeasonKey;
//! use fixture_export::error::AppError;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let key = SeasonKey::new(16, "de", "1")?;
//!     let reporter = TracingReporter::shared();
//!
//!     // Read data/de/2016-2017/1.clubs.json and 1.json
//!     let mut repository = SeasonRepository::new(LocalProvider::new("data"), reporter.clone());
//!     let dataset = repository.load(&key).await?;
//!
//!     let rows = FormFeatureEngineer.build_rows(dataset, &ClubMetaMap::new(), &FeatureConfig::default());
//!
//!     let orchestrator = ExportOrchestrator::new(CsvExporter::new("output"), reporter);
//!     let (train, test) = orchestrator
//!         .export_standard(&rows.training, &rows.test, &key)
//!         .await
//!         .into_result()?;
//!     println!("{} {}", train.display(), test.display());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod error;
pub mod export;
pub mod features;
pub mod logging;
pub mod reporter;
pub mod repository;
pub mod season;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::{DataSource, Dataset, FixtureDataProvider, LocalProvider, RemoteProvider};
pub use error::AppError;
pub use export::{ArtifactKind, CsvExporter, ExportOrchestrator, Row};
pub use repository::SeasonRepository;
pub use season::SeasonKey;

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
