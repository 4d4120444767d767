//! CSV artifacts: rendering, persistence and the train/test/full run policy

pub mod csv_exporter;
pub mod orchestrator;
pub mod row;

pub use csv_exporter::CsvExporter;
pub use orchestrator::{ExportOrchestrator, StandardExport, combine_row_sets};
pub use row::{ArtifactKind, ArtifactSummary, Row, column_names, summarize};
