use std::path::{Path, PathBuf};

use chrono::Utc;
use csv::{Terminator, WriterBuilder};
use tracing::{debug, instrument};

use super::row::{ArtifactKind, Row, cell_text};
use crate::error::AppError;
use crate::season::SeasonKey;

/// Serializes row-sets to CSV and persists them under the output root.
#[derive(Debug, Clone)]
pub struct CsvExporter {
    output_root: PathBuf,
    run_timestamp: Option<i64>,
}

impl CsvExporter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            run_timestamp: None,
        }
    }

    /// Uses one timestamp for every artifact of the run instead of one per write.
    pub fn with_run_timestamp(mut self, timestamp_millis: i64) -> Self {
        self.run_timestamp = Some(timestamp_millis);
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// `{output_root}/{timestamp}_{season_label}_{country}_{league}_{kind}.csv`
    pub fn artifact_path(&self, timestamp_millis: i64, key: &SeasonKey, kind: ArtifactKind) -> PathBuf {
        self.output_root.join(format!(
            "{}_{}_{}_{}_{}.csv",
            timestamp_millis,
            key.season_label(),
            key.country(),
            key.league(),
            kind
        ))
    }

    /// Validates the row-set and renders it as CSV text.
    ///
    /// The header is the first row's key sequence; every other row must have
    /// exactly the same keys in the same order.
    pub fn render(rows: &[Row], kind: ArtifactKind) -> Result<String, AppError> {
        let header = rows.first().ok_or_else(|| AppError::empty_dataset(kind.as_str()))?;

        for (index, row) in rows.iter().enumerate().skip(1) {
            if !row.keys().eq(header.keys()) {
                return Err(AppError::inconsistent_schema(
                    kind.as_str(),
                    format!(
                        "row {} has columns [{}], expected [{}]",
                        index,
                        join_keys(row),
                        join_keys(header)
                    ),
                ));
            }
        }

        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(header.keys())?;
        for row in rows {
            writer.write_record(row.values().map(cell_text))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::Io(e.into_error()))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Writes one artifact and returns its path.
    ///
    /// The output directory must already exist. The whole file is rendered
    /// before the single filesystem write.
    #[instrument(skip(self, rows), fields(rows = rows.len(), key = %key))]
    pub async fn write(
        &self,
        rows: &[Row],
        kind: ArtifactKind,
        key: &SeasonKey,
    ) -> Result<PathBuf, AppError> {
        let csv = Self::render(rows, kind)?;

        let timestamp = self
            .run_timestamp
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        let path = self.artifact_path(timestamp, key, kind);

        debug!("Writing {} bytes to {}", csv.len(), path.display());
        tokio::fs::write(&path, csv)
            .await
            .map_err(|e| AppError::write_failed(&path, e))?;

        Ok(path)
    }
}

fn join_keys(row: &Row) -> String {
    row.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
