use std::path::PathBuf;

use futures::future::join;
use serde_json::Value;
use tracing::instrument;

use super::csv_exporter::CsvExporter;
use super::row::{ArtifactKind, ArtifactSummary, Row, column_names, summarize};
use crate::constants::features::DATA_SET_COLUMN;
use crate::error::AppError;
use crate::reporter::{RunEvent, SharedReporter};
use crate::season::SeasonKey;

/// Outcome of a standard export. Each artifact succeeds or fails on its own.
#[derive(Debug)]
pub struct StandardExport {
    pub train: Result<PathBuf, AppError>,
    pub test: Result<PathBuf, AppError>,
}

impl StandardExport {
    pub fn is_success(&self) -> bool {
        self.train.is_ok() && self.test.is_ok()
    }

    /// `"{kind}: {error}"` for every failed artifact
    pub fn failures(&self) -> Vec<String> {
        [(ArtifactKind::Train, &self.train), (ArtifactKind::Test, &self.test)]
            .into_iter()
            .filter_map(|(kind, result)| result.as_ref().err().map(|e| format!("{kind}: {e}")))
            .collect()
    }

    /// Both paths, or an `ExportFailed` naming every failed artifact
    pub fn into_result(self) -> Result<(PathBuf, PathBuf), AppError> {
        let failures = self.failures();
        match (self.train, self.test) {
            (Ok(train), Ok(test)) => Ok((train, test)),
            _ => Err(AppError::ExportFailed { failures }),
        }
    }
}

/// Decides which artifacts a run produces and reports each outcome.
pub struct ExportOrchestrator {
    exporter: CsvExporter,
    reporter: SharedReporter,
}

impl ExportOrchestrator {
    pub fn new(exporter: CsvExporter, reporter: SharedReporter) -> Self {
        Self { exporter, reporter }
    }

    pub fn exporter(&self) -> &CsvExporter {
        &self.exporter
    }

    /// Row, column and data point counts of a row-set
    pub fn summarize(rows: &[Row]) -> ArtifactSummary {
        summarize(rows)
    }

    /// Writes the training and test artifacts concurrently.
    ///
    /// A failure of one write does not cancel the other.
    #[instrument(skip_all, fields(key = %key))]
    pub async fn export_standard(
        &self,
        training: &[Row],
        test: &[Row],
        key: &SeasonKey,
    ) -> StandardExport {
        let (train, test) = join(
            self.export_artifact(training, ArtifactKind::Train, key),
            self.export_artifact(test, ArtifactKind::Test, key),
        )
        .await;
        StandardExport { train, test }
    }

    /// Writes training and test rows as one artifact with a `data_set` column
    /// marking each row's origin.
    #[instrument(skip_all, fields(key = %key))]
    pub async fn export_full(
        &self,
        training: &[Row],
        test: &[Row],
        key: &SeasonKey,
    ) -> Result<PathBuf, AppError> {
        let combined = match combine_row_sets(training, test) {
            Ok(rows) => rows,
            Err(e) => {
                self.report_failure(ArtifactKind::Full, &e);
                return Err(e);
            }
        };
        self.export_artifact(&combined, ArtifactKind::Full, key).await
    }

    /// Writes a single artifact and reports the outcome.
    pub async fn export_artifact(
        &self,
        rows: &[Row],
        kind: ArtifactKind,
        key: &SeasonKey,
    ) -> Result<PathBuf, AppError> {
        match self.exporter.write(rows, kind, key).await {
            Ok(path) => {
                self.reporter.report(RunEvent::ArtifactWritten {
                    kind,
                    path: path.clone(),
                    summary: summarize(rows),
                });
                Ok(path)
            }
            Err(e) => {
                self.report_failure(kind, &e);
                Err(e)
            }
        }
    }

    fn report_failure(&self, kind: ArtifactKind, error: &AppError) {
        self.reporter.report(RunEvent::ArtifactFailed {
            kind,
            error: error.to_string(),
        });
    }
}

/// Concatenates training then test rows, appending the `data_set` marker.
///
/// When both sets are non-empty their headers must match exactly.
pub fn combine_row_sets(training: &[Row], test: &[Row]) -> Result<Vec<Row>, AppError> {
    if training.is_empty() && test.is_empty() {
        return Err(AppError::empty_dataset(ArtifactKind::Full.as_str()));
    }

    let (train_columns, test_columns) = (column_names(training), column_names(test));
    if !training.is_empty() && !test.is_empty() && train_columns != test_columns {
        return Err(AppError::inconsistent_schema(
            ArtifactKind::Full.as_str(),
            format!(
                "training columns [{}] differ from test columns [{}]",
                train_columns.join(", "),
                test_columns.join(", ")
            ),
        ));
    }

    let marked = |rows: &[Row], kind: ArtifactKind| -> Vec<Row> {
        rows.iter()
            .map(|row| {
                let mut row = row.clone();
                row.insert(DATA_SET_COLUMN.to_string(), Value::from(kind.as_str()));
                row
            })
            .collect()
    };

    let mut combined = marked(training, ArtifactKind::Train);
    combined.extend(marked(test, ArtifactKind::Test));
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::{RecordingReporter, TestDataBuilder};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn key() -> SeasonKey {
        SeasonKey::new(16, "de", "1").unwrap()
    }

    fn orchestrator(root: &std::path::Path) -> (ExportOrchestrator, Arc<RecordingReporter>) {
        let reporter = Arc::new(RecordingReporter::default());
        let exporter = CsvExporter::new(root).with_run_timestamp(1_000);
        (ExportOrchestrator::new(exporter, reporter.clone()), reporter)
    }

    #[tokio::test]
    async fn test_standard_export_writes_both_artifacts() {
        let temp_dir = tempdir().unwrap();
        let (orchestrator, reporter) = orchestrator(temp_dir.path());
        let training = TestDataBuilder::result_rows(4);
        let test = TestDataBuilder::result_rows(2);

        let export = orchestrator.export_standard(&training, &test, &key()).await;
        assert!(export.is_success());
        let (train_path, test_path) = export.into_result().unwrap();

        assert!(train_path.ends_with("1000_2016-2017_de_1_train.csv"));
        assert!(test_path.ends_with("1000_2016-2017_de_1_test.csv"));
        let train_csv = std::fs::read_to_string(&train_path).unwrap();
        assert_eq!(train_csv.lines().count(), 5);

        let written = reporter
            .events()
            .iter()
            .filter(|e| matches!(e, RunEvent::ArtifactWritten { .. }))
            .count();
        assert_eq!(written, 2);
    }

    #[tokio::test]
    async fn test_one_failed_write_keeps_the_other() {
        let temp_dir = tempdir().unwrap();
        let (orchestrator, reporter) = orchestrator(temp_dir.path());
        let training = TestDataBuilder::result_rows(3);

        let export = orchestrator.export_standard(&training, &[], &key()).await;
        assert!(export.train.is_ok());
        assert!(matches!(export.test, Err(AppError::EmptyDataset { .. })));
        assert!(export.train.as_ref().unwrap().exists());

        let failures = export.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].starts_with("test: "));

        match export.into_result() {
            Err(AppError::ExportFailed { failures }) => assert_eq!(failures.len(), 1),
            other => panic!("unexpected result: {other:?}"),
        }

        assert!(reporter.events().iter().any(|e| matches!(
            e,
            RunEvent::ArtifactFailed {
                kind: ArtifactKind::Test,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn test_both_writes_fail_in_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let (orchestrator, _) = orchestrator(&temp_dir.path().join("absent"));
        let rows = TestDataBuilder::result_rows(1);

        let export = orchestrator.export_standard(&rows, &rows, &key()).await;
        assert!(matches!(export.train, Err(AppError::WriteFailed { .. })));
        assert!(matches!(export.test, Err(AppError::WriteFailed { .. })));
        assert_eq!(export.failures().len(), 2);
    }

    #[tokio::test]
    async fn test_full_export_marks_origin() {
        let temp_dir = tempdir().unwrap();
        let (orchestrator, _) = orchestrator(temp_dir.path());
        let training = TestDataBuilder::result_rows(3);
        let test = TestDataBuilder::result_rows(2);

        let path = orchestrator.export_full(&training, &test, &key()).await.unwrap();
        assert!(path.ends_with("1000_2016-2017_de_1_full.csv"));

        let csv = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "team_h,team_a,result,data_set");
        assert_eq!(lines.len(), 6);
        assert!(lines[1..4].iter().all(|l| l.ends_with(",train")));
        assert!(lines[4..].iter().all(|l| l.ends_with(",test")));
    }

    #[tokio::test]
    async fn test_full_export_rejects_mismatched_headers() {
        let temp_dir = tempdir().unwrap();
        let (orchestrator, reporter) = orchestrator(temp_dir.path());
        let training = TestDataBuilder::rows_with_columns(&["a", "b"], 2);
        let test = TestDataBuilder::rows_with_columns(&["a", "c"], 2);

        let result = orchestrator.export_full(&training, &test, &key()).await;
        assert!(matches!(result, Err(AppError::InconsistentSchema { .. })));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
        assert!(matches!(
            reporter.events().as_slice(),
            [RunEvent::ArtifactFailed {
                kind: ArtifactKind::Full,
                ..
            }]
        ));
    }

    #[test]
    fn test_summarize_through_orchestrator() {
        let rows = TestDataBuilder::result_rows(3);
        let summary = ExportOrchestrator::summarize(&rows);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.columns, 3);
        assert_eq!(summary.data_points, 9);
    }

    #[test]
    fn test_combine_allows_one_empty_side() {
        let training = TestDataBuilder::rows_with_columns(&["a"], 2);
        let combined = combine_row_sets(&training, &[]).unwrap();
        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0][DATA_SET_COLUMN], Value::from("train"));
    }

    #[test]
    fn test_combine_rejects_two_empty_sides() {
        let result = combine_row_sets(&[], &[]);
        assert!(matches!(result, Err(AppError::EmptyDataset { .. })));
    }
}
