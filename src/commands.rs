use crate::cli::Args;
use crate::config::Config;
use crate::data_fetcher::{ClubMetaLoader, ClubMetaSource, DataSource, Dataset, FixtureDataProvider};
use crate::error::AppError;
use crate::export::{
    ArtifactKind, ArtifactSummary, CsvExporter, ExportOrchestrator, column_names, summarize,
};
use crate::features::{FeatureEngineer, FormFeatureEngineer, compute_standings, print_standings};
use crate::reporter::SharedReporter;
use crate::repository::SeasonRepository;
use crate::season::SeasonKey;
use chrono::Utc;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

/// What a finished export run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub key: SeasonKey,
    pub training: ArtifactSummary,
    pub test: ArtifactSummary,
    pub artifacts: Vec<PathBuf>,
    pub elapsed_ms: u128,
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Handles configuration update commands (--set-remote-url, --set-local-root, --set-output-root).
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    update_config_at(args, &Config::get_config_path()).await?;
    println!("Config updated successfully!");
    Ok(())
}

/// Patches the stored config at `path` with the requested values.
///
/// Starts from the file contents only (defaults when it does not exist).
/// Environment overrides are not persisted. A stored config that fails
/// validation can be repaired; the patched result is validated before saving.
pub async fn update_config_at(args: &Args, path: &str) -> Result<Config, AppError> {
    let mut config = Config::load_stored(path).await?;

    if let Some(url) = &args.new_remote_url {
        config.remote_base_url = url.trim_end_matches('/').to_string();
    }

    if let Some(root) = &args.new_local_root {
        config.local_data_root = root.clone();
    }

    if let Some(root) = &args.new_output_root {
        config.output_root = root.clone();
    }

    config.validate()?;
    config.save_to_path(path).await?;

    Ok(config)
}

/// Runs one export: load the season, build rows, write the artifacts.
///
/// Any source error aborts before a file is written. Artifact failures are
/// collected and returned together as `ExportFailed` after every write was tried.
pub async fn run_export(
    args: &Args,
    config: &Config,
    reporter: SharedReporter,
) -> Result<RunSummary, AppError> {
    let start = Instant::now();
    let key = SeasonKey::new(args.year, &args.country, &args.league)?;
    let feature_config = args.feature_config();

    info!("Export options: {:?}", feature_config);
    info!("Season: {} ({})", key, key.season_label());
    if feature_config.min_matches > 0 {
        warn!(
            "The first {} rounds will be ignored in training data due to --min-matches",
            feature_config.min_matches
        );
    }

    let source = DataSource::from_config(config, args.local)?;
    info!("Source for match results: {}", source.describe());

    let mut repository = SeasonRepository::new(source, reporter.clone());
    let dataset = repository.load(&key).await?;
    info!(
        "Last completely played round is {}",
        dataset.last_completed_round()
    );

    let meta = ClubMetaLoader::new(args.club_meta, &config.local_data_root, &key)
        .load(&SeasonRepository::<DataSource>::club_codes(dataset))
        .await;
    if args.club_meta {
        info!("Got club metadata for {} clubs", meta.len());
    }

    let rows = FormFeatureEngineer.build_rows(dataset, &meta, &feature_config);

    if args.tables {
        print_table(dataset)?;
    }

    let output_root = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output_root.clone());
    let exporter = CsvExporter::new(output_root).with_run_timestamp(Utc::now().timestamp_millis());
    let orchestrator = ExportOrchestrator::new(exporter, reporter);

    let mut artifacts = Vec::new();
    let mut failures = Vec::new();

    if rows.test.is_empty() {
        warn!("No matches left to predict; skipping the test data set");
        match orchestrator
            .export_artifact(&rows.training, ArtifactKind::Train, &key)
            .await
        {
            Ok(path) => artifacts.push(path),
            Err(e) => failures.push(format!("{}: {e}", ArtifactKind::Train)),
        }
    } else {
        let export = orchestrator
            .export_standard(&rows.training, &rows.test, &key)
            .await;
        failures.extend(export.failures());
        artifacts.extend(export.train.ok());
        artifacts.extend(export.test.ok());
    }

    if args.full {
        match orchestrator.export_full(&rows.training, &rows.test, &key).await {
            Ok(path) => artifacts.push(path),
            Err(e) => failures.push(format!("{}: {e}", ArtifactKind::Full)),
        }
    }

    let training = summarize(&rows.training);
    info!(
        "Training Data: Processed {} matches for {}",
        training.rows,
        key.dataset_key()
    );
    info!(
        "Training Data: Calculated {} attributes: {}",
        training.columns,
        column_names(&rows.training).join(", ")
    );
    info!("Training Data: {} data points calculated", training.data_points);
    log_predicted_fixtures(dataset);

    let elapsed_ms = start.elapsed().as_millis();
    info!("Export took {elapsed_ms} ms");

    if !failures.is_empty() {
        return Err(AppError::ExportFailed { failures });
    }

    Ok(RunSummary {
        key,
        training,
        test: summarize(&rows.test),
        artifacts,
        elapsed_ms,
    })
}

fn print_table(dataset: &Dataset) -> Result<(), AppError> {
    let round = dataset.last_completed_round();
    let table = compute_standings(dataset, round);
    let title = format!("{} after round {}", dataset.key.dataset_key(), round);
    print_standings(&mut stdout().lock(), &title, &table)?;
    Ok(())
}

/// `[1] FCB : SVW` per fixture of the predicted round
pub fn predicted_fixtures(dataset: &Dataset) -> Option<Vec<String>> {
    let round = dataset.predicted_round()?;
    let fixtures = dataset.rounds.get(round - 1)?;
    Some(
        fixtures
            .matches
            .iter()
            .enumerate()
            .map(|(i, m)| format!("[{}] {} : {}", i + 1, m.home, m.away))
            .collect(),
    )
}

fn log_predicted_fixtures(dataset: &Dataset) {
    match predicted_fixtures(dataset) {
        Some(fixtures) => info!("Predicted games are {}", fixtures.join(", ")),
        None => warn!(
            "No games found to be predicted. This is expected if the season is over, otherwise indicates an error"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::env_vars;
    use crate::testing_utils::TestDataBuilder;
    use clap::Parser;
    use serial_test::serial;
    use tempfile::tempdir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["fixture_export"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn test_config_update_does_not_persist_environment_overrides() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path = config_path.to_string_lossy().to_string();

        unsafe {
            std::env::set_var(env_vars::OUTPUT_ROOT, "/tmp/one_off_env_root");
        }
        let result = update_config_at(&args(&["--set-remote-url", "https://example.com/src"]), &config_path).await;
        unsafe {
            std::env::remove_var(env_vars::OUTPUT_ROOT);
        }
        result.unwrap();

        let saved = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert!(saved.contains("remote_base_url = \"https://example.com/src\""));
        assert!(!saved.contains("/tmp/one_off_env_root"));
        let config = Config::load_from_path(&config_path).await.unwrap();
        assert_eq!(config.output_root, Config::default().output_root);
    }

    #[tokio::test]
    async fn test_config_update_repairs_invalid_file_keeping_other_settings() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            "remote_base_url = \"ftp://old\"\nlocal_data_root = \"/my/data\"\noutput_root = \"/my/out\"\n",
        )
        .await
        .unwrap();
        let config_path = config_path.to_string_lossy().to_string();

        let config = update_config_at(&args(&["--set-remote-url", "https://fixed/"]), &config_path)
            .await
            .unwrap();
        assert_eq!(config.remote_base_url, "https://fixed");

        let saved = Config::load_from_path(&config_path).await.unwrap();
        assert_eq!(saved.remote_base_url, "https://fixed");
        assert_eq!(saved.local_data_root, "/my/data");
        assert_eq!(saved.output_root, "/my/out");
    }

    #[tokio::test]
    async fn test_config_update_propagates_parse_errors() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        tokio::fs::write(&config_path, "remote_base_url = [unclosed")
            .await
            .unwrap();
        let config_path = config_path.to_string_lossy().to_string();

        let result = update_config_at(&args(&["--set-output-root", "/new/out"]), &config_path).await;
        assert!(matches!(result, Err(AppError::TomlDeserialize(_))));

        let untouched = tokio::fs::read_to_string(&config_path).await.unwrap();
        assert_eq!(untouched, "remote_base_url = [unclosed");
    }

    #[tokio::test]
    async fn test_config_update_rejects_invalid_result() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path = config_path.to_string_lossy().to_string();

        let result = update_config_at(&args(&["--set-remote-url", "ftp://nope"]), &config_path).await;
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(!std::path::Path::new(&config_path).exists());
    }

    #[test]
    fn test_predicted_fixtures() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(3, 1);
        let fixtures = predicted_fixtures(&dataset).unwrap();
        assert_eq!(fixtures, vec!["[1] S04 : FCB", "[2] SVW : BVB"]);
    }

    #[test]
    fn test_no_predicted_fixtures_after_season() {
        let dataset = TestDataBuilder::dataset_with_played_rounds(2, 2);
        assert!(predicted_fixtures(&dataset).is_none());
    }
}
