use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

use crate::constants::features::DEFAULT_MIN_MATCHES;
use crate::features::FeatureConfig;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// True when the run only touches configuration and exports nothing
pub fn is_config_command(args: &Args) -> bool {
    args.list_config
        || args.new_remote_url.is_some()
        || args.new_local_root.is_some()
        || args.new_output_root.is_some()
}

/// Football fixture exporter
///
/// Downloads (or reads locally) the clubs and match rounds of one league season
/// and writes machine-learning ready CSV files: a training set built from the
/// played rounds and a test set for the next round to predict.
///
/// Files are written to the configured output root as
/// `{timestamp}_{season}_{country}_{league}_{train|test|full}.csv`.
#[derive(Parser, Debug, Clone)]
#[command(about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Two digit start year of the season, e.g. 16 for 2016-2017.
    #[arg(short = 'y', long = "year", default_value_t = 16, value_parser = clap::value_parser!(u8).range(0..100), help_heading = "Season")]
    pub year: u8,

    /// Country code of the league, e.g. de, es, en, it.
    #[arg(short = 'c', long = "country", default_value = "de", help_heading = "Season")]
    pub country: String,

    /// League identifier within the country, e.g. 1 for the top division.
    #[arg(short = 'l', long = "league", default_value = "1", help_heading = "Season")]
    pub league: String,

    /// Read season documents from the local data root instead of the remote source.
    #[arg(short = 'L', long = "local", help_heading = "Season")]
    pub local: bool,

    /// Columns to drop from the generated CSV, separated by semicolons,
    /// e.g. "form_delta_last_3;team_h_form_last_5".
    #[arg(short = 'e', long = "exclude", value_delimiter = ';', help_heading = "Export")]
    pub exclude: Vec<String>,

    /// Number of opening rounds that never become training data.
    #[arg(short = 'm', long = "min-matches", default_value_t = DEFAULT_MIN_MATCHES, help_heading = "Export")]
    pub min_matches: usize,

    /// Add club metadata from `{league}.meta.json` next to the local season documents.
    #[arg(short = 'M', long = "club-meta", help_heading = "Export")]
    pub club_meta: bool,

    /// Also write one CSV with training and test rows and a data_set column.
    #[arg(short = 'F', long = "full", help_heading = "Export")]
    pub full: bool,

    /// Put every unplayed match into the test set, not only the next round.
    #[arg(short = 'C', long = "complete", help_heading = "Export")]
    pub complete: bool,

    /// Prepend round number and club codes to every row for easier reading.
    #[arg(short = 'V', long = "verbose", help_heading = "Export")]
    pub verbose: bool,

    /// Print the league table after the last completed round.
    #[arg(short = 'T', long = "tables", help_heading = "Export")]
    pub tables: bool,

    /// Write CSV files to this directory for this run instead of the configured output root.
    #[arg(short = 'o', long = "output-dir", help_heading = "Export")]
    pub output_dir: Option<String>,

    /// List current configuration settings
    #[arg(long = "list-config", help_heading = "Configuration")]
    pub list_config: bool,

    /// Update the remote source base URL in config. The source must serve
    /// `{country}/{season}/{league}.json` and `{league}.clubs.json`.
    #[arg(long = "set-remote-url", value_name = "URL", help_heading = "Configuration")]
    pub new_remote_url: Option<String>,

    /// Update the local data root in config.
    #[arg(long = "set-local-root", value_name = "DIR", help_heading = "Configuration")]
    pub new_local_root: Option<String>,

    /// Update the output root in config.
    #[arg(long = "set-output-root", value_name = "DIR", help_heading = "Configuration")]
    pub new_output_root: Option<String>,

    /// Enable debug level logging for this crate.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

impl Args {
    /// Feature options selected on the command line
    pub fn feature_config(&self) -> FeatureConfig {
        FeatureConfig {
            min_matches: self.min_matches,
            exclude: self
                .exclude
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            verbose: self.verbose,
            complete: self.complete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["fixture_export"]).unwrap();
        assert_eq!(args.year, 16);
        assert_eq!(args.country, "de");
        assert_eq!(args.league, "1");
        assert_eq!(args.min_matches, DEFAULT_MIN_MATCHES);
        assert!(args.exclude.is_empty());
        assert!(!args.local && !args.full && !args.complete && !args.tables);
        assert!(!is_config_command(&args));
    }

    #[test]
    fn test_exclude_list_is_split_on_semicolons() {
        let args = Args::try_parse_from([
            "fixture_export",
            "--exclude",
            "form_delta_last_3;team_h_form_last_5;",
        ])
        .unwrap();
        assert_eq!(
            args.feature_config().exclude,
            vec!["form_delta_last_3", "team_h_form_last_5"]
        );
    }

    #[test]
    fn test_year_out_of_range_is_rejected() {
        assert!(Args::try_parse_from(["fixture_export", "--year", "100"]).is_err());
        assert!(Args::try_parse_from(["fixture_export", "-y", "99"]).is_ok());
    }

    #[test]
    fn test_short_flags() {
        let args =
            Args::try_parse_from(["fixture_export", "-y", "15", "-c", "es", "-L", "-F", "-C", "-V", "-T", "-M", "-m", "3"])
                .unwrap();
        assert_eq!(args.year, 15);
        assert_eq!(args.country, "es");
        assert!(args.local && args.full && args.complete && args.verbose && args.tables && args.club_meta);

        let config = args.feature_config();
        assert_eq!(config.min_matches, 3);
        assert!(config.verbose && config.complete);
    }

    #[test]
    fn test_config_commands() {
        let args = Args::try_parse_from(["fixture_export", "--set-output-root", "/tmp/out"]).unwrap();
        assert!(is_config_command(&args));
        let args = Args::try_parse_from(["fixture_export", "--list-config"]).unwrap();
        assert!(is_config_command(&args));
    }
}
