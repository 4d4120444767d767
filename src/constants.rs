//! Application-wide constants and configuration defaults
//!
//! Centralizes source locations, file naming pieces and feature defaults.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of idle connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 4;

/// Default root of the versioned remote JSON source.
///
/// The source must serve `{country}/{season_label}/{league}.json` and
/// `{league}.clubs.json` below this root. Point `--set-remote-url` at a mirror
/// in that layout when the default does not provide the requested season.
pub const DEFAULT_REMOTE_BASE_URL: &str =
    "https://raw.githubusercontent.com/openfootball/football.json/v1";

/// Default local data root, relative to the working directory
pub const DEFAULT_LOCAL_DATA_ROOT: &str = "data";

/// Default output root for CSV artifacts, relative to the working directory
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "fixture_export";

/// Default log file name
pub const LOG_FILE_NAME: &str = "fixture_export.log";

/// Source document naming
pub mod documents {
    /// Suffix of the clubs document, e.g. `1.clubs.json`
    pub const CLUBS_SUFFIX: &str = "clubs.json";

    /// Suffix of the rounds document, e.g. `1.json`
    pub const ROUNDS_SUFFIX: &str = "json";

    /// Suffix of the optional club metadata document, e.g. `1.meta.json`
    pub const CLUB_META_SUFFIX: &str = "meta.json";
}

/// Feature engineering defaults
pub mod features {
    /// Matchdays skipped before a match is used as training data
    pub const DEFAULT_MIN_MATCHES: usize = 5;

    /// Rolling form windows, in matches
    pub const FORM_WINDOWS: [usize; 2] = [3, 5];

    /// Marker column added to the full export
    pub const DATA_SET_COLUMN: &str = "data_set";
}

/// Environment variables that override config file values
pub mod env_vars {
    pub const REMOTE_URL: &str = "FIXTURE_EXPORT_REMOTE_URL";

    pub const LOCAL_ROOT: &str = "FIXTURE_EXPORT_LOCAL_ROOT";

    pub const OUTPUT_ROOT: &str = "FIXTURE_EXPORT_OUTPUT_ROOT";

    pub const HTTP_TIMEOUT: &str = "FIXTURE_EXPORT_HTTP_TIMEOUT";

    pub const LOG_FILE: &str = "FIXTURE_EXPORT_LOG_FILE";
}
