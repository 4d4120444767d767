//! Source addressing: `{country}/{season_label}/{league}.{suffix}`

use crate::constants::documents;
use crate::season::SeasonKey;

/// The documents published for every season
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Clubs,
    Rounds,
    ClubMeta,
}

impl DocumentKind {
    fn suffix(self) -> &'static str {
        match self {
            DocumentKind::Clubs => documents::CLUBS_SUFFIX,
            DocumentKind::Rounds => documents::ROUNDS_SUFFIX,
            DocumentKind::ClubMeta => documents::CLUB_META_SUFFIX,
        }
    }
}

/// File name of a document within its season directory.
///
/// # Example
/// ```
/// use fixture_export::data_fetcher::api::{DocumentKind, document_file_name};
/// use fixture_export::season::SeasonKey;
///
/// let key = SeasonKey::new(16, "de", "1").unwrap();
/// assert_eq!(document_file_name(&key, DocumentKind::Clubs), "1.clubs.json");
/// assert_eq!(document_file_name(&key, DocumentKind::Rounds), "1.json");
/// ```
pub fn document_file_name(key: &SeasonKey, kind: DocumentKind) -> String {
    format!("{}.{}", key.league(), kind.suffix())
}

/// Relative document path shared by the remote and local sources.
///
/// # Example
/// ```
/// use fixture_export::data_fetcher::api::{DocumentKind, build_document_path};
/// use fixture_export::season::SeasonKey;
///
/// let key = SeasonKey::new(16, "de", "1").unwrap();
/// assert_eq!(build_document_path(&key, DocumentKind::Rounds), "de/2016-2017/1.json");
/// ```
pub fn build_document_path(key: &SeasonKey, kind: DocumentKind) -> String {
    format!(
        "{}/{}/{}",
        key.country(),
        key.season_label(),
        document_file_name(key, kind)
    )
}

/// Absolute URL of a document under the remote base URL.
///
/// # Example
/// ```
/// use fixture_export::data_fetcher::api::{DocumentKind, build_document_url};
/// use fixture_export::season::SeasonKey;
///
/// let key = SeasonKey::new(16, "de", "1").unwrap();
/// let url = build_document_url("https://example.com/football/", &key, DocumentKind::Clubs);
/// assert_eq!(url, "https://example.com/football/de/2016-2017/1.clubs.json");
/// ```
pub fn build_document_url(base_url: &str, key: &SeasonKey, kind: DocumentKind) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        build_document_path(key, kind)
    )
}
