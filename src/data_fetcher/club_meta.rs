//! Optional club metadata enrichment, joined to clubs by code

use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::api::DocumentKind;
use super::local::local_document_path;
use crate::season::SeasonKey;

/// Scalar metadata fields of one club, in source order
pub type ClubMeta = Map<String, Value>;

/// Club code -> metadata fields
pub type ClubMetaMap = HashMap<String, ClubMeta>;

/// Supplies metadata for a set of clubs.
///
/// Never fails: a disabled or unreachable source yields an empty map.
pub trait ClubMetaSource: Send + Sync {
    fn load(&self, codes: &[String]) -> impl Future<Output = ClubMetaMap> + Send;
}

/// Source used when enrichment is switched off
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClubMeta;

impl ClubMetaSource for NoClubMeta {
    async fn load(&self, _codes: &[String]) -> ClubMetaMap {
        ClubMetaMap::new()
    }
}

/// Reads `{root}/{country}/{season}/{league}.meta.json`, an object keyed by club code
#[derive(Debug, Clone)]
pub struct LocalClubMeta {
    path: PathBuf,
}

impl LocalClubMeta {
    pub fn new(root: impl Into<PathBuf>, key: &SeasonKey) -> Self {
        let root = root.into();
        Self {
            path: local_document_path(&root, key, DocumentKind::ClubMeta),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ClubMetaSource for LocalClubMeta {
    async fn load(&self, codes: &[String]) -> ClubMetaMap {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Club metadata not available at {}: {}",
                    self.path.display(),
                    e
                );
                return ClubMetaMap::new();
            }
        };

        let document: Map<String, Value> = match serde_json::from_str(&text) {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    "Ignoring unparseable club metadata {}: {}",
                    self.path.display(),
                    e
                );
                return ClubMetaMap::new();
            }
        };

        let meta = select_scalar_meta(document, codes);
        info!("Loaded metadata for {} clubs", meta.len());
        meta
    }
}

/// Enrichment choice made once per run
#[derive(Debug, Clone)]
pub enum ClubMetaLoader {
    Disabled(NoClubMeta),
    Local(LocalClubMeta),
}

impl ClubMetaLoader {
    pub fn new(enabled: bool, root: impl Into<PathBuf>, key: &SeasonKey) -> Self {
        if enabled {
            ClubMetaLoader::Local(LocalClubMeta::new(root, key))
        } else {
            ClubMetaLoader::Disabled(NoClubMeta)
        }
    }
}

impl ClubMetaSource for ClubMetaLoader {
    async fn load(&self, codes: &[String]) -> ClubMetaMap {
        match self {
            ClubMetaLoader::Disabled(source) => source.load(codes).await,
            ClubMetaLoader::Local(source) => source.load(codes).await,
        }
    }
}

/// Keeps requested clubs only, and only their scalar fields
fn select_scalar_meta(document: Map<String, Value>, codes: &[String]) -> ClubMetaMap {
    let mut meta = ClubMetaMap::new();
    for (code, fields) in document {
        if !codes.contains(&code) {
            debug!("Skipping metadata for unknown club {code}");
            continue;
        }
        let Value::Object(fields) = fields else {
            warn!("Metadata for club {code} is not an object, skipping");
            continue;
        };
        let scalars: ClubMeta = fields
            .into_iter()
            .filter(|(_, value)| !value.is_object() && !value.is_array())
            .collect();
        meta.insert(code, scalars);
    }
    meta
}
