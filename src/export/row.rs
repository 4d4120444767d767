use serde_json::{Map, Value};
use std::fmt;

/// One exported record. Column order is insertion order.
pub type Row = Map<String, Value>;

/// The artifacts produced by an export run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Train,
    Test,
    Full,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Train => "train",
            ArtifactKind::Test => "test",
            ArtifactKind::Full => "full",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of one row-set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArtifactSummary {
    pub rows: usize,
    pub columns: usize,
    pub data_points: usize,
}

/// Row and column counts of a row-set. Columns are taken from the first row.
pub fn summarize(rows: &[Row]) -> ArtifactSummary {
    let columns = rows.first().map_or(0, Map::len);
    ArtifactSummary {
        rows: rows.len(),
        columns,
        data_points: rows.len() * columns,
    }
}

/// Column names of the first row
pub fn column_names(rows: &[Row]) -> Vec<&str> {
    rows.first()
        .map(|row| row.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Text of one CSV cell
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
