use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// CellValue – a single scalar cell of the dataset
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring what the backend's JSON carries.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for a numeric series.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl From<&JsonValue> for CellValue {
    fn from(val: &JsonValue) -> Self {
        match val {
            JsonValue::String(s) => CellValue::String(s.clone()),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    CellValue::Float(f)
                } else {
                    CellValue::String(n.to_string())
                }
            }
            JsonValue::Bool(b) => CellValue::Bool(*b),
            JsonValue::Null => CellValue::Null,
            other => CellValue::String(other.to_string()),
        }
    }
}

/// One row of the dataset: column name → cell value.
pub type Record = BTreeMap<String, CellValue>;

/// Column names shown to the user have underscores rendered as spaces.
pub fn humanize(name: &str) -> String {
    name.replace('_', " ")
}

// ---------------------------------------------------------------------------
// DatasetSummary – the sample of rows seeding column selection
// ---------------------------------------------------------------------------

/// A small sample of the uploaded dataset, fetched once per gateway call and
/// immutable afterwards. Every row carries exactly the columns listed in
/// `column_names` (the decoder enforces this), in the backend's order.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub column_names: Vec<String>,
    pub rows: Vec<Record>,
}

impl DatasetSummary {
    /// Number of sample rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PlotResult – backend-computed records for one plot request
// ---------------------------------------------------------------------------

/// Records returned by the plot endpoint, in backend order. Only the columns
/// named by the originating request are consumed; anything else a record
/// carries is ignored.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotResult {
    pub records: Vec<Record>,
}
