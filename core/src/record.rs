//! Record classification
//!
//! A raw record arrives as loosely typed strings. Classification decodes the
//! indicator flags and assigns every record a cell in the shared grid. The
//! grid position depends on the record's input index only, never on its
//! flags, so two passes over the same input line up cell for cell.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::layout::GridLayout;

/// Flag value that marks an indicator as set
const FLAG_SET: &str = "1";

/// A record as received from the data source. Never mutated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Stable identity, if the source provides one
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,

    /// Positive indicator, `"1"` when set
    #[serde(default, deserialize_with = "lenient_string")]
    pub positive: Option<String>,

    /// Negative indicator, `"1"` when set
    #[serde(default, deserialize_with = "lenient_string")]
    pub negative: Option<String>,

    /// Categorical sentiment label
    #[serde(default, deserialize_with = "lenient_string")]
    pub sentiment: Option<String>,

    /// Columns the visualization does not interpret
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl RawRecord {
    /// Convenience constructor used by loaders and tests
    pub fn new(positive: &str, negative: &str, sentiment: &str) -> Self {
        Self {
            positive: Some(positive.to_owned()),
            negative: Some(negative.to_owned()),
            sentiment: Some(sentiment.to_owned()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Accepts strings, numbers and booleans for a text column.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Which indicator drives the "filled" style of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagField {
    Positive,
    Negative,
}

impl fmt::Display for FlagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagField::Positive => write!(f, "positive"),
            FlagField::Negative => write!(f, "negative"),
        }
    }
}

/// A raw record with decoded flags and grid placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// Element identity: the record id, or the input index when absent
    pub key: String,

    /// Position in the input sequence
    pub index: usize,

    /// Indicator this record was classified for
    pub flag: FlagField,

    pub is_positive: bool,
    pub is_negative: bool,

    pub grid_column: usize,
    pub grid_row: usize,

    pub pixel_x: f64,
    pub pixel_y: f64,

    /// Sentiment label, absent when the raw record has none or an empty one
    pub sentiment_label: Option<String>,
}

impl ClassifiedRecord {
    /// Whether the cell carries the filled style for its grid
    pub fn is_filled(&self) -> bool {
        match self.flag {
            FlagField::Positive => self.is_positive,
            FlagField::Negative => self.is_negative,
        }
    }
}

fn decode_flag(raw: Option<&str>) -> bool {
    raw == Some(FLAG_SET)
}

/// Classify `records` for one indicator.
///
/// Both flags are decoded on every record; `flag` only selects which one
/// drives [`ClassifiedRecord::is_filled`]. Malformed flags decode to `false`.
pub fn classify(records: &[RawRecord], flag: FlagField, layout: &GridLayout) -> Vec<ClassifiedRecord> {
    records
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let (grid_column, grid_row) = layout.cell(index);
            let (pixel_x, pixel_y) = layout.pixel(grid_column, grid_row);

            let key = match raw.id.as_deref() {
                Some(id) if !id.is_empty() => id.to_owned(),
                _ => index.to_string(),
            };

            ClassifiedRecord {
                key,
                index,
                flag,
                is_positive: decode_flag(raw.positive.as_deref()),
                is_negative: decode_flag(raw.negative.as_deref()),
                grid_column,
                grid_row,
                pixel_x,
                pixel_y,
                sentiment_label: raw.sentiment.clone().filter(|label| !label.is_empty()),
            }
        })
        .collect()
}
