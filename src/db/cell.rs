//! Wire shapes of the tabular result returned by the remote query endpoint.
//!
//! Cells arrive either as plain JSON scalars or as tagged objects such as
//! `{"type": "integer", "value": "5"}` and `{"type": "null"}`. Column
//! descriptors are either bare name strings or objects with a `name` field.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One raw result cell.
#[derive(Clone, Debug)]
pub enum Cell {
    /// Tagged object of type "null".
    Null,
    /// Plain scalar (string, number, boolean, or JSON null).
    Scalar(Value),
    /// Any other object; the full shape is retained.
    Tagged(Value),
}

impl Cell {
    fn classify(v: Value) -> Cell {
        match v {
            Value::Object(ref obj) => {
                if obj.get("type").and_then(Value::as_str) == Some("null") {
                    Cell::Null
                } else {
                    Cell::Tagged(v)
                }
            }
            other => Cell::Scalar(other),
        }
    }

    /// Decoded value: null for null-tagged cells, the `value` property for
    /// tagged cells that carry one, otherwise the cell unchanged.
    pub fn decode(&self) -> Value {
        match self {
            Cell::Null => Value::Null,
            Cell::Scalar(v) => v.clone(),
            Cell::Tagged(v) => v.get("value").cloned().unwrap_or_else(|| v.clone()),
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = Value::deserialize(deserializer)?;
        Ok(Cell::classify(v))
    }
}

/// One column descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    Named { name: String },
    Plain(String),
}

impl Column {
    pub fn name(&self) -> &str {
        match self {
            Column::Named { name } => name,
            Column::Plain(name) => name,
        }
    }
}
