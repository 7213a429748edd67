//! Guest records and the mapping from raw result rows.

use crate::db::{Cell, Column};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// RSVP state of a guest. Anything else in the stored column (including
/// null, which a legacy full-replace update can leave behind) reads back as
/// pending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    #[default]
    Pending,
    Attending,
    Declined,
}

impl GuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Pending => "pending",
            GuestStatus::Attending => "attending",
            GuestStatus::Declined => "declined",
        }
    }

    fn from_stored(s: Option<&str>) -> GuestStatus {
        match s {
            Some("attending") => GuestStatus::Attending,
            Some("declined") => GuestStatus::Declined,
            _ => GuestStatus::Pending,
        }
    }
}

/// One RSVP record representing a household/party.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub party_size: i64,
    pub status: GuestStatus,
    pub events: Vec<String>,
    pub meal: String,
    pub dietary: Vec<String>,
    pub allergies: Vec<String>,
    pub notes: String,
    pub response_date: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Guest {
    /// Map one raw row to a typed record. Builds a column-name lookup from
    /// the decoded cells, then derives each field with its default. The
    /// multi-value fields are stored as JSON text; corrupt text fails the
    /// whole row rather than reading back as empty.
    pub fn from_row(row: &[Cell], columns: &[Column]) -> Result<Guest, AppError> {
        let mut fields: HashMap<&str, Value> = HashMap::new();
        for (index, column) in columns.iter().enumerate() {
            let value = row.get(index).map(Cell::decode).unwrap_or(Value::Null);
            fields.insert(column.name(), value);
        }

        Ok(Guest {
            id: int_field(&fields, "id"),
            first_name: text_field(&fields, "firstName"),
            last_name: text_field(&fields, "lastName"),
            email: text_field(&fields, "email"),
            party_size: int_field(&fields, "partySize").unwrap_or(1),
            status: GuestStatus::from_stored(
                fields.get("status").and_then(Value::as_str),
            ),
            events: list_field(&fields, "events")?,
            meal: text_field(&fields, "meal"),
            dietary: list_field(&fields, "dietary")?,
            allergies: list_field(&fields, "allergies")?,
            notes: text_field(&fields, "notes"),
            response_date: opt_text_field(&fields, "responseDate"),
            created_at: opt_text_field(&fields, "createdAt"),
            updated_at: opt_text_field(&fields, "updatedAt"),
        })
    }
}

/// Integer columns arrive as JSON numbers or as decimal strings depending on
/// the endpoint's cell encoding.
fn int_field(fields: &HashMap<&str, Value>, name: &str) -> Option<i64> {
    match fields.get(name) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

fn text_field(fields: &HashMap<&str, Value>, name: &str) -> String {
    fields
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Empty stored text reads back as absent, matching the legacy wire format.
fn opt_text_field(fields: &HashMap<&str, Value>, name: &str) -> Option<String> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn list_field(
    fields: &HashMap<&str, Value>,
    name: &'static str,
) -> Result<Vec<String>, AppError> {
    match fields.get(name).and_then(Value::as_str) {
        Some(text) if !text.is_empty() => serde_json::from_str(text)
            .map_err(|source| AppError::MalformedRecord { column: name, source }),
        _ => Ok(Vec::new()),
    }
}

/// Creation/replacement fields as supplied by the caller. Absent scalars stay
/// `None` so a full-replace update writes them as NULL, exactly as the
/// legacy API did; absent sequences become empty.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuestInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub party_size: Option<i64>,
    pub status: Option<GuestStatus>,
    pub events: Vec<String>,
    pub meal: Option<String>,
    pub dietary: Vec<String>,
    pub allergies: Vec<String>,
    pub notes: Option<String>,
}
