//! Read-only reporting over the guest list: aggregate statistics and CSV
//! export.

use crate::db::Database;
use crate::error::AppError;
use crate::model::{Guest, GuestStatus};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpStats {
    pub total_invited: u64,
    pub attending: u64,
    pub pending: u64,
    pub declined: u64,
    /// Sum of party sizes: people, not households.
    pub total_guests: i64,
    pub households: u64,
    /// Integer percentage of guests who have responded; 0 when nobody is
    /// invited yet.
    pub response_rate: i64,
}

const CSV_HEADER: [&str; 11] = [
    "First Name",
    "Last Name",
    "Email",
    "Party Size",
    "Status",
    "Events",
    "Meal",
    "Dietary",
    "Allergies",
    "Notes",
    "Response Date",
];

pub struct ReportService;

impl ReportService {
    pub async fn stats(db: &dyn Database) -> Result<RsvpStats, AppError> {
        let guests = Self::fetch(db, "SELECT * FROM guests").await?;
        Ok(summarize(&guests))
    }

    pub async fn export_csv(db: &dyn Database) -> Result<String, AppError> {
        let guests = Self::fetch(db, "SELECT * FROM guests ORDER BY responseDate DESC").await?;
        Ok(to_csv(&guests))
    }

    async fn fetch(db: &dyn Database, sql: &str) -> Result<Vec<Guest>, AppError> {
        let result = db.execute(sql, &[]).await?;
        result
            .rows
            .iter()
            .map(|row| Guest::from_row(row, &result.columns))
            .collect()
    }
}

pub fn summarize(guests: &[Guest]) -> RsvpStats {
    let total = guests.len() as u64;
    let count = |status: GuestStatus| guests.iter().filter(|g| g.status == status).count() as u64;
    let pending = count(GuestStatus::Pending);
    let responded = total - pending;
    let response_rate = if total > 0 {
        ((responded as f64 / total as f64) * 100.0).round() as i64
    } else {
        0
    };
    RsvpStats {
        total_invited: total,
        attending: count(GuestStatus::Attending),
        pending,
        declined: count(GuestStatus::Declined),
        total_guests: guests.iter().map(|g| g.party_size).sum(),
        households: total,
        response_rate,
    }
}

/// Legacy quoting scheme, kept for compatibility with existing consumers of
/// the export: every cell is double-quoted and embedded quotes, commas, and
/// newlines in field values are NOT escaped.
pub fn to_csv(guests: &[Guest]) -> String {
    let mut lines = Vec::with_capacity(guests.len() + 1);
    lines.push(quote_row(CSV_HEADER.iter().map(|h| (*h).to_owned())));
    for g in guests {
        lines.push(quote_row(
            [
                g.first_name.clone(),
                g.last_name.clone(),
                g.email.clone(),
                g.party_size.to_string(),
                g.status.as_str().to_owned(),
                g.events.join("; "),
                g.meal.clone(),
                g.dietary.join("; "),
                g.allergies.join("; "),
                g.notes.clone(),
                g.response_date.clone().unwrap_or_default(),
            ]
            .into_iter(),
        ));
    }
    lines.join("\n")
}

fn quote_row(cells: impl Iterator<Item = String>) -> String {
    cells
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(",")
}
