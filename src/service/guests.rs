//! Guest CRUD against the remote store. One statement per operation; the
//! remote endpoint serializes concurrent writers.

use crate::db::Database;
use crate::error::AppError;
use crate::model::{Guest, GuestInput, GuestStatus};
use serde_json::Value;

const INSERT_SQL: &str = "INSERT INTO guests \
    (firstName, lastName, email, partySize, status, events, meal, dietary, allergies, notes, responseDate) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const UPDATE_SQL: &str = "UPDATE guests \
    SET firstName = ?, lastName = ?, email = ?, partySize = ?, status = ?, \
        events = ?, meal = ?, dietary = ?, allergies = ?, notes = ?, responseDate = ?, \
        updatedAt = CURRENT_TIMESTAMP \
    WHERE id = ?";

pub struct GuestService;

impl GuestService {
    /// All guests, most recent responses first; guests who have not
    /// responded sort last.
    pub async fn list(db: &dyn Database) -> Result<Vec<Guest>, AppError> {
        let result = db
            .execute(
                "SELECT * FROM guests ORDER BY responseDate DESC, createdAt DESC",
                &[],
            )
            .await?;
        result
            .rows
            .iter()
            .map(|row| Guest::from_row(row, &result.columns))
            .collect()
    }

    pub async fn get(db: &dyn Database, id: i64) -> Result<Guest, AppError> {
        let result = db
            .execute("SELECT * FROM guests WHERE id = ?", &[Value::from(id)])
            .await?;
        let row = result
            .rows
            .first()
            .ok_or_else(|| AppError::NotFound("Guest not found".to_owned()))?;
        Guest::from_row(row, &result.columns)
    }

    /// Insert a new guest. Requires non-empty firstName, lastName, and
    /// email; everything else takes its default. Returns the record with the
    /// assigned rowid.
    pub async fn create(db: &dyn Database, input: GuestInput) -> Result<Guest, AppError> {
        let mut missing = Vec::new();
        if is_blank(&input.first_name) {
            missing.push("firstName");
        }
        if is_blank(&input.last_name) {
            missing.push("lastName");
        }
        if is_blank(&input.email) {
            missing.push("email");
        }
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let status = input.status.unwrap_or_default();
        let response_date = (status != GuestStatus::Pending).then(today);
        let guest = Guest {
            id: None,
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            party_size: input.party_size.unwrap_or(1),
            status,
            events: input.events,
            meal: input.meal.unwrap_or_default(),
            dietary: input.dietary,
            allergies: input.allergies,
            notes: input.notes.unwrap_or_default(),
            response_date,
            created_at: None,
            updated_at: None,
        };

        let args = vec![
            Value::from(guest.first_name.clone()),
            Value::from(guest.last_name.clone()),
            Value::from(guest.email.clone()),
            Value::from(guest.party_size),
            Value::from(guest.status.as_str()),
            Value::from(serde_json::to_string(&guest.events)?),
            Value::from(guest.meal.clone()),
            Value::from(serde_json::to_string(&guest.dietary)?),
            Value::from(serde_json::to_string(&guest.allergies)?),
            Value::from(guest.notes.clone()),
            opt_value(guest.response_date.clone()),
        ];
        let result = db.execute(INSERT_SQL, &args).await?;
        Ok(Guest {
            id: result.last_insert_rowid,
            ..guest
        })
    }

    /// Full replace of every mutable field. Omitted scalars are written as
    /// NULL and omitted sequences as empty, matching the legacy contract; an
    /// omitted status counts as a response, so responseDate is set. No
    /// existence check: an absent id succeeds with zero rows affected.
    pub async fn update(db: &dyn Database, id: i64, input: GuestInput) -> Result<Guest, AppError> {
        let response_date = match input.status {
            Some(GuestStatus::Pending) => None,
            _ => Some(today()),
        };

        let args = vec![
            opt_value(input.first_name.clone()),
            opt_value(input.last_name.clone()),
            opt_value(input.email.clone()),
            input.party_size.map(Value::from).unwrap_or(Value::Null),
            input
                .status
                .map(|s| Value::from(s.as_str()))
                .unwrap_or(Value::Null),
            Value::from(serde_json::to_string(&input.events)?),
            opt_value(input.meal.clone()),
            Value::from(serde_json::to_string(&input.dietary)?),
            Value::from(serde_json::to_string(&input.allergies)?),
            opt_value(input.notes.clone()),
            opt_value(response_date.clone()),
            Value::from(id),
        ];
        db.execute(UPDATE_SQL, &args).await?;

        // Echo the record as a subsequent read would see it: NULLed scalars
        // come back as their mapper defaults.
        Ok(Guest {
            id: Some(id),
            first_name: input.first_name.unwrap_or_default(),
            last_name: input.last_name.unwrap_or_default(),
            email: input.email.unwrap_or_default(),
            party_size: input.party_size.unwrap_or(1),
            status: input.status.unwrap_or_default(),
            events: input.events,
            meal: input.meal.unwrap_or_default(),
            dietary: input.dietary,
            allergies: input.allergies,
            notes: input.notes.unwrap_or_default(),
            response_date,
            created_at: None,
            updated_at: None,
        })
    }

    /// Hard delete. Succeeds whether or not the id exists.
    pub async fn delete(db: &dyn Database, id: i64) -> Result<(), AppError> {
        db.execute("DELETE FROM guests WHERE id = ?", &[Value::from(id)])
            .await?;
        Ok(())
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

fn opt_value(field: Option<String>) -> Value {
    field.map(Value::from).unwrap_or(Value::Null)
}

/// Current UTC date, the granularity responseDate is recorded at.
fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
