//! HTTP handlers for reporting: aggregate stats and CSV export.

use crate::error::AppError;
use crate::service::{ReportService, RsvpStats};
use crate::state::AppState;
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};

pub async fn stats(State(state): State<AppState>) -> Result<Json<RsvpStats>, AppError> {
    Ok(Json(ReportService::stats(state.db.as_ref()).await?))
}

pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let csv = ReportService::export_csv(state.db.as_ref()).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=wedding-guests.csv",
            ),
        ],
        csv,
    ))
}
