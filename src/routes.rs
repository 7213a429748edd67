//! Router assembly: guest CRUD, reporting, health, CORS, and JSON fallbacks.

use crate::handlers::{guests, report};
use crate::state::AppState;
use axum::{
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    message: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        message: "Wedding RSVP API is running",
    })
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({ "error": "Method Not Allowed" })),
    )
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}

/// Full application router. Every route answers CORS preflight; unsupported
/// methods on known routes answer 405 with a JSON body.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/guests",
            get(guests::list)
                .post(guests::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/guests/:id",
            get(guests::get)
                .put(guests::update)
                .delete(guests::delete)
                .fallback(method_not_allowed),
        )
        .route(
            "/export-csv",
            get(report::export_csv).fallback(method_not_allowed),
        )
        .route("/stats", get(report::stats).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}
