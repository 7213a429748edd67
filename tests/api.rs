//! End-to-end route tests with a canned executor standing in for the remote
//! database.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use rsvp_backend::{app, AppError, AppState, Cell, Column, Database, QueryResult};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

struct StubDb {
    result: QueryResult,
}

#[async_trait]
impl Database for StubDb {
    async fn execute(&self, _sql: &str, _args: &[Value]) -> Result<QueryResult, AppError> {
        Ok(self.result.clone())
    }
}

fn state_with(result: QueryResult) -> AppState {
    AppState {
        db: Arc::new(StubDb { result }),
    }
}

fn guest_columns() -> Vec<Column> {
    serde_json::from_value(json!([
        {"name": "id"}, {"name": "firstName"}, {"name": "lastName"}, {"name": "email"},
        {"name": "partySize"}, {"name": "status"}, {"name": "events"}, {"name": "meal"},
        {"name": "dietary"}, {"name": "allergies"}, {"name": "notes"},
        {"name": "responseDate"}, {"name": "createdAt"}, {"name": "updatedAt"}
    ]))
    .expect("columns")
}

fn guest_row(
    id: i64,
    first: &str,
    party_size: i64,
    status: &str,
    events: &str,
    response_date: Option<&str>,
) -> Vec<Cell> {
    let date_cell = match response_date {
        Some(d) => json!({"type": "text", "value": d}),
        None => json!({"type": "null"}),
    };
    serde_json::from_value(json!([
        {"type": "integer", "value": id.to_string()},
        {"type": "text", "value": first},
        {"type": "text", "value": "Tester"},
        {"type": "text", "value": "tester@example.com"},
        {"type": "integer", "value": party_size.to_string()},
        {"type": "text", "value": status},
        {"type": "text", "value": events},
        {"type": "null"},
        {"type": "text", "value": "[]"},
        {"type": "text", "value": "[]"},
        {"type": "null"},
        date_cell,
        {"type": "text", "value": "2024-05-01 09:00:00"},
        {"type": "null"}
    ]))
    .expect("row")
}

fn guests_table(rows: Vec<Vec<Cell>>) -> QueryResult {
    QueryResult {
        rows,
        columns: guest_columns(),
        last_insert_rowid: None,
    }
}

async fn send(state: AppState, request: Request<Body>) -> Response<Body> {
    app(state).oneshot(request).await.expect("response")
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn lists_guests_as_a_json_array() {
    let state = state_with(guests_table(vec![
        guest_row(1, "Ada", 2, "attending", "[\"ceremony\"]", Some("2024-06-01")),
        guest_row(2, "Grace", 1, "pending", "[]", None),
    ]));
    let response = send(state, get("/guests")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let guests = body.as_array().expect("array");
    assert_eq!(guests.len(), 2);
    assert_eq!(guests[0]["firstName"], "Ada");
    assert_eq!(guests[0]["events"], json!(["ceremony"]));
    assert_eq!(guests[1]["responseDate"], Value::Null);
}

#[tokio::test]
async fn missing_guest_is_404() {
    let response = send(state_with(QueryResult::default()), get("/guests/99")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Guest not found"}));
}

#[tokio::test]
async fn create_returns_201_with_assigned_id() {
    let state = state_with(QueryResult {
        last_insert_rowid: Some(42),
        ..QueryResult::default()
    });
    let response = send(
        state,
        json_request(
            Method::POST,
            "/guests",
            json!({"firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["id"], 42);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["responseDate"], Value::Null);
    assert_eq!(body["partySize"], 1);
}

#[tokio::test]
async fn create_without_required_fields_is_400() {
    let response = send(
        state_with(QueryResult::default()),
        json_request(Method::POST, "/guests", json!({"firstName": "Ada"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let message = body["error"].as_str().expect("message");
    assert!(message.contains("lastName"));
    assert!(message.contains("email"));
}

#[tokio::test]
async fn update_replaces_and_echoes_the_guest() {
    let response = send(
        state_with(QueryResult::default()),
        json_request(
            Method::PUT,
            "/guests/5",
            json!({
                "firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com",
                "status": "declined", "partySize": 2
            }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["status"], "declined");
    assert!(body["responseDate"].is_string());
}

#[tokio::test]
async fn delete_reports_success_even_for_absent_ids() {
    let response = send(
        state_with(QueryResult::default()),
        Request::builder()
            .method(Method::DELETE)
            .uri("/guests/12345")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Guest deleted successfully"})
    );
}

#[tokio::test]
async fn unsupported_method_is_405_with_json_body() {
    let response = send(
        state_with(QueryResult::default()),
        Request::builder()
            .method(Method::PATCH)
            .uri("/guests")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await, json!({"error": "Method Not Allowed"}));
}

#[tokio::test]
async fn unknown_route_is_404_with_json_body() {
    let response = send(state_with(QueryResult::default()), get("/nope")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "Not Found"}));
}

#[tokio::test]
async fn health_reports_ok() {
    let response = send(state_with(QueryResult::default()), get("/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn stats_aggregates_the_guest_list() {
    let state = state_with(guests_table(vec![
        guest_row(1, "A", 2, "attending", "[]", Some("2024-06-01")),
        guest_row(2, "B", 3, "attending", "[]", Some("2024-06-02")),
        guest_row(3, "C", 1, "pending", "[]", None),
        guest_row(4, "D", 4, "declined", "[]", Some("2024-06-03")),
    ]));
    let response = send(state, get("/stats")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({
            "totalInvited": 4,
            "attending": 2,
            "pending": 1,
            "declined": 1,
            "totalGuests": 10,
            "households": 4,
            "responseRate": 75
        })
    );
}

#[tokio::test]
async fn csv_export_quotes_every_cell() {
    let state = state_with(guests_table(vec![guest_row(
        1,
        "Ada",
        2,
        "attending",
        "[\"Wedding\",\"Reception\"]",
        Some("2024-06-01"),
    )]));
    let response = send(state, get("/export-csv")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=wedding-guests.csv"
    );

    let csv = body_text(response).await;
    let mut lines = csv.lines();
    assert!(lines.next().expect("header").starts_with("\"First Name\","));
    let row = lines.next().expect("row");
    assert!(row.contains("\"Wedding; Reception\""));
    assert!(row.contains("\"2024-06-01\""));
}

#[tokio::test]
async fn preflight_is_answered_for_any_origin() {
    let response = send(
        state_with(QueryResult::default()),
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/guests")
            .header(header::ORIGIN, "https://wedding.example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn cross_origin_responses_carry_allow_origin() {
    let response = send(
        state_with(guests_table(Vec::new())),
        Request::builder()
            .uri("/guests")
            .header(header::ORIGIN, "https://wedding.example.com")
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
