//! Statement execution against the remote database's HTTP batch endpoint.

use crate::config::DbConfig;
use crate::db::cell::{Cell, Column};
use crate::error::AppError;
use crate::sql::inline_params;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Normalized result of one executed statement.
#[derive(Clone, Debug, Default)]
pub struct QueryResult {
    pub rows: Vec<Vec<Cell>>,
    pub columns: Vec<Column>,
    pub last_insert_rowid: Option<i64>,
}

/// Executes one SQL statement per call. The production implementation talks
/// to the remote endpoint; tests substitute canned results.
#[async_trait]
pub trait Database: Send + Sync {
    async fn execute(&self, sql: &str, args: &[Value]) -> Result<QueryResult, AppError>;
}

/// Remote libsql endpoint reached over HTTPS with a bearer credential. Holds
/// no state beyond the fixed configuration and a reusable HTTP client.
#[derive(Clone)]
pub struct HttpDatabase {
    client: reqwest::Client,
    config: DbConfig,
}

impl HttpDatabase {
    pub fn new(config: DbConfig) -> Self {
        HttpDatabase {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Database for HttpDatabase {
    async fn execute(&self, sql: &str, args: &[Value]) -> Result<QueryResult, AppError> {
        let final_sql = inline_params(sql, args);
        tracing::debug!(sql = %final_sql, "execute");

        let body = serde_json::json!({
            "requests": [
                { "type": "execute", "stmt": { "sql": final_sql } }
            ]
        });
        let response = self
            .client
            .post(format!("{}/v2/pipeline", self.config.http_url))
            .bearer_auth(&self.config.auth_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status, body = %body, "database request failed");
            return Err(AppError::QueryFailed { status, body });
        }

        let envelope: PipelineResponse = response.json().await?;
        Ok(unwrap_envelope(envelope))
    }
}

#[derive(Deserialize)]
struct PipelineResponse {
    #[serde(default)]
    results: Vec<PipelineResult>,
}

#[derive(Deserialize)]
struct PipelineResult {
    #[serde(default)]
    response: Option<ExecuteResponse>,
}

#[derive(Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    result: Option<StatementResult>,
}

#[derive(Deserialize)]
struct StatementResult {
    #[serde(default)]
    rows: Vec<Vec<Cell>>,
    #[serde(default)]
    cols: Vec<Column>,
    #[serde(default)]
    last_insert_rowid: Option<RowId>,
}

/// The endpoint reports rowids as decimal strings; older versions used bare
/// integers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RowId {
    Int(i64),
    Text(String),
}

impl RowId {
    fn as_i64(&self) -> Option<i64> {
        match self {
            RowId::Int(n) => Some(*n),
            RowId::Text(s) => s.parse().ok(),
        }
    }
}

/// Extract the first nested successful result; anything else is an empty
/// result set.
fn unwrap_envelope(envelope: PipelineResponse) -> QueryResult {
    let Some(result) = envelope
        .results
        .into_iter()
        .next()
        .and_then(|r| r.response)
        .and_then(|r| r.result)
    else {
        return QueryResult::default();
    };
    QueryResult {
        rows: result.rows,
        columns: result.cols,
        last_insert_rowid: result.last_insert_rowid.and_then(|id| id.as_i64()),
    }
}
