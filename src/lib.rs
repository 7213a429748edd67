//! Wedding RSVP backend: guest CRUD and reporting over a remote libsql HTTP
//! endpoint.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::DbConfig;
pub use db::{Cell, Column, Database, HttpDatabase, QueryResult};
pub use error::{AppError, ConfigError};
pub use model::{Guest, GuestInput, GuestStatus};
pub use routes::app;
pub use service::{GuestService, ReportService, RsvpStats};
pub use state::AppState;
pub use store::ensure_guests_table;
