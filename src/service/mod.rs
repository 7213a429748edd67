//! Guest CRUD and reporting services.

mod guests;
mod report;
pub use guests::GuestService;
pub use report::{summarize, to_csv, ReportService, RsvpStats};
