//! Application command handlers, one use case per module.

pub mod amend_report;
pub mod configure_site;
pub mod delete_rows;
pub mod query_summary;
pub mod submit_report;

pub use amend_report::{AmendReportError, AmendReportHandler};
pub use configure_site::ConfigureSiteHandler;
pub use delete_rows::{DeleteRowsError, DeleteRowsHandler};
pub use query_summary::{QuerySummaryError, QuerySummaryHandler};
pub use submit_report::{SubmitReportError, SubmitReportHandler};
