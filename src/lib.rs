pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod pdf;
pub mod report;

pub use config::{Config, Organization};
pub use document::{build_invoice, build_receipt, build_stock_report, Document};
pub use error::{ReportError, Result};
pub use model::{Request, RequestStatus, School, StockMovementEntry};
pub use report::{group, reconcile, GroupedRequests, ReportSession, SelectionTracker};
