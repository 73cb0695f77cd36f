pub mod grouping;
pub mod selection;
pub mod session;
pub mod stock;

pub use grouping::{group, GroupedRequests};
pub use selection::SelectionTracker;
pub use session::{Action, BusyFlags, ReportSession};
pub use stock::{reconcile, ReconciledStock};
