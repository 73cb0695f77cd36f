use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Lifecycle status of a supply request. Mutated only by the approval API;
/// this crate just reads it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "Pending"),
            RequestStatus::Approved => write!(f, "Approved"),
            RequestStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// Product as referenced from a request record.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRef {
    pub name: String,
}

/// School/user reference embedded in a request record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolRef {
    pub school_name: String,
}

/// A school's ask for a quantity of a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub request_id: String,
    /// Absent when the product was deleted upstream; rendered as "N/A".
    #[serde(default)]
    pub product: Option<ProductRef>,
    pub requested_quantity: u32,
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user: Option<SchoolRef>,
}

impl Request {
    /// Product name as displayed, with the upstream placeholder for
    /// unresolved references.
    pub fn product_name(&self) -> &str {
        self.product.as_ref().map(|p| p.name.as_str()).unwrap_or("N/A")
    }
}

/// Wire wrapper for the request endpoints (`{ "requests": [...] }`).
#[derive(Debug, Deserialize)]
pub struct RequestsPayload {
    pub requests: Vec<Request>,
}

/// A school as returned by the users endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(rename = "_id")]
    pub id: String,
    pub school_name: String,
    #[serde(default)]
    pub udise_code: Option<String>,
}

/// Cumulative lifetime counters per product, not deltas. Counters may be
/// absent on the wire and default to 0 during reconciliation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementEntry {
    pub product_name: String,
    #[serde(default)]
    pub created: Option<u64>,
    #[serde(default)]
    pub updated: Option<u64>,
    #[serde(default)]
    pub stock_request_accepted: Option<u64>,
}
