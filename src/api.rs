use std::time::Duration;

use serde::de::DeserializeOwned;
use ureq::Agent;

use crate::config::ApiSettings;
use crate::error::{ReportError, Result};
use crate::model::{RequestsPayload, School, StockMovementEntry};

/// Client for the remote supply API. Read-only: request records, school
/// records and stock counters come from here; approval mutations live
/// upstream. No retry/backoff — a failed call surfaces as a transient
/// `UpstreamFetch` error and leaves unrelated state alone.
pub struct ApiClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(10)))
            .build()
            .into();

        Self {
            agent,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.agent.get(&url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }

        let body = request
            .call()
            .map_err(|e| ReportError::UpstreamFetch(e.to_string()))?
            .body_mut()
            .read_to_string()
            .map_err(|e| ReportError::UpstreamFetch(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ReportError::UpstreamFetch(e.to_string()))
    }

    /// All schools, deduplicated by display name keeping the first record
    /// seen for each.
    pub fn fetch_schools(&self) -> Result<Vec<School>> {
        let users: Vec<School> = self.get_json("/api/auth/users")?;

        let mut seen = std::collections::HashSet::new();
        Ok(users
            .into_iter()
            .filter(|school| seen.insert(school.school_name.clone()))
            .collect())
    }

    /// Approved requests for one school.
    pub fn fetch_approved_requests(&self, school_id: &str) -> Result<Vec<crate::model::Request>> {
        let payload: RequestsPayload =
            self.get_json(&format!("/requests/approved-requests/{school_id}"))?;
        Ok(payload.requests)
    }

    /// Raw stock-movement counters for every product.
    pub fn fetch_stock_log(&self) -> Result<Vec<StockMovementEntry>> {
        self.get_json("/api/auth/productlog")
    }
}
