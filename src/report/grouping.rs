use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::HashMap;

use crate::model::Request;

/// Display format for group keys, local calendar day.
const DATE_KEY_FORMAT: &str = "%d/%m/%Y";

/// Requests partitioned by the calendar day they were created, with a
/// separately maintained key order (most recent day first).
///
/// The keys are display strings (`dd/mm/yyyy`), so ordering parses each key
/// back into a calendar date instead of comparing strings; the two disagree
/// across month and year boundaries.
#[derive(Debug, Default, Clone)]
pub struct GroupedRequests {
    groups: HashMap<String, Vec<Request>>,
    sorted_keys: Vec<String>,
    /// Keys in the order a request first arrived for each day; drives the
    /// arrival-order flatten used by document builders.
    arrival_keys: Vec<String>,
}

/// Format a request timestamp as its local-day group key.
pub fn date_key(created_at: DateTime<Utc>) -> String {
    created_at
        .with_timezone(&Local)
        .format(DATE_KEY_FORMAT)
        .to_string()
}

/// Partition requests into date-keyed groups, preserving arrival order
/// within each group. Empty input yields an empty grouping.
pub fn group(requests: Vec<Request>) -> GroupedRequests {
    let mut groups: HashMap<String, Vec<Request>> = HashMap::new();
    let mut arrival_keys: Vec<String> = Vec::new();

    for request in requests {
        let key = date_key(request.created_at);
        let bucket = groups.entry(key.clone()).or_default();
        if bucket.is_empty() {
            arrival_keys.push(key);
        }
        bucket.push(request);
    }

    let mut sorted_keys: Vec<String> = groups.keys().cloned().collect();
    sorted_keys.sort_by_key(|key| std::cmp::Reverse(parse_date_key(key)));

    GroupedRequests {
        groups,
        sorted_keys,
        arrival_keys,
    }
}

/// Reconstruct the calendar date behind a `dd/mm/yyyy` key. Keys are
/// produced by `date_key`, so a parse failure cannot happen for keys that
/// came out of `group`; an unparsable key sorts last.
fn parse_date_key(key: &str) -> NaiveDate {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).unwrap_or(NaiveDate::MIN)
}

impl GroupedRequests {
    /// Date keys, most recent calendar day first.
    pub fn sorted_keys(&self) -> &[String] {
        &self.sorted_keys
    }

    pub fn get(&self, key: &str) -> Option<&[Request]> {
        self.groups.get(key).map(|g| g.as_slice())
    }

    /// All requests flattened in key order (then arrival order within a day).
    pub fn flat(&self) -> impl Iterator<Item = &Request> {
        self.sorted_keys
            .iter()
            .filter_map(|key| self.groups.get(key))
            .flatten()
    }

    /// All requests flattened by first-encounter group order instead of
    /// display order. This is the traversal the document builders use, so
    /// rows and aggregation totals come out in the order the requests
    /// arrived, day by day.
    pub fn flat_arrival(&self) -> impl Iterator<Item = &Request> {
        self.arrival_keys
            .iter()
            .filter_map(|key| self.groups.get(key))
            .flatten()
    }

    /// All request ids, in the same order as `flat`.
    pub fn request_ids(&self) -> Vec<String> {
        self.flat().map(|r| r.request_id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_request(
    id: &str,
    product: &str,
    qty: u32,
    created_at: DateTime<Utc>,
) -> Request {
    use crate::model::{ProductRef, RequestStatus};

    Request {
        request_id: id.to_string(),
        product: Some(ProductRef {
            name: product.to_string(),
        }),
        requested_quantity: qty,
        status: RequestStatus::Approved,
        created_at,
        user: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(id: &str, product: &str, qty: u32, created_at: DateTime<Utc>) -> Request {
        test_request(id, product, qty, created_at)
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn empty_input_yields_empty_grouping() {
        let grouped = group(Vec::new());
        assert!(grouped.is_empty());
        assert!(grouped.sorted_keys().is_empty());
    }

    #[test]
    fn grouping_is_a_partition_by_calendar_day() {
        let requests = vec![
            request("r1", "Pencils", 10, at(2024, 4, 30, 11)),
            request("r2", "Chalk", 5, at(2024, 4, 30, 13)),
            request("r3", "Notebooks", 20, at(2024, 5, 1, 12)),
        ];
        let grouped = group(requests);

        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped.sorted_keys().len(), 2);

        // Every request lands in exactly one group, keyed by its own day.
        for key in grouped.sorted_keys() {
            for req in grouped.get(key).unwrap() {
                assert_eq!(&date_key(req.created_at), key);
            }
        }
    }

    #[test]
    fn arrival_order_is_preserved_within_a_group() {
        let requests = vec![
            request("r2", "Chalk", 5, at(2024, 4, 30, 13)),
            request("r1", "Pencils", 10, at(2024, 4, 30, 11)),
        ];
        let grouped = group(requests);

        let key = &grouped.sorted_keys()[0];
        let ids: Vec<&str> = grouped
            .get(key)
            .unwrap()
            .iter()
            .map(|r| r.request_id.as_str())
            .collect();
        assert_eq!(ids, ["r2", "r1"]);
    }

    #[test]
    fn keys_sort_by_calendar_date_not_lexicographically() {
        // "01/05/2024" < "30/04/2024" as strings, but is the later day.
        let requests = vec![
            request("r1", "Pencils", 10, at(2024, 4, 30, 12)),
            request("r2", "Chalk", 5, at(2024, 5, 1, 12)),
        ];
        let grouped = group(requests);

        let keys = grouped.sorted_keys();
        assert_eq!(keys[0], date_key(at(2024, 5, 1, 12)));
        assert_eq!(keys[1], date_key(at(2024, 4, 30, 12)));
    }

    #[test]
    fn flat_walks_groups_newest_first() {
        let requests = vec![
            request("old", "Pencils", 1, at(2023, 12, 31, 12)),
            request("new", "Chalk", 2, at(2024, 1, 1, 12)),
        ];
        let grouped = group(requests);

        let ids: Vec<&str> = grouped.flat().map(|r| r.request_id.as_str()).collect();
        assert_eq!(ids, ["new", "old"]);
    }

    #[test]
    fn flat_arrival_walks_groups_as_first_encountered() {
        // Same input as above plus a second old-day request arriving last:
        // the old day was encountered first, so its whole group leads.
        let requests = vec![
            request("old1", "Pencils", 1, at(2023, 12, 31, 12)),
            request("new", "Chalk", 2, at(2024, 1, 1, 12)),
            request("old2", "Atlas", 3, at(2023, 12, 31, 13)),
        ];
        let grouped = group(requests);

        let ids: Vec<&str> = grouped
            .flat_arrival()
            .map(|r| r.request_id.as_str())
            .collect();
        assert_eq!(ids, ["old1", "old2", "new"]);
    }
}
