use crate::model::StockMovementEntry;

/// Received/balance/disbursed figures derived from the raw movement
/// counters of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledStock {
    pub product_name: String,
    pub received: u64,
    pub balance: u64,
    /// Signed: goes negative when the accepted counter runs ahead of the
    /// received counters. That inconsistency is upstream data the admin
    /// needs to see, so it is reported as-is, never clamped.
    pub disbursed: i64,
}

/// Reconcile movement counters in input order. No entry is dropped;
/// absent counters count as 0.
pub fn reconcile(entries: &[StockMovementEntry]) -> Vec<ReconciledStock> {
    entries
        .iter()
        .map(|entry| {
            let created = entry.created.unwrap_or(0);
            let updated = entry.updated.unwrap_or(0);
            let received = created.max(updated);
            let balance = entry.stock_request_accepted.unwrap_or(0);

            ReconciledStock {
                product_name: entry.product_name.clone(),
                received,
                balance,
                disbursed: received as i64 - balance as i64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        name: &str,
        created: Option<u64>,
        updated: Option<u64>,
        accepted: Option<u64>,
    ) -> StockMovementEntry {
        StockMovementEntry {
            product_name: name.to_string(),
            created,
            updated,
            stock_request_accepted: accepted,
        }
    }

    #[test]
    fn received_is_max_of_created_and_updated() {
        let out = reconcile(&[entry("Pencils", Some(10), Some(7), Some(4))]);
        assert_eq!(
            out,
            vec![ReconciledStock {
                product_name: "Pencils".to_string(),
                received: 10,
                balance: 4,
                disbursed: 6,
            }]
        );
    }

    #[test]
    fn absent_counters_default_to_zero_and_negatives_survive() {
        let out = reconcile(&[entry("Chalk", Some(5), None, Some(9))]);
        assert_eq!(
            out,
            vec![ReconciledStock {
                product_name: "Chalk".to_string(),
                received: 5,
                balance: 9,
                disbursed: -4,
            }]
        );
    }

    #[test]
    fn input_order_is_preserved() {
        let out = reconcile(&[
            entry("Zebra Crayons", Some(1), None, None),
            entry("Atlas", None, Some(2), None),
        ]);
        let names: Vec<&str> = out.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, ["Zebra Crayons", "Atlas"]);
    }
}
