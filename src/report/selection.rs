use std::collections::HashMap;

use super::grouping::GroupedRequests;

/// Which requests are currently checked for inclusion in a generated
/// document. An id absent from the map counts as unselected.
///
/// This is an owned value: whichever view fetched the grouped result owns
/// the tracker and passes it down by reference, so switching reports can
/// never leak selection between views.
#[derive(Debug, Default, Clone)]
pub struct SelectionTracker {
    selected: HashMap<String, bool>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the tracker to `default` for every given id. Called with
    /// `true` after an admin fetch (everything preselected) and with an
    /// empty id list in the user-facing view.
    pub fn initialize<I, S>(&mut self, ids: I, default: bool)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected.clear();
        for id in ids {
            self.selected.insert(id.into(), default);
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.get(id).copied().unwrap_or(false)
    }

    /// Flip one id. An absent id is unselected, so the first toggle
    /// selects it.
    pub fn toggle(&mut self, id: &str) {
        let current = self.is_selected(id);
        self.selected.insert(id.to_string(), !current);
    }

    /// Set one id to an explicit value, regardless of its current state.
    pub fn set(&mut self, id: &str, selected: bool) {
        self.selected.insert(id.to_string(), selected);
    }

    /// Group-level select-all / clear-all. A group with mixed selection is
    /// "not fully selected", so the action selects every member.
    pub fn toggle_group(&mut self, date_key: &str, grouped: &GroupedRequests) {
        let Some(members) = grouped.get(date_key) else {
            return;
        };

        let all_selected = members.iter().all(|r| self.is_selected(&r.request_id));
        for request in members {
            self.selected
                .insert(request.request_id.clone(), !all_selected);
        }
    }

    /// The same all-or-nothing rule applied across every group.
    pub fn toggle_all(&mut self, grouped: &GroupedRequests) {
        let all_selected = grouped.flat().all(|r| self.is_selected(&r.request_id));
        for request in grouped.flat() {
            self.selected
                .insert(request.request_id.clone(), !all_selected);
        }
    }

    /// Gates whether a generate control is shown at all.
    pub fn is_any_selected(&self) -> bool {
        self.selected.values().any(|&v| v)
    }

    /// True iff every given id is selected; drives the select-all vs
    /// clear-all affordance.
    pub fn is_all_selected<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter().all(|id| self.is_selected(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::grouping::{self, date_key};
    use chrono::{TimeZone, Utc};

    fn grouped_fixture() -> GroupedRequests {
        let day1 = Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap();
        let day2 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        grouping::group(vec![
            grouping::test_request("a", "Pencils", 1, day1),
            grouping::test_request("b", "Chalk", 2, day1),
            grouping::test_request("c", "Notebooks", 3, day2),
        ])
    }

    #[test]
    fn absent_id_is_unselected_and_toggles_on() {
        let mut tracker = SelectionTracker::new();
        assert!(!tracker.is_selected("a"));

        tracker.toggle("a");
        assert!(tracker.is_selected("a"));

        tracker.toggle("a");
        assert!(!tracker.is_selected("a"));
    }

    #[test]
    fn set_is_idempotent() {
        let mut tracker = SelectionTracker::new();
        tracker.set("a", true);
        tracker.set("a", true);
        assert!(tracker.is_selected("a"));

        tracker.set("a", false);
        assert!(!tracker.is_selected("a"));
    }

    #[test]
    fn initialize_preselects_everything() {
        let grouped = grouped_fixture();
        let mut tracker = SelectionTracker::new();
        tracker.initialize(grouped.request_ids(), true);

        assert!(tracker.is_any_selected());
        assert!(tracker.is_all_selected(["a", "b", "c"]));
    }

    #[test]
    fn toggle_group_selects_all_from_mixed_state() {
        let grouped = grouped_fixture();
        let key = date_key(Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap());

        let mut tracker = SelectionTracker::new();
        tracker.toggle("a"); // mixed: a selected, b not

        tracker.toggle_group(&key, &grouped);
        assert!(tracker.is_selected("a"));
        assert!(tracker.is_selected("b"));

        // Fully selected group toggles off.
        tracker.toggle_group(&key, &grouped);
        assert!(!tracker.is_selected("a"));
        assert!(!tracker.is_selected("b"));
    }

    #[test]
    fn toggle_group_twice_restores_an_untouched_group() {
        let grouped = grouped_fixture();
        let key = date_key(Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap());

        let mut tracker = SelectionTracker::new();
        tracker.toggle_group(&key, &grouped);
        tracker.toggle_group(&key, &grouped);

        assert!(!tracker.is_selected("a"));
        assert!(!tracker.is_selected("b"));
    }

    #[test]
    fn toggle_all_round_trip() {
        let grouped = grouped_fixture();
        let mut tracker = SelectionTracker::new();

        tracker.toggle_all(&grouped);
        let ids = grouped.request_ids();
        assert!(tracker.is_all_selected(ids.iter().map(String::as_str)));

        tracker.toggle_all(&grouped);
        assert!(!tracker.is_any_selected());
    }
}
