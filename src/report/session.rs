use crate::error::{ReportError, Result};
use crate::model::{Request, School};

use super::grouping::{self, GroupedRequests};
use super::selection::SelectionTracker;

/// Document builds that must not overlap with another build of the same
/// kind. Unrelated kinds may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Invoice,
    Receipt,
    StatusUpdate,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::Invoice => "invoice",
            Action::Receipt => "receipt",
            Action::StatusUpdate => "status update",
        }
    }
}

/// One busy flag per action type; a second build of the same kind is
/// refused while the first is in flight.
#[derive(Debug, Default)]
pub struct BusyFlags {
    invoice: bool,
    receipt: bool,
    status_update: bool,
}

impl BusyFlags {
    fn flag(&mut self, action: Action) -> &mut bool {
        match action {
            Action::Invoice => &mut self.invoice,
            Action::Receipt => &mut self.receipt,
            Action::StatusUpdate => &mut self.status_update,
        }
    }

    pub fn try_begin(&mut self, action: Action) -> Result<()> {
        let flag = self.flag(action);
        if *flag {
            return Err(ReportError::Busy(action.label()));
        }
        *flag = true;
        Ok(())
    }

    pub fn finish(&mut self, action: Action) {
        *self.flag(action) = false;
    }
}

/// Issues monotonically increasing fetch tokens so a stale response can be
/// recognized and dropped instead of overwriting a newer one.
#[derive(Debug, Default)]
struct FetchSequencer {
    next: u64,
    latest: u64,
}

impl FetchSequencer {
    fn issue(&mut self) -> u64 {
        self.next += 1;
        self.latest = self.next;
        self.next
    }

    fn is_current(&self, token: u64) -> bool {
        token == self.latest
    }
}

/// Per-view state for one report: the grouped fetch result, the selection
/// over it, and the school it belongs to. Owned by the view that fetched
/// it; nothing here is shared or global.
#[derive(Debug, Default)]
pub struct ReportSession {
    grouped: GroupedRequests,
    selection: SelectionTracker,
    school: Option<School>,
    sequencer: FetchSequencer,
    pub busy: BusyFlags,
}

impl ReportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `school`. Prior grouped data and selection are
    /// cleared up front, so a failed fetch leaves an intentionally empty
    /// result rather than stale data from a different school. Returns the
    /// token to pass to `complete_fetch`.
    pub fn begin_fetch(&mut self, school: Option<School>) -> u64 {
        self.grouped = GroupedRequests::default();
        self.selection = SelectionTracker::new();
        self.school = school;
        self.sequencer.issue()
    }

    /// Install a fetch result. Returns false (and changes nothing) when a
    /// newer fetch has been started since `token` was issued. With
    /// `preselect` every request starts selected (admin view); without it
    /// nothing is preselected (user view).
    pub fn complete_fetch(&mut self, token: u64, requests: Vec<Request>, preselect: bool) -> bool {
        if !self.sequencer.is_current(token) {
            return false;
        }

        self.grouped = grouping::group(requests);
        if preselect {
            self.selection.initialize(self.grouped.request_ids(), true);
        } else {
            self.selection = SelectionTracker::new();
        }
        true
    }

    pub fn grouped(&self) -> &GroupedRequests {
        &self.grouped
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionTracker {
        &mut self.selection
    }

    pub fn school(&self) -> Option<&School> {
        self.school.as_ref()
    }

    /// Narrow the selection down to exactly the given ids. Ids that were
    /// not part of the fetched result are refused; repeating an id is
    /// harmless.
    pub fn restrict_selection(&mut self, ids: &[String]) -> Result<()> {
        let known = self.grouped.request_ids();
        for id in ids {
            if !known.contains(id) {
                return Err(ReportError::UnknownRequestId(id.clone()));
            }
        }
        self.selection.initialize(known, false);
        for id in ids {
            self.selection.set(id, true);
        }
        Ok(())
    }

    /// Selected requests flattened across all date groups in arrival
    /// order. Input shape for the invoice builder, which wants one row
    /// per request in the order the requests came in.
    pub fn selected_flat(&self) -> Vec<&Request> {
        self.grouped
            .flat_arrival()
            .filter(|r| self.selection.is_selected(&r.request_id))
            .collect()
    }
}
