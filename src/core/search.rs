//! Debounced incremental city search.
//!
//! Each location field's live text feeds a suggestion list after a quiet
//! period with no further keystrokes; a newer keystroke cancels the pending
//! recomputation, so only the latest query ever runs. The list is replaced
//! atomically, never patched.

use crate::core::Slot;
use crate::core::index::LocationIndex;
use crate::core::scheduler::{Action, Scheduler, TimerKey};
use crate::models::LocationId;

/// Quiet period before a query runs.
pub const SEARCH_DEBOUNCE_MS: u64 = 150;
/// Upper bound on the suggestion list.
pub const MAX_SUGGESTIONS: usize = 10;

#[derive(Debug, Default)]
pub struct SearchPipeline {
    suggestions: [Vec<LocationId>; 2],
}

impl SearchPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Note a live-text change on a slot's field: (re)start its debounce
    /// timer, superseding any pending search for that slot.
    pub fn text_changed(&mut self, slot: Slot, sched: &mut Scheduler) {
        sched.debounce(
            TimerKey::Search(slot),
            SEARCH_DEBOUNCE_MS,
            Action::Search(slot),
        );
    }

    /// Run the query for a slot and atomically replace its list.
    ///
    /// Two suppressions: an empty query matches nothing, and a query equal
    /// to the canonical text of the slot's current selection matches
    /// nothing (otherwise the dropdown would reopen right after a selection
    /// round-trips through the field).
    pub fn refresh(
        &mut self,
        slot: Slot,
        query: &str,
        selected_canonical: Option<&str>,
        index: &LocationIndex,
    ) {
        let trimmed = query.trim();

        let results = if trimmed.is_empty() || selected_canonical == Some(trimmed) {
            Vec::new()
        } else {
            index
                .search(trimmed, MAX_SUGGESTIONS)
                .into_iter()
                .map(|l| l.id)
                .collect()
        };

        self.suggestions[slot.index()] = results;
    }

    /// Drop a slot's list and cancel any pending query for it. Used when a
    /// suggestion is picked or the slots are swapped.
    pub fn clear(&mut self, slot: Slot, sched: &mut Scheduler) {
        sched.cancel(TimerKey::Search(slot));
        self.suggestions[slot.index()] = Vec::new();
    }

    pub fn results(&self, slot: Slot) -> &[LocationId] {
        &self.suggestions[slot.index()]
    }
}
