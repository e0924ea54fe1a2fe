//! View-model wiring: one struct that ties fields, search, selections,
//! conversion and persistence together on the cooperative scheduler.
//!
//! External callers (a UI, the CLI driver, tests) feed events in — raw
//! keystrokes, focus transitions, suggestion picks, reference-date changes
//! — and read state out: live field text, committed values, suggestion
//! lists, the converted result. All mutation runs serially on the caller's
//! thread; deferred work is drained after each event's synchronous section,
//! and debounce timers fire when the caller advances the logical clock.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::config::Settings;
use crate::core::controller::{ConversionController, ConversionView};
use crate::core::index::LocationIndex;
use crate::core::scheduler::{Action, Scheduler};
use crate::core::search::SearchPipeline;
use crate::core::timemath::{self, Converted};
use crate::core::validation::{
    CommitOutcome, FIELD_LOCATION1, FIELD_LOCATION2, FIELD_TIME, ValidationEngine,
};
use crate::core::Slot;
use crate::models::{Location, LocationId};
use crate::utils::date;

/// Default pair used when nothing was persisted: the named cities if the
/// dataset has them, else the first two entries.
const DEFAULT_NAMES: [&str; 2] = ["New York", "London"];

pub struct Session {
    index: Arc<LocationIndex>,
    engine: ValidationEngine,
    pipeline: SearchPipeline,
    controller: ConversionController,
    sched: Scheduler,
    selected: [Option<LocationId>; 2],
    settings: Settings,
    store_path: Option<PathBuf>,
}

impl Session {
    /// Build a session starting from the local clock.
    pub fn new(index: Arc<LocationIndex>, settings: Settings) -> Self {
        let now = chrono::Local::now().time();
        Self::with_start(index, settings, date::today(), now)
    }

    /// Build a session with an explicit reference date and seed time.
    /// Tests and the CLI driver use this for determinism.
    pub fn with_start(
        index: Arc<LocationIndex>,
        settings: Settings,
        reference_date: NaiveDate,
        start_time: NaiveTime,
    ) -> Self {
        let mut engine = ValidationEngine::new();

        let time_seed = start_time.format("%H:%M").to_string();
        engine.register(
            FIELD_TIME,
            &time_seed,
            Some(Box::new(|text| timemath::normalize(text).is_some())),
        );
        for slot in Slot::ALL {
            let idx = Arc::clone(&index);
            engine.register(
                slot.field_id(),
                "",
                Some(Box::new(move |text| idx.find_canonical(text).is_some())),
            );
        }

        let mut session = Self {
            index,
            engine,
            pipeline: SearchPipeline::new(),
            controller: ConversionController::new(reference_date),
            sched: Scheduler::new(),
            selected: [None, None],
            settings,
            store_path: None,
        };

        for slot in Slot::ALL {
            session.restore_slot(slot);
        }
        session.controller.mark_dirty(&mut session.sched);
        session
    }

    /// Persist selection changes to `path` from now on.
    pub fn with_store(mut self, path: PathBuf) -> Self {
        self.store_path = Some(path);
        self
    }

    fn restore_slot(&mut self, slot: Slot) {
        let persisted = self
            .settings
            .slot(slot.index())
            .and_then(|p| self.index.find_by_name_country(&p.name, &p.country))
            .map(|l| l.id);

        let id = persisted.or_else(|| {
            self.index
                .find_by_name(DEFAULT_NAMES[slot.index()])
                .map(|l| l.id)
                .or_else(|| self.index.get(LocationId(slot.index() as u32)).map(|l| l.id))
        });

        if let Some(id) = id
            && let Some(canonical) = self.index.get(id).map(|l| l.canonical_text())
        {
            self.engine.set_field_value(slot.field_id(), &canonical);
            self.selected[slot.index()] = Some(id);
        }
    }

    // ---------------------------
    // Events in
    // ---------------------------

    /// A live-text write into a field (keystroke or programmatic). Marks
    /// the field tentative and, for location fields, restarts the search
    /// debounce.
    pub fn keystroke(&mut self, field: &str, text: &str) {
        self.engine.set_value(field, text);
        for slot in Slot::ALL {
            if field == slot.field_id() {
                self.pipeline.text_changed(slot, &mut self.sched);
            }
        }
        self.pump();
    }

    /// Focus arrived on a field. The transition protocol (committing the
    /// previously focused field) runs on the next tick.
    pub fn focus_gained(&mut self, field: &str) {
        self.engine.schedule_focus_gained(field, &mut self.sched);
        self.pump();
    }

    /// Focus left a field; its value is judged on the next tick.
    pub fn focus_lost(&mut self, field: &str) {
        self.engine.schedule_focus_lost(field, &mut self.sched);
        self.pump();
    }

    /// A suggestion was picked for a slot. Goes through the programmatic
    /// commit path: the canonical text is valid by construction.
    pub fn choose_suggestion(&mut self, slot: Slot, id: LocationId) {
        let Some(canonical) = self.index.get(id).map(|l| l.canonical_text()) else {
            return;
        };
        self.engine.set_field_value(slot.field_id(), &canonical);
        self.selected[slot.index()] = Some(id);
        self.pipeline.clear(slot, &mut self.sched);
        self.persist();
        self.controller.mark_dirty(&mut self.sched);
        self.pump();
    }

    pub fn set_reference_date(&mut self, reference_date: NaiveDate) {
        self.controller.set_reference_date(reference_date);
        self.controller.mark_dirty(&mut self.sched);
        self.pump();
    }

    /// Exchange the two selections and both fields' full value pairs
    /// atomically. Two valid values stay valid after a swap, so neither
    /// field is re-validated (no revert flash).
    pub fn swap_locations(&mut self) {
        self.engine.swap_fields(FIELD_LOCATION1, FIELD_LOCATION2);
        self.selected.swap(0, 1);
        for slot in Slot::ALL {
            self.pipeline.clear(slot, &mut self.sched);
        }
        self.persist();
        self.controller.mark_dirty(&mut self.sched);
        self.pump();
    }

    /// Force the commit procedure on a field outside a focus transition.
    pub fn commit_field(&mut self, field: &str) {
        self.commit_and_react(field);
        self.pump();
    }

    /// Advance the logical clock, firing due debounce timers.
    pub fn advance(&mut self, ms: u64) {
        self.sched.advance(ms);
        self.pump();
    }

    /// Advance until no deferred work or timer remains.
    pub fn run_until_idle(&mut self) {
        self.pump();
        while let Some(deadline) = self.sched.next_deadline() {
            let step = deadline.saturating_sub(self.sched.now_ms()).max(1);
            self.advance(step);
        }
    }

    // ---------------------------
    // State out
    // ---------------------------

    pub fn field_text(&self, field: &str) -> Option<&str> {
        self.engine.field(field).map(|f| f.current_value.as_str())
    }

    pub fn committed(&self, field: &str) -> Option<&str> {
        self.engine.field(field).map(|f| f.last_valid.as_str())
    }

    pub fn suggestions(&self, slot: Slot) -> Vec<&Location> {
        self.pipeline
            .results(slot)
            .iter()
            .filter_map(|id| self.index.get(*id))
            .collect()
    }

    pub fn selected(&self, slot: Slot) -> Option<&Location> {
        self.selected[slot.index()].and_then(|id| self.index.get(id))
    }

    pub fn conversion(&self) -> Option<&Converted> {
        self.controller.result()
    }

    pub fn view(&self) -> ConversionView {
        self.controller.view()
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.controller.reference_date()
    }

    /// Read-only access to the validation engine (introspection, commit
    /// journal).
    pub fn engine(&self) -> &ValidationEngine {
        &self.engine
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_idle(&self) -> bool {
        self.sched.is_idle()
    }

    // ---------------------------
    // Internals
    // ---------------------------

    /// Drain the next-tick queue. Handlers run serially; a handler may
    /// enqueue further work, which runs in the same drain.
    fn pump(&mut self) {
        while let Some(action) = self.sched.pop() {
            self.apply(action);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::FocusGained(id) => {
                if let Some(previous) = self.engine.begin_focus(&id) {
                    self.commit_and_react(&previous);
                }
            }
            Action::FocusLost(id) => {
                self.engine.end_focus(&id);
                self.commit_and_react(&id);
            }
            Action::Search(slot) => {
                let query = self
                    .engine
                    .field(slot.field_id())
                    .map(|f| f.current_value.clone())
                    .unwrap_or_default();
                let canonical = self.selected[slot.index()]
                    .and_then(|id| self.index.get(id))
                    .map(|l| l.canonical_text());
                self.pipeline
                    .refresh(slot, &query, canonical.as_deref(), &self.index);
            }
            Action::Recompute => {
                let time_text = self
                    .engine
                    .field(FIELD_TIME)
                    .map(|f| f.last_valid.clone())
                    .unwrap_or_default();
                let from = self.selected[0].and_then(|id| self.index.get(id));
                let to = self.selected[1].and_then(|id| self.index.get(id));
                self.controller.recompute(&time_text, from, to);
            }
        }
    }

    /// Run the commit procedure and propagate its consequences: a committed
    /// time marks the conversion dirty; a committed location text resolves
    /// back to its Location, updates the slot's selection and persists it.
    fn commit_and_react(&mut self, field: &str) {
        let outcome = self.engine.commit(field);
        if outcome != CommitOutcome::Committed {
            return;
        }

        if field == FIELD_TIME {
            self.controller.mark_dirty(&mut self.sched);
            return;
        }

        for slot in Slot::ALL {
            if field == slot.field_id() {
                let committed = self
                    .engine
                    .field(field)
                    .map(|f| f.last_valid.clone())
                    .unwrap_or_default();
                if let Some(id) = self.index.find_canonical(&committed).map(|l| l.id) {
                    self.selected[slot.index()] = Some(id);
                    self.persist();
                }
                self.controller.mark_dirty(&mut self.sched);
            }
        }
    }

    /// Mirror the current selections into the settings and write them out.
    /// A failed write must not break the input loop, so it is best-effort.
    fn persist(&mut self) {
        for slot in Slot::ALL {
            if let Some(location) = self.selected[slot.index()].and_then(|id| self.index.get(id)) {
                self.settings.remember(slot.index(), location);
            }
        }
        if let Some(path) = &self.store_path {
            let _ = self.settings.save_to(path);
        }
    }
}
