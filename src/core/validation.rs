//! Per-field validation state machine.
//!
//! Every field keeps a live value and the last value that passed its rule.
//! Typed values stay tentative until a focus transition (or an explicit
//! commit) judges them: valid text is promoted to `last_valid`, invalid
//! text snaps back to it. Programmatic writes through [`ValidationEngine::
//! set_field_value`] bypass the rule on purpose; the caller guarantees the
//! value is already canonical.
//!
//! Focus transitions are handled on the next scheduler tick, never inside
//! the event that caused them; the session drains the queue so that the
//! commit of a previously focused field observably completes before any
//! later event touches the newly focused one.

use std::collections::HashMap;

use crate::core::scheduler::{Action, Scheduler};

pub const FIELD_TIME: &str = "time";
pub const FIELD_LOCATION1: &str = "location1";
pub const FIELD_LOCATION2: &str = "location2";

/// Predicate deciding whether a field's text may be committed.
pub type ValidationRule = Box<dyn Fn(&str) -> bool>;

/// Validation state of one logical input field.
///
/// Invariant: immediately after any commit, `current_value == last_valid`
/// and `needs_validation == false`.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub id: String,
    pub current_value: String,
    pub last_valid: String,
    pub is_focused: bool,
    pub needs_validation: bool,
}

impl FieldState {
    fn new(id: &str, default_value: &str) -> Self {
        Self {
            id: id.to_string(),
            current_value: default_value.to_string(),
            last_valid: default_value.to_string(),
            is_focused: false,
            needs_validation: false,
        }
    }
}

/// What the commit procedure did to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Value passed the rule; `last_valid` was promoted.
    Committed,
    /// Value failed the rule; visible text snapped back to `last_valid`.
    Reverted,
    /// Nothing to judge (`needs_validation` was false).
    Unchanged,
}

/// Journal entry recording one run of the commit procedure. The sequence
/// number makes commit ordering observable across fields.
#[derive(Debug, Clone)]
pub struct CommitRecord {
    pub seq: u64,
    pub field: String,
    pub outcome: CommitOutcome,
}

/// Owns all field states, their rules, and the focus-transition protocol.
pub struct ValidationEngine {
    fields: HashMap<String, FieldState>,
    rules: HashMap<String, ValidationRule>,
    focused: Option<String>,
    journal: Vec<CommitRecord>,
    seq: u64,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationEngine {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            rules: HashMap::new(),
            focused: None,
            journal: Vec::new(),
            seq: 0,
        }
    }

    /// Register a field. Idempotent: re-registering an existing id returns
    /// the existing state unchanged and keeps its original rule.
    pub fn register(
        &mut self,
        id: &str,
        default_value: &str,
        rule: Option<ValidationRule>,
    ) -> &FieldState {
        if !self.fields.contains_key(id) {
            self.fields.insert(id.to_string(), FieldState::new(id, default_value));
            if let Some(rule) = rule {
                self.rules.insert(id.to_string(), rule);
            }
        }
        &self.fields[id]
    }

    pub fn field(&self, id: &str) -> Option<&FieldState> {
        self.fields.get(id)
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    /// Live-text write (keystroke or programmatic). Never commits or
    /// reverts; it only tracks whether the value diverged from `last_valid`.
    /// Unregistered ids are ignored.
    pub fn set_value(&mut self, id: &str, value: &str) {
        if let Some(state) = self.fields.get_mut(id) {
            state.current_value = value.to_string();
            state.needs_validation = state.current_value != state.last_valid;
        }
    }

    /// Record the focus flag on the field itself. The transition protocol
    /// (previous-field commit etc.) is driven separately via the scheduler.
    pub fn note_focus(&mut self, id: &str, focused: bool) {
        if let Some(state) = self.fields.get_mut(id) {
            state.is_focused = focused;
        }
    }

    /// Enqueue the deferred part of a focus-gained event.
    pub fn schedule_focus_gained(&mut self, id: &str, sched: &mut Scheduler) {
        self.note_focus(id, true);
        sched.defer(Action::FocusGained(id.to_string()));
    }

    /// Enqueue the deferred part of a focus-lost event.
    pub fn schedule_focus_lost(&mut self, id: &str, sched: &mut Scheduler) {
        self.note_focus(id, false);
        sched.defer(Action::FocusLost(id.to_string()));
    }

    /// Deferred focus-gained tick: record the newly focused field and hand
    /// back the previously focused one, which must be committed before
    /// anything else runs.
    pub fn begin_focus(&mut self, id: &str) -> Option<String> {
        if !self.fields.contains_key(id) {
            return None;
        }
        let previous = self.focused.replace(id.to_string());
        match previous {
            Some(prev) if prev != id => Some(prev),
            _ => None,
        }
    }

    /// Deferred focus-lost tick: clear the focus bookkeeping if this field
    /// held it. The caller then commits the field unconditionally.
    pub fn end_focus(&mut self, id: &str) {
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
    }

    pub fn focused_field(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    /// The commit procedure. No-op unless the field has an unjudged value;
    /// then the rule decides between promoting `current_value` and
    /// reverting to `last_valid`. Every run on a registered field is
    /// journaled.
    pub fn commit(&mut self, id: &str) -> CommitOutcome {
        let Some(state) = self.fields.get(id) else {
            return CommitOutcome::Unchanged;
        };

        if !state.needs_validation {
            return self.record(id, CommitOutcome::Unchanged);
        }

        let value = state.current_value.clone();
        let valid = self.is_valid(id, &value);

        let outcome = match self.fields.get_mut(id) {
            Some(state) => {
                let outcome = if valid {
                    state.last_valid = value;
                    CommitOutcome::Committed
                } else {
                    state.current_value = state.last_valid.clone();
                    CommitOutcome::Reverted
                };
                state.needs_validation = false;
                outcome
            }
            None => CommitOutcome::Unchanged,
        };

        self.record(id, outcome)
    }

    /// Explicit manual trigger of the commit procedure, for callers that
    /// want validation outside a focus transition ("submit").
    pub fn commit_field(&mut self, id: &str) -> CommitOutcome {
        self.commit(id)
    }

    /// Run the commit procedure on every registered field.
    pub fn commit_all(&mut self) {
        let mut ids: Vec<String> = self.fields.keys().cloned().collect();
        ids.sort();
        for id in ids {
            self.commit(&id);
        }
    }

    /// Programmatic commit path: used when the caller already holds a
    /// canonical value (a picked suggestion, a restored selection). Sets
    /// both `current_value` and `last_valid` without consulting the rule —
    /// the asymmetry with the typed path is intentional.
    pub fn set_field_value(&mut self, id: &str, value: &str) {
        if let Some(state) = self.fields.get_mut(id) {
            state.current_value = value.to_string();
            state.last_valid = value.to_string();
            state.needs_validation = false;
        }
    }

    /// Atomically exchange the `{current_value, last_valid}` pairs of two
    /// fields and mark both as already valid. A swap of two valid values is
    /// still valid, so no re-validation (and no revert flash) happens.
    pub fn swap_fields(&mut self, id_a: &str, id_b: &str) {
        if id_a == id_b {
            return;
        }
        let Some(mut a) = self.fields.remove(id_a) else {
            return;
        };
        let Some(b) = self.fields.get_mut(id_b) else {
            self.fields.insert(id_a.to_string(), a);
            return;
        };
        std::mem::swap(&mut a.current_value, &mut b.current_value);
        std::mem::swap(&mut a.last_valid, &mut b.last_valid);
        a.needs_validation = false;
        b.needs_validation = false;
        self.fields.insert(id_a.to_string(), a);
    }

    /// True when the currently focused field's live text fails its rule.
    pub fn has_invalid_focused_field(&self) -> bool {
        match &self.focused {
            Some(id) => match self.fields.get(id) {
                Some(state) => !self.is_valid(id, &state.current_value),
                None => false,
            },
            None => false,
        }
    }

    /// Ids of all fields whose live text currently fails their rule,
    /// sorted for determinism.
    pub fn invalid_field_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .fields
            .iter()
            .filter(|(id, state)| !self.is_valid(id, &state.current_value))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Journal of every commit-procedure run, in execution order.
    pub fn commit_log(&self) -> &[CommitRecord] {
        &self.journal
    }

    fn record(&mut self, id: &str, outcome: CommitOutcome) -> CommitOutcome {
        self.seq += 1;
        self.journal.push(CommitRecord {
            seq: self.seq,
            field: id.to_string(),
            outcome,
        });
        outcome
    }

    fn is_valid(&self, id: &str, value: &str) -> bool {
        if let Some(rule) = self.rules.get(id) {
            return rule(value);
        }
        default_rule(id, value)
    }
}

/// Fallback rule when a field registers without its own predicate.
///
/// Location fields require a `"<city>, <country>"` shape with both parts
/// non-empty; empty text is invalid for them. Everything else just has to
/// be non-empty.
fn default_rule(id: &str, value: &str) -> bool {
    if id.contains("location") {
        let mut parts = value.splitn(2, ',');
        let city = parts.next().unwrap_or("").trim();
        let country = parts.next().unwrap_or("").trim();
        return !city.is_empty() && !country.is_empty();
    }
    !value.is_empty()
}
