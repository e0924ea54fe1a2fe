//! Debounced recomputation of the converted result.
//!
//! The controller observes the committed tuple (time text, both selected
//! locations, reference date) through the session; whenever any member
//! changes it schedules a coalesced recompute. A missing or invalid input
//! resets the result to the placeholder — stale converted output is never
//! kept on screen.

use chrono::NaiveDate;

use crate::core::scheduler::{Action, Scheduler, TimerKey};
use crate::core::timemath::{self, Converted};
use crate::models::Location;

/// Coalescing window for bursts of input changes.
pub const CONVERT_DEBOUNCE_MS: u64 = 100;

/// Placeholder shown when no conversion result exists.
pub const TIME_PLACEHOLDER: &str = "--:--";

/// What a display layer renders: either a converted time with its date and
/// zone, or the placeholder with the reference date in the local zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionView {
    pub time: String,
    pub date: NaiveDate,
    pub zone: String,
}

pub struct ConversionController {
    reference_date: NaiveDate,
    result: Option<Converted>,
}

impl ConversionController {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            result: None,
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn set_reference_date(&mut self, date: NaiveDate) {
        self.reference_date = date;
    }

    /// Schedule a recompute after the coalescing window; a newer change
    /// supersedes a pending one.
    pub fn mark_dirty(&self, sched: &mut Scheduler) {
        sched.debounce(TimerKey::Convert, CONVERT_DEBOUNCE_MS, Action::Recompute);
    }

    /// Re-derive the result from the latest committed inputs. Idempotent:
    /// the previous result is discarded wholesale, never patched.
    pub fn recompute(&mut self, time_text: &str, from: Option<&Location>, to: Option<&Location>) {
        self.result = match (from, to) {
            (Some(from), Some(to)) => {
                timemath::convert(time_text, from.timezone, to.timezone, self.reference_date)
            }
            _ => None,
        };
    }

    pub fn result(&self) -> Option<&Converted> {
        self.result.as_ref()
    }

    /// Render the current state. With no result the time shows the
    /// placeholder and the date falls back to the reference date in the
    /// local zone.
    pub fn view(&self) -> ConversionView {
        match &self.result {
            Some(converted) => ConversionView {
                time: converted.time.clone(),
                date: converted.date_in_zone(),
                zone: converted.zone.name().to_string(),
            },
            None => ConversionView {
                time: TIME_PLACEHOLDER.to_string(),
                date: self.reference_date,
                zone: "Local".to_string(),
            },
        }
    }
}
