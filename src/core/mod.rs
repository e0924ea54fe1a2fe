pub mod controller;
pub mod index;
pub mod scheduler;
pub mod search;
pub mod session;
pub mod timemath;
pub mod validation;

pub use controller::ConversionController;
pub use index::LocationIndex;
pub use search::SearchPipeline;
pub use session::Session;
pub use validation::ValidationEngine;

/// One of the two location slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::One, Slot::Two];

    /// Stable field identifier this slot's text field is registered under.
    pub fn field_id(self) -> &'static str {
        match self {
            Slot::One => validation::FIELD_LOCATION1,
            Slot::Two => validation::FIELD_LOCATION2,
        }
    }

    pub fn other(self) -> Slot {
        match self {
            Slot::One => Slot::Two,
            Slot::Two => Slot::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    /// 1-based slot number as used by external callers.
    pub fn from_number(n: u8) -> Option<Slot> {
        match n {
            1 => Some(Slot::One),
            2 => Some(Slot::Two),
            _ => None,
        }
    }
}
