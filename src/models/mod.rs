pub mod location;

pub use location::{Location, LocationId};
