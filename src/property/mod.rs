//! Property assumptions and property list loading

mod data;
pub mod loader;

pub use data::{Property, PropertyAssumptions};
pub use loader::{load_properties, load_properties_from_reader};
