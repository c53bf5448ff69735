//! Starting, wiring and stopping the catalog actors, plus tracing setup.

pub mod catalog_system;
pub mod tracing;

pub use catalog_system::*;
pub use self::tracing::*;
