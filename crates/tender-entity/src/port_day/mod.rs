//! Port day entities.

pub mod model;
pub mod offset;

pub use model::{PierLocation, PortDay};
pub use offset::UtcOffset;
