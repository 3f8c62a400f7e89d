//! Turns the operator's choices into the sentence guests see.

pub mod template;

pub use template::{DEFAULT_VESSEL_NAME, MessageChoice, MessageComposer};
