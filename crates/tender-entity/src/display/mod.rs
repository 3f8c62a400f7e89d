//! TV display entities.

pub mod model;

pub use model::{DisplayImage, TV_DISPLAY_DOCUMENT};
