//! Guest feedback entities.

pub mod model;

pub use model::{FeedbackRecord, RatingService};
