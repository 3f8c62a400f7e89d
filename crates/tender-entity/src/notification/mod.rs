//! Guest notification entities.

pub mod action;
pub mod model;

pub use action::{Direction, TenderAction};
pub use model::{Notification, format_display_time};
