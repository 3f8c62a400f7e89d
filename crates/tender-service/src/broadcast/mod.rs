//! Sending, listing, and deleting guest notifications.

pub mod guard;
pub mod service;

pub use guard::{SendGuard, SendPermit};
pub use service::{NotificationBroadcaster, SendRequest};
