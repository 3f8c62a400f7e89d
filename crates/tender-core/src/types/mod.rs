//! Shared domain types.

pub mod id;

pub use id::{ConnectionId, FeedbackId, NotificationId, PortDayId, SessionId, ToastId};
