//! Process-local repositories.
//!
//! Used for development, tests, and single-instance deployments without
//! PostgreSQL. Every write publishes to the shared [`ChangeFeed`].

mod display;
mod feedback;
mod notification;
mod port_day;

pub use display::MemoryDisplayImageRepository;
pub use feedback::MemoryFeedbackRepository;
pub use notification::MemoryNotificationRepository;
pub use port_day::MemoryPortDayRepository;
