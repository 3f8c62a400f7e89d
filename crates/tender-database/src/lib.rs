//! # tender-database
//!
//! The document store behind the console: repository traits for the four
//! collections (`guestNotifications`, `portDays`, `guestFeedback`,
//! `displayImages`), a PostgreSQL implementation, an in-memory
//! implementation, and the change feed that drives live updates.

pub mod change_feed;
pub mod connection;
pub mod listener;
pub mod migration;
pub mod repositories;
pub mod store;

pub use change_feed::ChangeFeed;
pub use connection::DatabasePool;
pub use store::DocumentStore;
