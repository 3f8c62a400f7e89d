//! Operator sessions: the live session table, the manager that creates and
//! ends sessions, and periodic expiry cleanup.

pub mod cleanup;
pub mod manager;
pub mod store;

pub use cleanup::SessionCleanup;
pub use manager::{SessionManager, SignInResult};
pub use store::{Session, SessionStore};
