//! Domain events emitted by the document store and session manager.
//!
//! Collection changes drive the live notification feed; session events
//! let the realtime engine close sockets for signed-out sessions.

pub mod collection;
pub mod session;

pub use collection::{ChangeKind, Collection, CollectionChange};
pub use session::{SessionEvent, SignOutReason};
