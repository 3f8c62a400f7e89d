//! # tender-service
//!
//! Use cases of the operator console. Each service wraps one or more
//! document-store repositories and is constructed once at startup with its
//! dependencies passed in.

pub mod broadcast;
pub mod composer;
pub mod context;
pub mod display;
pub mod feedback;
pub mod port_day;
pub mod toast;

pub use broadcast::{NotificationBroadcaster, SendRequest};
pub use composer::{MessageChoice, MessageComposer};
pub use context::RequestContext;
pub use display::DisplayService;
pub use feedback::{FeedbackService, FeedbackSummary};
pub use port_day::{PortDayInput, PortDayService, Resolution, resolve_active};
pub use toast::ToastFactory;
