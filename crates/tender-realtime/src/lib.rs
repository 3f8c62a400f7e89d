//! # tender-realtime
//!
//! Real-time WebSocket engine for the tender console. Provides:
//!
//! - A registry of open operator connections keyed by session
//! - The live notification feed, re-pushed on every change to
//!   `guestNotifications`
//! - Toast delivery to a single session
//! - `session_terminated` pushes when a session ends

pub mod connection;
pub mod feed;
pub mod heartbeat;
pub mod message;
pub mod server;
pub mod session_watch;

pub use connection::{ConnectionHandle, ConnectionManager};
pub use feed::FeedPublisher;
pub use message::{FEED_CHANNEL, InboundMessage, OutboundMessage};
pub use server::RealtimeEngine;
