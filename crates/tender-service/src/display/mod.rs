//! The image shown on the guest TV display.

pub mod service;

pub use service::DisplayService;
