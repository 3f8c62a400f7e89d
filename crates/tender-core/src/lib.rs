//! # tender-core
//!
//! Core crate for the tender status console. Contains configuration
//! schemas, typed identifiers, domain events, and the unified error system.
//!
//! This crate has **no** internal dependencies on other tender crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
