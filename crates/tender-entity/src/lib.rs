//! # tender-entity
//!
//! Domain entity models for the tender console. Every struct in this crate
//! represents a stored document or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, and `Deserialize`, and use the
//! camelCase field names of the stored documents.

pub mod display;
pub mod feedback;
pub mod notification;
pub mod port_day;
pub mod toast;
