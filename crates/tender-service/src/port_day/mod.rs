//! The active port day: resolution, creation, editing, and ending.

pub mod input;
pub mod resolver;
pub mod service;

pub use input::{PORT_CONFIRMATION, PortDayFields, PortDayInput};
pub use resolver::{Resolution, resolve_active};
pub use service::PortDayService;
