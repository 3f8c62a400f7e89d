//! Request handlers grouped by area.

pub mod auth;
pub mod display;
pub mod feedback;
pub mod health;
pub mod notification;
pub mod port_day;
pub mod views;
pub mod ws;
