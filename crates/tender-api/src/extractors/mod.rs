//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;

pub use auth::{AuthUser, MaybeAuthUser, SESSION_COOKIE, session_token};
pub use json::{AppJson, ValidatedJson};
pub use path::{AppPath, AppQuery};
