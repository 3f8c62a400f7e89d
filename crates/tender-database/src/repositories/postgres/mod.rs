//! PostgreSQL-backed repositories.
//!
//! Change notifications are not published from here; the
//! `notify_collection_change` trigger announces every row change and the
//! [`crate::listener::PgChangeListener`] forwards it to the change feed.

mod display;
mod feedback;
mod notification;
mod port_day;

pub use display::PgDisplayImageRepository;
pub use feedback::PgFeedbackRepository;
pub use notification::PgNotificationRepository;
pub use port_day::PgPortDayRepository;

use tender_core::error::{AppError, ErrorKind};

pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::with_source(ErrorKind::Database, context, e)
}
