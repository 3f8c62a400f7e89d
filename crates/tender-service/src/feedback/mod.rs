//! Guest feedback analytics.

pub mod aggregate;
pub mod service;

pub use aggregate::{ChartData, ChartDataset, CommentEntry, FeedbackSummary, ServiceStats, aggregate};
pub use service::FeedbackService;
