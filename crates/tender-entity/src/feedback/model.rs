//! Guest feedback entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tender_core::types::FeedbackId;

/// Lowest valid star rating.
pub const MIN_RATING: u8 = 1;
/// Highest valid star rating.
pub const MAX_RATING: u8 = 5;

/// A guest's feedback submission.
///
/// Ratings are kept as raw JSON because the guest app does not validate
/// them; malformed values are skipped by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    /// Unique feedback identifier.
    pub id: FeedbackId,
    /// Rating of the guest website.
    #[serde(default)]
    pub website_rating: Option<serde_json::Value>,
    /// Rating of the tender service.
    #[serde(default)]
    pub tender_rating: Option<serde_json::Value>,
    /// Free-text comment.
    #[serde(default)]
    pub comments: Option<String>,
    /// When the feedback was submitted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// The two rated services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingService {
    /// The guest website.
    Website,
    /// The tender shuttle.
    Tender,
}

impl RatingService {
    /// Chart label of the service.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Tender => "Tender Service",
        }
    }
}

impl FeedbackRecord {
    /// The raw rating given to a service.
    pub fn raw_rating(&self, service: RatingService) -> Option<&serde_json::Value> {
        match service {
            RatingService::Website => self.website_rating.as_ref(),
            RatingService::Tender => self.tender_rating.as_ref(),
        }
    }

    /// The rating given to a service, if it is a whole number in 1..=5.
    pub fn rating(&self, service: RatingService) -> Option<u8> {
        self.raw_rating(service).and_then(valid_rating)
    }

    /// The comment, if it has any non-blank text.
    pub fn comment(&self) -> Option<&str> {
        self.comments.as_deref().filter(|c| !c.trim().is_empty())
    }
}

fn valid_rating(value: &serde_json::Value) -> Option<u8> {
    let number = value.as_f64()?;
    if number.fract() != 0.0 || number < f64::from(MIN_RATING) || number > f64::from(MAX_RATING) {
        return None;
    }
    Some(number as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(website: serde_json::Value) -> FeedbackRecord {
        FeedbackRecord {
            id: FeedbackId::new(),
            website_rating: Some(website),
            tender_rating: None,
            comments: None,
            timestamp: None,
        }
    }

    #[test]
    fn test_valid_ratings() {
        assert_eq!(record(json!(1)).rating(RatingService::Website), Some(1));
        assert_eq!(record(json!(5)).rating(RatingService::Website), Some(5));
        assert_eq!(record(json!(4.0)).rating(RatingService::Website), Some(4));
    }

    #[test]
    fn test_invalid_ratings_are_skipped() {
        for value in [json!(0), json!(6), json!(-1), json!("x"), json!("3"), json!(2.5), json!(null)] {
            assert_eq!(record(value.clone()).rating(RatingService::Website), None, "{value}");
        }
        assert_eq!(record(json!(3)).rating(RatingService::Tender), None);
    }

    #[test]
    fn test_blank_comment_is_absent() {
        let mut r = record(json!(3));
        r.comments = Some("   ".to_string());
        assert_eq!(r.comment(), None);
        r.comments = Some(" Lovely crew ".to_string());
        assert_eq!(r.comment(), Some(" Lovely crew "));
    }
}
