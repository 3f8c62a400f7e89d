//! Feedback statistics and chart series.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use tender_core::types::FeedbackId;
use tender_entity::feedback::model::{MAX_RATING, MIN_RATING};
use tender_entity::feedback::{FeedbackRecord, RatingService};

const STARS: usize = (MAX_RATING - MIN_RATING + 1) as usize;
const DATE_KEY: &str = "%Y-%m-%d";

/// Count, mean, and per-star distribution for one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    /// Which service.
    pub service: RatingService,
    /// Human label.
    pub label: String,
    /// Number of valid ratings.
    pub count: usize,
    /// Mean of valid ratings, 0 when there are none.
    pub average: f64,
    /// Ratings per star, index 0 is one star.
    pub distribution: [usize; STARS],
}

/// One bar series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    /// Legend label.
    pub label: String,
    /// One value per chart label.
    pub data: Vec<f64>,
}

/// A bar chart in the shape the analytics view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    /// Chart title.
    pub title: String,
    /// X axis labels.
    pub labels: Vec<String>,
    /// Series.
    pub datasets: Vec<ChartDataset>,
}

/// A guest comment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentEntry {
    /// Feedback record id.
    pub id: FeedbackId,
    /// The comment as written.
    pub comment: String,
    /// When the feedback was submitted.
    pub submitted_at: Option<DateTime<Utc>>,
    /// UTC calendar day, `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Everything the analytics view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSummary {
    /// Number of feedback records read.
    pub total_records: usize,
    /// Website ratings.
    pub website: ServiceStats,
    /// Tender service ratings.
    pub tender: ServiceStats,
    /// Services on the x axis, one stacked series per star.
    pub stacked_chart: ChartData,
    /// Stars on the x axis, one series per service.
    pub grouped_chart: ChartData,
    /// Average rating per service.
    pub average_chart: ChartData,
    /// Non-empty comments, newest first.
    pub comments: Vec<CommentEntry>,
    /// Days that have comments, newest first.
    pub comment_dates: Vec<String>,
}

impl FeedbackSummary {
    /// Comments submitted on a `YYYY-MM-DD` UTC day.
    pub fn comments_on(&self, date: &str) -> Vec<CommentEntry> {
        self.comments
            .iter()
            .filter(|c| c.date.as_deref() == Some(date))
            .cloned()
            .collect()
    }
}

fn star_label(star: usize) -> String {
    format!("{star} ⭐")
}

fn stats(records: &[FeedbackRecord], service: RatingService) -> ServiceStats {
    let mut distribution = [0usize; STARS];
    let mut sum = 0u64;
    let mut count = 0usize;
    for rating in records.iter().filter_map(|r| r.rating(service)) {
        distribution[usize::from(rating - MIN_RATING)] += 1;
        sum += u64::from(rating);
        count += 1;
    }
    let average = if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    };
    ServiceStats {
        service,
        label: service.label().to_string(),
        count,
        average,
        distribution,
    }
}

fn counts(distribution: &[usize]) -> Vec<f64> {
    distribution.iter().map(|c| *c as f64).collect()
}

/// Aggregate every feedback record.
///
/// Ratings outside 1..=5 or that are not whole numbers are left out of
/// every count and average.
pub fn aggregate(records: &[FeedbackRecord]) -> FeedbackSummary {
    let website = stats(records, RatingService::Website);
    let tender = stats(records, RatingService::Tender);

    let stacked_chart = ChartData {
        title: "Distribution of Star Ratings per Service (Stacked)".to_string(),
        labels: vec![website.label.clone(), tender.label.clone()],
        datasets: (0..STARS)
            .map(|i| ChartDataset {
                label: star_label(i + 1),
                data: vec![website.distribution[i] as f64, tender.distribution[i] as f64],
            })
            .collect(),
    };

    let grouped_chart = ChartData {
        title: "Website & Tender Service Feedback (Grouped)".to_string(),
        labels: (1..=STARS).map(star_label).collect(),
        datasets: vec![
            ChartDataset {
                label: "Website".to_string(),
                data: counts(&website.distribution),
            },
            ChartDataset {
                label: "Tender".to_string(),
                data: counts(&tender.distribution),
            },
        ],
    };

    let average_chart = ChartData {
        title: "Average Service Ratings".to_string(),
        labels: vec!["Website".to_string(), "Tender".to_string()],
        datasets: vec![ChartDataset {
            label: "Average Rating".to_string(),
            data: vec![website.average, tender.average],
        }],
    };

    let mut comments: Vec<CommentEntry> = records
        .iter()
        .filter_map(|r| {
            r.comment().map(|comment| CommentEntry {
                id: r.id,
                comment: comment.to_string(),
                submitted_at: r.timestamp,
                date: r.timestamp.map(|t| t.format(DATE_KEY).to_string()),
            })
        })
        .collect();
    // Undated comments sort last.
    comments.sort_by_key(|c| Reverse(c.submitted_at));

    let comment_dates: BTreeSet<String> = comments.iter().filter_map(|c| c.date.clone()).collect();

    FeedbackSummary {
        total_records: records.len(),
        website,
        tender,
        stacked_chart,
        grouped_chart,
        average_chart,
        comments,
        comment_dates: comment_dates.into_iter().rev().collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use super::*;

    fn record(website: Value, tender: Value, comment: &str, at: Option<DateTime<Utc>>) -> FeedbackRecord {
        FeedbackRecord {
            id: FeedbackId::new(),
            website_rating: Some(website),
            tender_rating: Some(tender),
            comments: Some(comment.to_string()),
            timestamp: at,
        }
    }

    #[test]
    fn test_invalid_ratings_excluded() {
        let records: Vec<FeedbackRecord> = [json!(1), json!(5), json!(6), json!("x"), json!(3)]
            .into_iter()
            .map(|w| record(w, Value::Null, "", None))
            .collect();
        let summary = aggregate(&records);
        assert_eq!(summary.total_records, 5);
        assert_eq!(summary.website.count, 3);
        assert!((summary.website.average - 3.0).abs() < f64::EPSILON);
        assert_eq!(summary.website.distribution, [1, 0, 1, 0, 1]);
        assert_eq!(summary.tender.count, 0);
        assert_eq!(summary.tender.average, 0.0);
    }

    #[test]
    fn test_chart_series() {
        let records = vec![
            record(json!(5), json!(4), "", None),
            record(json!(5), json!(2), "", None),
        ];
        let summary = aggregate(&records);

        assert_eq!(summary.stacked_chart.labels, vec!["Website", "Tender Service"]);
        assert_eq!(summary.stacked_chart.datasets.len(), 5);
        assert_eq!(summary.stacked_chart.datasets[4].label, "5 ⭐");
        assert_eq!(summary.stacked_chart.datasets[4].data, vec![2.0, 0.0]);
        assert_eq!(summary.stacked_chart.datasets[1].data, vec![0.0, 1.0]);

        assert_eq!(summary.grouped_chart.labels[0], "1 ⭐");
        assert_eq!(summary.grouped_chart.datasets[0].data, vec![0.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(summary.grouped_chart.datasets[1].data, vec![0.0, 1.0, 0.0, 1.0, 0.0]);

        assert_eq!(summary.average_chart.datasets[0].data, vec![5.0, 3.0]);
    }

    #[test]
    fn test_comments_by_day() {
        let d1 = Utc.with_ymd_and_hms(2026, 10, 16, 23, 30, 0).unwrap();
        let d2 = Utc.with_ymd_and_hms(2026, 10, 17, 8, 0, 0).unwrap();
        let d3 = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
        let records = vec![
            record(json!(4), json!(4), "Smooth ride", Some(d1)),
            record(json!(4), json!(4), "  ", Some(d2)),
            record(json!(4), json!(4), "Long queue", Some(d2)),
            record(json!(4), json!(4), "Friendly crew", Some(d3)),
            record(json!(4), json!(4), "No date", None),
        ];
        let summary = aggregate(&records);

        let texts: Vec<&str> = summary.comments.iter().map(|c| c.comment.as_str()).collect();
        assert_eq!(texts, vec!["Friendly crew", "Long queue", "Smooth ride", "No date"]);
        assert_eq!(summary.comment_dates, vec!["2026-10-17", "2026-10-16"]);

        let day = summary.comments_on("2026-10-17");
        assert_eq!(day.len(), 2);
        assert!(summary.comments_on("2026-01-01").is_empty());
    }

    #[test]
    fn test_empty_collection() {
        let summary = aggregate(&[]);
        assert_eq!(summary.total_records, 0);
        assert!(summary.comments.is_empty());
        assert!(summary.comment_dates.is_empty());
        assert_eq!(summary.average_chart.datasets[0].data, vec![0.0, 0.0]);
    }
}
