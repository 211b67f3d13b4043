//! Presentation state of the sentiment dashboard.
//!
//! Updated from `/stats` and `/recent` independently: a failure of one source
//! never touches what the other one rendered. Failure messages occupy a single
//! slot each, so repeated failures never stack up duplicates.

use serde::Serialize;

use crate::dashboard::types::{RecentPrediction, Sentiment, StatsBucket};
use crate::http::HttpError;

/// How many predictions the recent table shows.
pub const RECENT_ROWS: usize = 10;

pub const CONNECTION_ERROR_MESSAGE: &str =
    "Failed to connect to backend. Make sure the server is running.";
pub const NO_DATA_MESSAGE: &str = "No data available";
pub const RECENT_REJECTED_MESSAGE: &str = "Make a prediction to see results";
pub const RECENT_UNREACHABLE_MESSAGE: &str = "Connect to backend to see recent data";

/// Chart series, one point per stats bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SentimentSeries {
    pub labels: Vec<String>,
    pub positive: Vec<f64>,
    pub neutral: Vec<f64>,
    pub negative: Vec<f64>,
}

impl SentimentSeries {
    fn from_buckets(buckets: &[StatsBucket]) -> Self {
        Self {
            labels: buckets.iter().map(|b| b.time.clone()).collect(),
            positive: buckets.iter().map(|b| b.positive_pct).collect(),
            neutral: buckets.iter().map(|b| b.neutral_pct.unwrap_or(0.0)).collect(),
            negative: buckets.iter().map(|b| b.negative_pct).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Prediction counts summed over every bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTotals {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub total: u64,
}

impl SentimentTotals {
    fn from_buckets(buckets: &[StatsBucket]) -> Self {
        let mut totals = Self::default();
        for bucket in buckets {
            totals.positive = totals
                .positive
                .saturating_add(bucket.positive_count.unwrap_or(0));
            totals.neutral = totals
                .neutral
                .saturating_add(bucket.neutral_count.unwrap_or(0));
            totals.negative = totals
                .negative
                .saturating_add(bucket.negative_count.unwrap_or(0));
        }
        // Counts come from the backend unchecked; clamp instead of overflowing.
        totals.total = totals
            .positive
            .saturating_add(totals.neutral)
            .saturating_add(totals.negative);
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentRow {
    /// `HH:MM:SS`
    pub time: String,
    pub sentiment: Sentiment,
}

/// Contents of the recent-predictions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecentTable {
    /// Nothing fetched yet.
    Loading,
    /// Newest first.
    Rows(Vec<RecentRow>),
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    series: SentimentSeries,
    totals: SentimentTotals,
    recent: RecentTable,
    banner: Option<&'static str>,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardView {
    pub fn new() -> Self {
        Self {
            series: SentimentSeries::default(),
            totals: SentimentTotals::default(),
            recent: RecentTable::Loading,
            banner: None,
        }
    }

    pub fn series(&self) -> &SentimentSeries {
        &self.series
    }

    pub fn totals(&self) -> SentimentTotals {
        self.totals
    }

    pub fn recent(&self) -> &RecentTable {
        &self.recent
    }

    /// Connection error shown above the chart, if any.
    pub fn banner(&self) -> Option<&'static str> {
        self.banner
    }

    /// Render a successful `/stats` answer.
    ///
    /// An empty answer keeps the previous chart and totals.
    pub fn apply_stats(&mut self, buckets: &[StatsBucket]) {
        self.banner = None;
        if buckets.is_empty() {
            return;
        }

        self.series = SentimentSeries::from_buckets(buckets);
        self.totals = SentimentTotals::from_buckets(buckets);
    }

    /// Record a failed `/stats` fetch.
    ///
    /// Shows the connection banner unless it is already shown. Returns whether
    /// the banner was inserted by this call. Chart and totals are left as they were.
    pub fn stats_failed(&mut self) -> bool {
        if self.banner.is_some() {
            return false;
        }
        self.banner = Some(CONNECTION_ERROR_MESSAGE);
        true
    }

    /// Render a successful `/recent` answer.
    pub fn apply_recent(&mut self, predictions: &[RecentPrediction]) {
        if predictions.is_empty() {
            self.recent = RecentTable::Placeholder(NO_DATA_MESSAGE);
            return;
        }

        let start = predictions.len().saturating_sub(RECENT_ROWS);
        let rows = predictions[start..]
            .iter()
            .rev()
            .map(|p| RecentRow {
                time: p.clock_time(),
                sentiment: p.sentiment,
            })
            .collect();
        self.recent = RecentTable::Rows(rows);
    }

    /// Replace the recent table with a placeholder explaining the failure.
    pub fn recent_failed(&mut self, error: &HttpError) {
        let message = if error.status_code().is_some() {
            RECENT_REJECTED_MESSAGE
        } else {
            RECENT_UNREACHABLE_MESSAGE
        };
        self.recent = RecentTable::Placeholder(message);
    }
}
