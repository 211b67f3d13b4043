use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Sentiment label produced by the classifier.
///
/// Any label other than `Positive` or `Neutral` is shown as `Negative`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl From<String> for Sentiment {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Positive" => Sentiment::Positive,
            "Neutral" => Sentiment::Neutral,
            _ => Sentiment::Negative,
        }
    }
}

impl Sentiment {
    pub fn icon(self) -> &'static str {
        match self {
            Sentiment::Positive => "😊",
            Sentiment::Neutral => "😐",
            Sentiment::Negative => "😞",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sentiment::Positive => write!(f, "Positive"),
            Sentiment::Neutral => write!(f, "Neutral"),
            Sentiment::Negative => write!(f, "Negative"),
        }
    }
}

/// One per-minute bucket of `GET /stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsBucket {
    /// `HH:MM` bucket label.
    pub time: String,
    pub positive_pct: f64,
    #[serde(default)]
    pub neutral_pct: Option<f64>,
    pub negative_pct: f64,
    #[serde(default)]
    pub positive_count: Option<u64>,
    #[serde(default)]
    pub neutral_count: Option<u64>,
    #[serde(default)]
    pub negative_count: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

/// One entry of `GET /recent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPrediction {
    /// ISO-8601 timestamp, usually without an offset.
    pub time: String,
    pub sentiment: Sentiment,
}

impl RecentPrediction {
    /// Wall-clock time of the prediction as `HH:MM:SS`.
    ///
    /// Timestamps without an offset are already in the server's local time and
    /// are shown as-is; timestamps with an offset are converted to local time.
    /// Unparseable timestamps are returned unchanged.
    pub fn clock_time(&self) -> String {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(&self.time) {
            return with_offset
                .with_timezone(&Local)
                .format("%H:%M:%S")
                .to_string();
        }

        match NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M:%S%.f") {
            Ok(naive) => naive.format("%H:%M:%S").to_string(),
            Err(_) => self.time.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_bucket_optional_fields() {
        let bucket: StatsBucket = serde_json::from_str(
            r#"{"time": "12:01", "positive_pct": 50.0, "negative_pct": 50.0}"#,
        )
        .unwrap();
        assert_eq!(bucket.time, "12:01");
        assert!(bucket.neutral_pct.is_none());
        assert!(bucket.positive_count.is_none());
    }

    #[test]
    fn test_stats_bucket_full() {
        let bucket: StatsBucket = serde_json::from_str(
            r#"{"time": "12:02", "positive_count": 2, "neutral_count": 1, "negative_count": 1,
                "total_count": 4, "positive_pct": 50.0, "neutral_pct": 25.0, "negative_pct": 25.0}"#,
        )
        .unwrap();
        assert_eq!(bucket.neutral_pct, Some(25.0));
        assert_eq!(bucket.total_count, Some(4));
    }

    #[test]
    fn test_unknown_sentiment_shown_as_negative() {
        let prediction: RecentPrediction =
            serde_json::from_str(r#"{"time": "2024-05-01T10:00:00", "sentiment": "Mixed"}"#)
                .unwrap();
        assert_eq!(prediction.sentiment, Sentiment::Negative);
    }

    #[test]
    fn test_sentiment_labels() {
        let positive: Sentiment = serde_json::from_str(r#""Positive""#).unwrap();
        let neutral: Sentiment = serde_json::from_str(r#""Neutral""#).unwrap();
        assert_eq!(positive, Sentiment::Positive);
        assert_eq!(neutral, Sentiment::Neutral);
        assert_eq!(serde_json::to_string(&Sentiment::Neutral).unwrap(), r#""Neutral""#);
        assert_eq!(Sentiment::Positive.icon(), "😊");
    }

    #[test]
    fn test_clock_time_naive_iso() {
        let prediction = RecentPrediction {
            time: "2024-05-01T14:03:27.123456".to_string(),
            sentiment: Sentiment::Positive,
        };
        assert_eq!(prediction.clock_time(), "14:03:27");

        let whole_seconds = RecentPrediction {
            time: "2024-05-01T09:15:00".to_string(),
            sentiment: Sentiment::Neutral,
        };
        assert_eq!(whole_seconds.clock_time(), "09:15:00");
    }

    #[test]
    fn test_clock_time_unparseable_passthrough() {
        let prediction = RecentPrediction {
            time: "yesterday".to_string(),
            sentiment: Sentiment::Negative,
        };
        assert_eq!(prediction.clock_time(), "yesterday");
    }
}
