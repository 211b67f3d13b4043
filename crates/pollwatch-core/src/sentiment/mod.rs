//! Single-shot tweet sentiment prediction against `POST /predict`.

pub mod errors;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::dashboard::Sentiment;
use crate::http::{HttpClient, HttpError, endpoint};

pub use errors::PredictError;

/// Longest tweet the backend accepts, in characters.
pub const MAX_TWEET_LENGTH: usize = 500;

const PREDICT_PATH: &str = "predict";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub sentiment: Sentiment,
    /// In `0.0..=1.0`.
    pub confidence: f64,
    pub latency_ms: f64,
}

impl Prediction {
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    tweet: &'a str,
}

/// Trim `text` and check it against the backend's input rules.
pub fn validate_tweet(text: &str) -> Result<&str, PredictError> {
    let tweet = text.trim();
    if tweet.is_empty() {
        return Err(PredictError::EmptyInput);
    }

    let length = tweet.chars().count();
    if length > MAX_TWEET_LENGTH {
        return Err(PredictError::InputTooLong { length });
    }

    Ok(tweet)
}

#[derive(Clone)]
pub struct SentimentClient {
    http: HttpClient,
    predict_url: Url,
}

impl SentimentClient {
    pub fn new(http: HttpClient, base_url: &Url) -> Result<Self, HttpError> {
        Ok(Self {
            http,
            predict_url: endpoint(base_url, PREDICT_PATH)?,
        })
    }

    /// Classify one tweet. Invalid input is rejected before any request is sent.
    pub async fn predict(&self, text: &str) -> Result<Prediction, PredictError> {
        let tweet = validate_tweet(text)?;
        debug!(
            event = "core.sentiment.predict_started",
            chars = tweet.chars().count()
        );

        let prediction: Prediction = self
            .http
            .post_json(self.predict_url.clone(), &PredictRequest { tweet })
            .await?;

        info!(
            event = "core.sentiment.predict_completed",
            sentiment = %prediction.sentiment,
            confidence = prediction.confidence,
            latency_ms = prediction.latency_ms
        );

        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    #[test]
    fn test_validate_trims() {
        assert_eq!(validate_tweet("  great day \n").unwrap(), "great day");
    }

    #[test]
    fn test_validate_rejects_blank() {
        assert!(matches!(validate_tweet(""), Err(PredictError::EmptyInput)));
        assert!(matches!(validate_tweet(" \t\n"), Err(PredictError::EmptyInput)));
    }

    #[test]
    fn test_validate_length_counts_characters() {
        let exact = "é".repeat(MAX_TWEET_LENGTH);
        assert!(validate_tweet(&exact).is_ok());

        let over = "a".repeat(MAX_TWEET_LENGTH + 1);
        assert!(matches!(
            validate_tweet(&over),
            Err(PredictError::InputTooLong { length: 501 })
        ));
    }

    #[test]
    fn test_prediction_decodes() {
        let prediction: Prediction = serde_json::from_str(
            r#"{"sentiment": "Positive", "confidence": 0.912, "latency_ms": 14.2}"#,
        )
        .unwrap();
        assert_eq!(prediction.sentiment, Sentiment::Positive);
        assert!((prediction.confidence_percent() - 91.2).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_invalid_input_sends_nothing() {
        // Port 9 is discard; the request would fail if it were ever sent.
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let client = SentimentClient::new(HttpClient::new(&HttpConfig::default()), &base).unwrap();
        assert!(matches!(
            client.predict("   ").await,
            Err(PredictError::EmptyInput)
        ));
    }
}
