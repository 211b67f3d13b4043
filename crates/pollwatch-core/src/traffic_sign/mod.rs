//! Traffic sign recognition: upload one image to `POST /predict` as
//! `multipart/form-data` and read back the predicted class.

pub mod errors;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::http::{HttpClient, HttpError, MultipartForm, endpoint};

pub use errors::SignError;

const PREDICT_PATH: &str = "predict";
/// Form field the backend reads the upload from.
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignPrediction {
    pub class_id: u32,
    pub class_name: String,
    /// In `0.0..=1.0`.
    pub confidence: f64,
}

impl SignPrediction {
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        let percent = self.confidence_percent();
        if percent < 50.0 {
            ConfidenceBand::Low
        } else if percent < 80.0 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::High
        }
    }
}

/// Below 50% is low and below 80% medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    Low,
    Medium,
    High,
}

impl ConfidenceBand {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::Low => "low",
            ConfidenceBand::Medium => "medium",
            ConfidenceBand::High => "high",
        }
    }
}

/// MIME type sent with an upload, picked from the file extension.
pub fn image_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("ppm") => "image/x-portable-pixmap",
        Some("bmp") => "image/bmp",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[derive(Clone)]
pub struct TrafficSignClient {
    http: HttpClient,
    predict_url: Url,
}

impl TrafficSignClient {
    pub fn new(http: HttpClient, base_url: &Url) -> Result<Self, HttpError> {
        Ok(Self {
            http,
            predict_url: endpoint(base_url, PREDICT_PATH)?,
        })
    }

    /// Read the image at `path` and classify it.
    pub async fn classify_file(&self, path: &Path) -> Result<SignPrediction, SignError> {
        let image = tokio::fs::read(path).await.map_err(|e| SignError::ImageRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if image.is_empty() {
            return Err(SignError::EmptyImage {
                path: path.to_path_buf(),
            });
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        self.classify_bytes(&filename, image_content_type(path), &image).await
    }

    /// Classify an image already in memory.
    pub async fn classify_bytes(
        &self,
        filename: &str,
        content_type: &str,
        image: &[u8],
    ) -> Result<SignPrediction, SignError> {
        debug!(
            event = "core.traffic_sign.predict_started",
            filename = filename,
            bytes = image.len()
        );

        let form = MultipartForm::new().file(UPLOAD_FIELD, filename, content_type, image);
        let prediction: SignPrediction = self
            .http
            .post_multipart(self.predict_url.clone(), form)
            .await?;

        info!(
            event = "core.traffic_sign.predict_completed",
            class_id = prediction.class_id,
            class_name = %prediction.class_name,
            confidence = prediction.confidence
        );

        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::errors::PollwatchError;

    fn prediction(confidence: f64) -> SignPrediction {
        SignPrediction {
            class_id: 14,
            class_name: "Stop".to_string(),
            confidence,
        }
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(prediction(0.49).confidence_band(), ConfidenceBand::Low);
        assert_eq!(prediction(0.5).confidence_band(), ConfidenceBand::Medium);
        assert_eq!(prediction(0.79).confidence_band(), ConfidenceBand::Medium);
        assert_eq!(prediction(0.8).confidence_band(), ConfidenceBand::High);
    }

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(image_content_type(Path::new("stop.PNG")), "image/png");
        assert_eq!(image_content_type(Path::new("a/b/yield.jpeg")), "image/jpeg");
        assert_eq!(image_content_type(Path::new("00001.ppm")), "image/x-portable-pixmap");
        assert_eq!(image_content_type(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_prediction_decodes() {
        let decoded: SignPrediction = serde_json::from_str(
            r#"{"class_id": 1, "class_name": "Speed limit (30km/h)", "confidence": 0.973}"#,
        )
        .unwrap();
        assert_eq!(decoded.class_name, "Speed limit (30km/h)");
        assert!((decoded.confidence_percent() - 97.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_file_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let client =
            TrafficSignClient::new(HttpClient::new(&HttpConfig::default()), &base).unwrap();

        let err = client
            .classify_file(&dir.path().join("missing.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, SignError::ImageRead { .. }));
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.png");
        std::fs::write(&path, b"").unwrap();
        let base = Url::parse("http://127.0.0.1:9").unwrap();
        let client =
            TrafficSignClient::new(HttpClient::new(&HttpConfig::default()), &base).unwrap();

        let err = client.classify_file(&path).await.unwrap_err();
        assert!(matches!(err, SignError::EmptyImage { .. }));
        assert!(err.is_user_error());
    }
}
