use std::future::Future;

use tracing::info;
use url::Url;

use crate::http::{HttpClient, HttpError, endpoint};
use crate::training::errors::TrainingError;
use crate::training::types::{StatusReport, TrainResponse};

const TRAIN_PATH: &str = "train";
const STATUS_PATH: &str = "train/status";

/// Where a job monitor reads status reports from.
///
/// Implemented over HTTP by [`TrainingClient`]; tests script it directly.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(&self) -> impl Future<Output = Result<StatusReport, HttpError>> + Send;
}

/// Client for the training endpoints of an inference backend.
#[derive(Clone)]
pub struct TrainingClient {
    http: HttpClient,
    train_url: Url,
    status_url: Url,
}

impl TrainingClient {
    pub fn new(http: HttpClient, base_url: &Url) -> Result<Self, TrainingError> {
        Ok(Self {
            http,
            train_url: endpoint(base_url, TRAIN_PATH)?,
            status_url: endpoint(base_url, STATUS_PATH)?,
        })
    }

    /// `POST /train`. The backend answers before the job actually starts.
    pub async fn trigger(&self) -> Result<TrainResponse, TrainingError> {
        info!(
            event = "core.training.trigger_started",
            url = %self.train_url
        );

        let response: TrainResponse = self
            .http
            .post_empty(self.train_url.clone())
            .await
            .map_err(|e| TrainingError::TriggerFailed { source: e })?;

        info!(
            event = "core.training.trigger_completed",
            message = %response.message
        );

        Ok(response)
    }

    /// One-shot `GET /train/status`.
    pub async fn status(&self) -> Result<StatusReport, TrainingError> {
        self.fetch_status()
            .await
            .map_err(|e| TrainingError::StatusFailed { source: e })
    }
}

impl StatusSource for TrainingClient {
    async fn fetch_status(&self) -> Result<StatusReport, HttpError> {
        self.http.get_json(self.status_url.clone()).await
    }
}
