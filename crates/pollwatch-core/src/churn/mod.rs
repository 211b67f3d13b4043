//! Telecom customer churn prediction against `POST /predict`.
//!
//! Profiles are read from TOML or JSON files keyed by the dataset's column
//! names. `TotalCharges` is always computed as `MonthlyCharges * tenure`.

pub mod errors;
pub mod types;

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use url::Url;

use crate::http::{HttpClient, HttpError, endpoint};

pub use errors::ChurnError;
pub use types::{ChurnPrediction, CustomerProfile, RiskBand};
use types::CustomerRecord;

const PREDICT_PATH: &str = "predict";

/// Read a profile from `path`. Files ending in `.toml` are TOML, anything else JSON.
pub fn load_profile(path: &Path) -> Result<CustomerProfile, ChurnError> {
    let content = fs::read_to_string(path).map_err(|e| ChurnError::ProfileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let profile: CustomerProfile = if is_toml {
        toml::from_str(&content).map_err(|e| ChurnError::ProfileParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| ChurnError::ProfileParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    };

    validate_profile(&profile)?;
    Ok(profile)
}

/// Reject profiles the model cannot score.
pub fn validate_profile(profile: &CustomerProfile) -> Result<(), ChurnError> {
    if profile.senior_citizen > 1 {
        return Err(ChurnError::InvalidProfile {
            message: format!("SeniorCitizen must be 0 or 1 (got {})", profile.senior_citizen),
        });
    }

    if !profile.monthly_charges.is_finite() || profile.monthly_charges < 0.0 {
        return Err(ChurnError::InvalidProfile {
            message: format!(
                "MonthlyCharges must be a non-negative number (got {})",
                profile.monthly_charges
            ),
        });
    }

    if let Some((name, _)) = profile
        .categorical_fields()
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
    {
        return Err(ChurnError::InvalidProfile {
            message: format!("{} must not be empty", name),
        });
    }

    Ok(())
}

#[derive(Clone)]
pub struct ChurnClient {
    http: HttpClient,
    predict_url: Url,
}

impl ChurnClient {
    pub fn new(http: HttpClient, base_url: &Url) -> Result<Self, HttpError> {
        Ok(Self {
            http,
            predict_url: endpoint(base_url, PREDICT_PATH)?,
        })
    }

    /// Score one customer. Invalid profiles are rejected before any request is sent.
    pub async fn predict(&self, profile: &CustomerProfile) -> Result<ChurnPrediction, ChurnError> {
        validate_profile(profile)?;

        let record = CustomerRecord::from(profile);
        debug!(
            event = "core.churn.predict_started",
            tenure = profile.tenure,
            total_charges = record.total_charges
        );

        let prediction: ChurnPrediction = self
            .http
            .post_json(self.predict_url.clone(), &record)
            .await?;

        info!(
            event = "core.churn.predict_completed",
            churn = %prediction.churn_prediction,
            probability = prediction.churn_probability,
            risk_level = %prediction.risk_level
        );

        Ok(prediction)
    }
}
