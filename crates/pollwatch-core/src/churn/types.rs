use std::fmt;

use serde::{Deserialize, Serialize};

/// One telecom customer, keyed by the dataset's own column names.
///
/// `TotalCharges` is not part of the profile: it is derived from the monthly
/// charge and tenure when the request is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct CustomerProfile {
    #[serde(rename = "gender")]
    pub gender: String,
    /// `0` or `1`.
    pub senior_citizen: u8,
    pub partner: String,
    pub dependents: String,
    /// Months with the provider.
    #[serde(rename = "tenure")]
    pub tenure: u32,
    pub phone_service: String,
    pub multiple_lines: String,
    pub internet_service: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    pub streaming_movies: String,
    pub contract: String,
    pub paperless_billing: String,
    pub payment_method: String,
    pub monthly_charges: f64,
}

impl CustomerProfile {
    /// Approximate lifetime spend: `MonthlyCharges * tenure`.
    pub fn total_charges(&self) -> f64 {
        self.monthly_charges * f64::from(self.tenure)
    }

    pub(crate) fn categorical_fields(&self) -> [(&'static str, &str); 15] {
        [
            ("gender", &self.gender),
            ("Partner", &self.partner),
            ("Dependents", &self.dependents),
            ("PhoneService", &self.phone_service),
            ("MultipleLines", &self.multiple_lines),
            ("InternetService", &self.internet_service),
            ("OnlineSecurity", &self.online_security),
            ("OnlineBackup", &self.online_backup),
            ("DeviceProtection", &self.device_protection),
            ("TechSupport", &self.tech_support),
            ("StreamingTV", &self.streaming_tv),
            ("StreamingMovies", &self.streaming_movies),
            ("Contract", &self.contract),
            ("PaperlessBilling", &self.paperless_billing),
            ("PaymentMethod", &self.payment_method),
        ]
    }
}

/// Wire body of `POST /predict`.
#[derive(Serialize)]
pub(crate) struct CustomerRecord<'a> {
    #[serde(flatten)]
    pub profile: &'a CustomerProfile,
    #[serde(rename = "TotalCharges")]
    pub total_charges: f64,
}

impl<'a> From<&'a CustomerProfile> for CustomerRecord<'a> {
    fn from(profile: &'a CustomerProfile) -> Self {
        Self {
            profile,
            total_charges: profile.total_charges(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChurnPrediction {
    /// `"Yes"` or `"No"`.
    pub churn_prediction: String,
    /// In `0.0..=1.0`.
    pub churn_probability: f64,
    /// The backend's own label: `High`, `Medium` or `Low`.
    pub risk_level: String,
}

impl ChurnPrediction {
    /// Probability as a whole percentage.
    pub fn probability_percent(&self) -> u32 {
        (self.churn_probability.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    pub fn band(&self) -> RiskBand {
        RiskBand::from_probability(self.churn_probability)
    }

    /// Follow-up priority derived from the backend's risk label.
    pub fn priority(&self) -> &'static str {
        match self.risk_level.as_str() {
            "High" => "Critical",
            "Medium" => "Moderate",
            _ => "Low",
        }
    }
}

/// Retention band, derived locally from the churn probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskBand {
    High,
    Medium,
    Low,
}

impl RiskBand {
    /// Above 0.7 is high, above 0.3 medium, anything else low.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.7 {
            RiskBand::High
        } else if probability > 0.3 {
            RiskBand::Medium
        } else {
            RiskBand::Low
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskBand::High => {
                "High risk of churn detected. Immediate retention campaign recommended."
            }
            RiskBand::Medium => "Moderate risk. Consider loyalty offers or feedback surveys.",
            RiskBand::Low => "Low risk. Customer is stable and likely to stay.",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskBand::High => write!(f, "High"),
            RiskBand::Medium => write!(f, "Medium"),
            RiskBand::Low => write!(f, "Low"),
        }
    }
}
