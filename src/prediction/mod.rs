//! PCOS Risk Assessment
//!
//! Models the prediction form, the inference service's response and the
//! guidance derived from both:
//!
//! - **request**: `PredictionRequest` decoded from the form, posted as JSON
//! - **result**: `PredictionResult`, risk level and risk factors
//! - **recommendations**: diet, exercise and lifestyle lists

pub mod recommendations;
pub mod request;
pub mod result;

pub use recommendations::{Recommendation, Recommendations};
pub use request::{Cycle, PredictionRequest, SymptomFlags};
pub use result::{risk_factors, Impact, PredictionResult, RiskFactor, RiskLevel};

/// A completed assessment, kept in the session so recommendations can be
/// requested afterwards
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub request: PredictionRequest,
    pub result: PredictionResult,
}

impl Assessment {
    pub fn new(request: PredictionRequest, result: PredictionResult) -> Self {
        Self { request, result }
    }

    pub fn risk(&self) -> RiskLevel {
        self.result.risk()
    }

    pub fn risk_factors(&self) -> Vec<RiskFactor> {
        risk_factors(&self.request)
    }

    pub fn recommendations(&self) -> Recommendations {
        Recommendations::generate(&self.request, self.risk())
    }
}
