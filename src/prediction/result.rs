//! Prediction results and risk factors

use serde::{Deserialize, Serialize};

use super::request::{Cycle, PredictionRequest};

/// Response from the inference service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 1 for high risk, 0 for low risk
    pub prediction: u8,
    /// Model confidence in `0.0..=1.0`
    pub confidence: f64,
}

impl PredictionResult {
    pub fn risk(&self) -> RiskLevel {
        if self.prediction == 1 {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    /// Confidence as a whole percentage
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub fn headline(&self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk for PCOS",
            RiskLevel::Low => "Low Risk for PCOS",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RiskLevel::High => {
                "Based on the analysis, there are indicators suggesting PCOS risk. \
                 Please consult a healthcare provider."
            }
            RiskLevel::Low => "Based on the analysis, the risk indicators for PCOS appear low.",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            RiskLevel::High => "risk-high",
            RiskLevel::Low => "risk-low",
        }
    }
}

/// How strongly a factor contributes to risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn label(&self) -> &'static str {
        match self {
            Impact::Low => "Low",
            Impact::Medium => "Medium",
            Impact::High => "High",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Impact::Low => "low-impact",
            Impact::Medium => "medium-impact",
            Impact::High => "high-impact",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskFactor {
    pub factor: String,
    pub impact: Impact,
}

impl RiskFactor {
    fn new(factor: impl Into<String>, impact: Impact) -> Self {
        Self {
            factor: factor.into(),
            impact,
        }
    }
}

/// Risk factors present in the submitted inputs, in display order
pub fn risk_factors(request: &PredictionRequest) -> Vec<RiskFactor> {
    let flags = &request.flags;
    let mut factors = Vec::new();

    if flags.weight_gain {
        factors.push(RiskFactor::new("Weight Gain", Impact::High));
    }
    if flags.hair_growth {
        factors.push(RiskFactor::new("Excessive Hair Growth", Impact::High));
    }
    if flags.skin_darkening {
        factors.push(RiskFactor::new("Skin Darkening", Impact::Medium));
    }
    if flags.hair_loss {
        factors.push(RiskFactor::new("Hair Loss", Impact::Medium));
    }
    if flags.pimples {
        factors.push(RiskFactor::new("Acne/Pimples", Impact::Medium));
    }
    if request.cycle == Cycle::Irregular {
        factors.push(RiskFactor::new("Irregular Menstrual Cycle", Impact::High));
    }
    if flags.fast_food {
        factors.push(RiskFactor::new("Regular Fast Food Consumption", Impact::Low));
    }
    if request.bmi > 25.0 {
        let impact = if request.bmi > 30.0 { Impact::High } else { Impact::Medium };
        factors.push(RiskFactor::new(format!("High BMI ({})", request.bmi), impact));
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::SymptomFlags;

    #[test]
    fn test_result_labels() {
        let high = PredictionResult {
            prediction: 1,
            confidence: 0.876,
        };
        assert_eq!(high.risk(), RiskLevel::High);
        assert_eq!(high.risk().headline(), "High Risk for PCOS");
        assert_eq!(high.confidence_percent(), 88);

        let low: PredictionResult =
            serde_json::from_str(r#"{"prediction":0,"confidence":0.5}"#).unwrap();
        assert_eq!(low.risk(), RiskLevel::Low);
        assert_eq!(low.confidence_percent(), 50);
    }

    #[test]
    fn test_risk_factors_in_order() {
        let request = PredictionRequest {
            bmi: 31.2,
            cycle: Cycle::Irregular,
            flags: SymptomFlags {
                weight_gain: true,
                fast_food: true,
                ..Default::default()
            },
            ..Default::default()
        };

        let factors = risk_factors(&request);
        let names: Vec<&str> = factors.iter().map(|f| f.factor.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Weight Gain",
                "Irregular Menstrual Cycle",
                "Regular Fast Food Consumption",
                "High BMI (31.2)"
            ]
        );
        assert_eq!(factors[3].impact, Impact::High);
        assert_eq!(factors[2].impact, Impact::Low);
    }

    #[test]
    fn test_moderate_bmi_is_medium_and_none_is_empty() {
        let request = PredictionRequest {
            bmi: 26.0,
            ..Default::default()
        };
        let factors = risk_factors(&request);
        assert_eq!(factors.len(), 1);
        assert_eq!(factors[0].factor, "High BMI (26)");
        assert_eq!(factors[0].impact, Impact::Medium);

        assert!(risk_factors(&PredictionRequest::default()).is_empty());
    }
}
