//! Risk assessment result and recommendation views

use maud::{html, Markup};

use crate::prediction::{Assessment, Recommendation, Recommendations, RiskLevel};

/// Shown when the prediction service could not be reached
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Failed to connect to the prediction service. Please make sure the server is running and try again.";

/// Result block for a completed assessment
pub fn result_view(assessment: &Assessment) -> Markup {
    let risk = assessment.risk();
    let factors = assessment.risk_factors();
    let pct = assessment.result.confidence_percent();

    html! {
        section class="result-section show" id="resultSection" {
            div class={ "result-card " (risk.css_class()) } {
                h2 id="resultTitle" { (risk.headline()) }
                p id="resultDescription" { (risk.description()) }
                div class="confidence" {
                    span { "Confidence" }
                    div class="confidence-bar" {
                        div class="confidence-fill" style={ "width: " (pct) "%" } {}
                    }
                    span id="confidenceValue" { (pct) "%" }
                }

                h3 { "Risk Factors" }
                div class="risk-factors" id="riskFactors" {
                    @if factors.is_empty() && risk == RiskLevel::Low {
                        p class="no-factors" { "No major risk factors identified" }
                    } @else {
                        @for factor in &factors {
                            div class={ "risk-factor " (factor.impact.css_class()) } {
                                span { (factor.factor) }
                                span class="impact" { (factor.impact.label()) " Impact" }
                            }
                        }
                    }
                }

                a class="btn btn-primary" href="/predict/recommendations" { "Get Recommendations" }
            }
        }
    }
}

/// Block shown in place of a result when the service is unreachable
pub fn connection_error_view(detail: Option<&str>) -> Markup {
    html! {
        section class="result-section show" id="resultSection" {
            div class="result-card risk-error" {
                h2 id="resultTitle" { "Connection Error" }
                p id="resultDescription" { (CONNECTION_ERROR_MESSAGE) }
                @if let Some(detail) = detail {
                    p class="error-detail" { (detail) }
                }
            }
        }
    }
}

fn recommendation_list(heading: &str, items: &[Recommendation]) -> Markup {
    html! {
        div class="recommendation-group" {
            h3 { (heading) }
            ul class="recommendation-list" {
                @for item in items {
                    li {
                        strong { (item.title) }
                        p { (item.desc) }
                    }
                }
            }
        }
    }
}

/// Diet, exercise and lifestyle lists
pub fn recommendations_view(recs: &Recommendations) -> Markup {
    html! {
        section class="recommendations" id="recommendationsSection" {
            h2 { "Personalized Recommendations" }
            (recommendation_list("Diet", &recs.diet))
            (recommendation_list("Exercise", &recs.exercise))
            (recommendation_list("Lifestyle", &recs.lifestyle))
            a class="btn btn-outline" href="/predict" { "New Assessment" }
        }
    }
}
