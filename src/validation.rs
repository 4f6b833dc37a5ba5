//! Form Validation
//!
//! Field-level validation for the login, registration and prediction forms,
//! plus the derived body measurements (BMI and waist-hip ratio) that the
//! prediction form recomputes as the user types.

use regex::Regex;
use std::sync::OnceLock;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum accepted username length at registration
pub const MIN_USERNAME_LEN: usize = 3;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").expect("valid username regex"))
}

/// An error attached to a single form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors found in one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", summarize(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Message for `field`, if it failed
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(value)` when no errors were recorded
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Email address in `local@domain.tld` form
pub fn is_valid_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// 3-20 letters, digits or underscores
pub fn is_valid_username(value: &str) -> bool {
    username_regex().is_match(value.trim())
}

/// Login identifier: an email address or a username
pub fn is_valid_identifier(value: &str) -> bool {
    is_valid_email(value) || is_valid_username(value)
}

pub fn is_valid_password(value: &str) -> bool {
    value.chars().count() >= MIN_PASSWORD_LEN
}

/// Credentials that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub identifier: String,
    pub password: String,
}

/// Validate the login form
pub fn validate_login(identifier: &str, password: &str) -> Result<LoginForm, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let identifier = identifier.trim();

    if identifier.is_empty() {
        errors.add("email", "Email or username is required");
    } else if !is_valid_identifier(identifier) {
        errors.add(
            "email",
            "Please enter a valid email address or username (3-20 characters)",
        );
    }

    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if !is_valid_password(password) {
        errors.add("password", "Password must be at least 6 characters long");
    }

    errors.into_result(LoginForm {
        identifier: identifier.to_string(),
        password: password.to_string(),
    })
}

/// Registration details that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Validate the registration form
pub fn validate_registration(
    username: &str,
    email: &str,
    password: &str,
    repeat_password: &str,
) -> Result<Registration, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let username = username.trim();
    let email = email.trim();

    if username.is_empty() {
        errors.add("name", "Name is required");
    } else if username.chars().count() < MIN_USERNAME_LEN {
        errors.add("name", "Username must be at least 3 characters");
    }

    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.add("email", "Please enter a valid email address");
    }

    if password.is_empty() {
        errors.add("password", "Password is required");
    } else if !is_valid_password(password) {
        errors.add("password", "Password must be at least 6 characters long");
    }

    if repeat_password != password {
        errors.add("repeat-password", "Passwords do not match");
    }

    errors.into_result(Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Parse a measurement input; blank, non-numeric or non-positive is `None`
pub fn parse_measure(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Body mass index from weight in kg and height in cm, to one decimal
pub fn bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(round_to(weight_kg / (height_m * height_m), 1))
}

/// Waist to hip ratio, to two decimals
pub fn waist_hip_ratio(waist: f64, hip: f64) -> Option<f64> {
    if waist <= 0.0 || hip <= 0.0 {
        return None;
    }
    Some(round_to(waist / hip, 2))
}

/// Which measurement input changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Weight,
    Height,
    Waist,
    Hip,
}

/// Measurement inputs with their derived values
///
/// Every input change recomputes the affected derived value. While either
/// input of a pair is unusable no calculation happens and the previously
/// derived value is kept.
#[derive(Debug, Clone, Default)]
pub struct BodyMeasurements {
    weight: Option<f64>,
    height: Option<f64>,
    waist: Option<f64>,
    hip: Option<f64>,
    bmi: Option<f64>,
    waist_hip_ratio: Option<f64>,
}

impl BodyMeasurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a changed input and recompute
    pub fn input(&mut self, measure: Measure, raw: &str) -> &mut Self {
        let value = parse_measure(raw);
        match measure {
            Measure::Weight => self.weight = value,
            Measure::Height => self.height = value,
            Measure::Waist => self.waist = value,
            Measure::Hip => self.hip = value,
        }

        match measure {
            Measure::Weight | Measure::Height => {
                if let (Some(w), Some(h)) = (self.weight, self.height) {
                    self.bmi = bmi(w, h);
                }
            }
            Measure::Waist | Measure::Hip => {
                if let (Some(w), Some(h)) = (self.waist, self.hip) {
                    self.waist_hip_ratio = waist_hip_ratio(w, h);
                }
            }
        }

        self
    }

    pub fn bmi(&self) -> Option<f64> {
        self.bmi
    }

    pub fn waist_hip_ratio(&self) -> Option<f64> {
        self.waist_hip_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_validation() {
        assert!(is_valid_identifier("user@example.com"));
        assert!(is_valid_identifier("abc_123"));
        assert!(!is_valid_identifier("not-an-email"));
        assert!(!is_valid_identifier("ab"));
        assert!(!is_valid_identifier("a_very_long_username_indeed"));
        assert!(!is_valid_identifier("user@localhost"));
    }

    #[test]
    fn test_password_validation() {
        assert!(is_valid_password("secret"));
        assert!(!is_valid_password("short"));
    }

    #[test]
    fn test_validate_login_reports_fields() {
        let errors = validate_login("", "abc").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("Email or username is required"));
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters long")
        );

        let ok = validate_login("  user@example.com ", "secret1").unwrap();
        assert_eq!(ok.identifier, "user@example.com");
    }

    #[test]
    fn test_validation_errors_display() {
        let errors = validate_login("", "abc").unwrap_err();
        let err: &dyn std::error::Error = &errors;
        assert_eq!(
            err.to_string(),
            "email: Email or username is required; password: Password must be at least 6 characters long"
        );
    }

    #[test]
    fn test_validate_registration() {
        let errors = validate_registration("al", "bad", "secret", "secreT").unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert_eq!(errors.get("repeat-password"), Some("Passwords do not match"));
        assert!(errors.get("password").is_none());

        let ok = validate_registration("alice", "alice@example.com", "secret", "secret");
        assert!(ok.is_ok());
    }

    #[test]
    fn test_bmi_and_ratio() {
        assert_eq!(bmi(70.0, 175.0), Some(22.9));
        assert_eq!(bmi(70.0, 0.0), None);
        assert_eq!(waist_hip_ratio(28.0, 36.0), Some(0.78));
    }

    #[test]
    fn test_measurements_recompute_on_change() {
        let mut m = BodyMeasurements::new();
        m.input(Measure::Weight, "70");
        assert_eq!(m.bmi(), None);

        m.input(Measure::Height, "175");
        assert_eq!(m.bmi(), Some(22.9));

        m.input(Measure::Weight, "80");
        assert_eq!(m.bmi(), Some(26.1));

        // Blank input: no calculation, previous value kept
        m.input(Measure::Height, "");
        assert_eq!(m.bmi(), Some(26.1));
        m.input(Measure::Weight, "abc");
        assert_eq!(m.bmi(), Some(26.1));

        m.input(Measure::Waist, "30").input(Measure::Hip, "40");
        assert_eq!(m.waist_hip_ratio(), Some(0.75));
    }
}
