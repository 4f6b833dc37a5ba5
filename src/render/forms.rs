//! Form rendering
//!
//! Each form re-renders with the submitted values and an inline message
//! beside every field that failed validation.

use chrono::NaiveDate;
use maud::{html, Markup};

use crate::form::FormFields;
use crate::tracker::{Bleeding, CervicalMucus, Level, Mood, KNOWN_SYMPTOMS};
use crate::validation::{BodyMeasurements, Measure, ValidationErrors};

fn field_error(errors: &ValidationErrors, field: &str) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            span class="error-message show" id={ (field) "Error" } { (message) }
        }
    }
}

fn input_class(errors: &ValidationErrors, field: &str) -> &'static str {
    if errors.get(field).is_some() {
        "form-input error"
    } else {
        "form-input"
    }
}

fn input(kind: &str, name: &str, label: &str, value: &str, errors: &ValidationErrors) -> Markup {
    html! {
        div class="form-group" {
            label for=(name) { (label) }
            input type=(kind) id=(name) name=(name) class=(input_class(errors, name)) value=(value);
            (field_error(errors, name))
        }
    }
}

fn select(name: &str, label: &str, options: &[(&str, &str)], selected: &str, errors: &ValidationErrors) -> Markup {
    html! {
        div class="form-group" {
            label for=(name) { (label) }
            select id=(name) name=(name) class=(input_class(errors, name)) {
                @for (value, text) in options {
                    option value=(value) selected[*value == selected] { (text) }
                }
            }
            (field_error(errors, name))
        }
    }
}

// --- Authentication ------------------------------------------------------

pub fn login_form(identifier: &str, errors: &ValidationErrors) -> Markup {
    html! {
        section class="auth-card" {
            h1 { "Welcome Back" }
            form id="loginForm" method="post" action="/login" novalidate {
                (input("text", "email", "Email or Username", identifier, errors))
                (input("password", "password", "Password", "", errors))
                button type="submit" id="loginBtn" class="btn btn-primary" {
                    span id="buttonText" { "Login" }
                }
            }
            p class="auth-switch" {
                "Don't have an account? "
                a href="/register" { "Sign up" }
            }
        }
    }
}

pub fn register_form(name: &str, email: &str, errors: &ValidationErrors) -> Markup {
    html! {
        section class="auth-card" {
            h1 { "Create Account" }
            form method="post" action="/register" novalidate {
                (input("text", "name", "Username", name, errors))
                (input("email", "email", "Email", email, errors))
                (input("password", "password", "Password", "", errors))
                (input("password", "repeat-password", "Repeat Password", "", errors))
                button type="submit" class="btn btn-primary sign-up-btn" { "SIGN UP" }
            }
            p class="auth-switch" {
                "Already have an account? "
                a href="/login" { "Login" }
            }
        }
    }
}

// --- Symptom tracker -----------------------------------------------------

fn range(values: &FormFields, name: &str, label: &str, errors: &ValidationErrors) -> Markup {
    let value = values.raw(name);
    html! {
        div class="form-group range-group" {
            label for=(name) {
                (label) " "
                span id={ (name) "Value" } class="range-value" { (value) }
            }
            input type="range" class="range-input" id=(name) name=(name) min="0" max=(Level::MAX) value=(value);
            (field_error(errors, name))
        }
    }
}

/// The daily tracking form
///
/// Rendered from field values rather than a [`crate::tracker::TrackingEntry`]
/// so a rejected submission comes back exactly as typed. Handlers pass
/// [`crate::tracker::form_values`] of the stored or fresh entry otherwise.
pub fn tracker_form(values: &FormFields, errors: &ValidationErrors) -> Markup {
    let date = values.raw("date");
    let bleeding: Vec<(&str, &str)> = Bleeding::all().iter().map(|b| (b.as_str(), b.as_str())).collect();
    let mucus: Vec<(&str, &str)> = CervicalMucus::all()
        .iter()
        .map(|c| (c.as_str(), c.as_str()))
        .collect();
    let checked: Vec<&str> = values.all("symptoms").collect();

    html! {
        form class="date-picker" method="get" action="/tracker" {
            label for="dateNav" { "Date" }
            input type="date" id="dateNav" name="date" value=(date);
            button type="submit" class="btn btn-outline" { "Load" }
        }

        form id="trackingForm" method="post" action="/tracker" {
            input type="hidden" id="trackingDate" name="date" value=(date);
            (field_error(errors, "date"))

            fieldset {
                legend { "Pain" }
                (range(values, "painLevel", "Overall Pain", errors))
                (range(values, "pelvicPain", "Pelvic Pain", errors))
                (range(values, "backPain", "Back Pain", errors))
                (range(values, "headacheLevel", "Headache", errors))
                (range(values, "cramps", "Cramps", errors))
            }

            fieldset {
                legend { "Cycle" }
                (select("bleeding", "Bleeding", &bleeding, values.raw("bleeding"), errors))
                (input("number", "cycleDay", "Cycle Day", values.raw("cycleDay"), errors))
                (select("cervicalMucus", "Cervical Mucus", &mucus, values.raw("cervicalMucus"), errors))
            }

            fieldset {
                legend { "Physical Symptoms" }
                div class="symptom-grid" {
                    @for tag in KNOWN_SYMPTOMS {
                        label class="checkbox-item" {
                            input type="checkbox" name="symptoms" value=(tag) checked[checked.contains(tag)];
                            " " (tag.replace('-', " "))
                        }
                    }
                }
                (field_error(errors, "symptoms"))
            }

            fieldset {
                legend { "Mood & Mind" }
                div class="mood-selector" {
                    @for mood in Mood::all() {
                        label class="mood-option" data-mood=(mood.as_str()) {
                            input type="radio" name="mood" value=(mood.as_str()) checked[values.get("mood") == Some(mood.as_str())];
                            span class="mood-emoji" { (mood.glyph()) }
                            " " (mood.as_str())
                        }
                    }
                }
                (field_error(errors, "mood"))
                (range(values, "anxietyLevel", "Anxiety", errors))
                (range(values, "stressLevel", "Stress", errors))
            }

            fieldset {
                legend { "Sleep & Energy" }
                (input("number", "sleepHours", "Sleep Hours", values.raw("sleepHours"), errors))
                (range(values, "sleepQuality", "Sleep Quality", errors))
                (range(values, "energyLevel", "Energy Level", errors))
                (range(values, "fatigueLevel", "Fatigue", errors))
            }

            fieldset {
                legend { "Notes" }
                div class="form-group" {
                    label for="notes" { "Notes" }
                    textarea id="notes" name="notes" { (values.raw("notes")) }
                }
                (input("text", "medications", "Medications", values.raw("medications"), errors))
            }

            div class="form-actions" {
                button type="submit" class="btn btn-primary" { "Save Entry" }
                a class="btn btn-outline" href="/tracker/export" { "Export CSV" }
            }
        }
    }
}

/// Date shown by the tracker form when none was requested
pub fn tracker_date(query: &FormFields, today: NaiveDate) -> NaiveDate {
    query
        .get("date")
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .unwrap_or(today)
}

// --- Risk assessment -----------------------------------------------------

const VITALS: [(&str, &str); 5] = [
    ("pulseRate", "Pulse Rate (bpm)"),
    ("respiratoryRate", "Respiratory Rate"),
    ("hb", "Hemoglobin (g/dl)"),
    ("bpSystolic", "BP Systolic (mmHg)"),
    ("bpDiastolic", "BP Diastolic (mmHg)"),
];

const HORMONES: [(&str, &str); 10] = [
    ("betaHCG1", "I beta-HCG (mIU/mL)"),
    ("betaHCG2", "II beta-HCG (mIU/mL)"),
    ("fsh", "FSH (mIU/mL)"),
    ("lh", "LH (mIU/mL)"),
    ("tsh", "TSH (mIU/L)"),
    ("amh", "AMH (ng/mL)"),
    ("prl", "PRL (ng/mL)"),
    ("vitD3", "Vit D3 (ng/mL)"),
    ("prg", "PRG (ng/mL)"),
    ("rbs", "RBS (mg/dl)"),
];

const ULTRASOUND: [(&str, &str); 5] = [
    ("follicleNoL", "Follicle No. (L)"),
    ("follicleNoR", "Follicle No. (R)"),
    ("avgFSizeL", "Avg. F size (L) (mm)"),
    ("avgFSizeR", "Avg. F size (R) (mm)"),
    ("endometrium", "Endometrium (mm)"),
];

const SYMPTOM_FLAGS: [(&str, &str); 7] = [
    ("weightGain", "Weight Gain"),
    ("hairGrowth", "Excessive Hair Growth"),
    ("skinDarkening", "Skin Darkening"),
    ("hairLoss", "Hair Loss"),
    ("pimples", "Pimples"),
    ("fastFood", "Regular Fast Food"),
    ("regExercise", "Regular Exercise"),
];

const BLOOD_GROUPS: [(&str, &str); 9] = [
    ("", "Select"),
    ("A+", "A+"),
    ("A-", "A-"),
    ("B+", "B+"),
    ("B-", "B-"),
    ("O+", "O+"),
    ("O-", "O-"),
    ("AB+", "AB+"),
    ("AB-", "AB-"),
];

fn number_fields(fields: &[(&str, &str)], values: &FormFields, errors: &ValidationErrors) -> Markup {
    html! {
        @for (name, label) in fields {
            (input("number", name, label, values.raw(name), errors))
        }
    }
}

fn derived(id: &str, label: &str, value: Option<f64>) -> Markup {
    let shown = value.map(|v| v.to_string()).unwrap_or_default();
    html! {
        div class="form-group" {
            label for=(id) { (label) }
            input type="text" id=(id) name=(id) class="form-input" value=(shown) readonly;
        }
    }
}

/// The risk assessment form
///
/// BMI and waist-hip ratio are derived from the submitted measurements and
/// shown read-only.
pub fn prediction_form(values: &FormFields, errors: &ValidationErrors) -> Markup {
    let mut measures = BodyMeasurements::new();
    measures
        .input(Measure::Weight, values.raw("weight"))
        .input(Measure::Height, values.raw("height"))
        .input(Measure::Waist, values.raw("waist"))
        .input(Measure::Hip, values.raw("hip"));

    html! {
        form id="predictionForm" method="post" action="/predict" novalidate {
            fieldset {
                legend { "Basic Information" }
                (input("number", "age", "Age (yrs)", values.raw("age"), errors))
                (input("number", "weight", "Weight (kg)", values.raw("weight"), errors))
                (input("number", "height", "Height (cm)", values.raw("height"), errors))
                (derived("bmi", "BMI", measures.bmi()))
                (select("bloodGroup", "Blood Group", &BLOOD_GROUPS, values.raw("bloodGroup"), errors))
                (input("number", "marriageStatus", "Marriage Status (yrs)", values.raw("marriageStatus"), errors))
            }

            fieldset {
                legend { "Vital Signs" }
                (number_fields(&VITALS, values, errors))
            }

            fieldset {
                legend { "Menstrual History" }
                (select("cycle", "Cycle (R/I)", &[("R", "Regular"), ("I", "Irregular")], values.get("cycle").unwrap_or("R"), errors))
                (input("number", "cycleLength", "Cycle Length (days)", values.raw("cycleLength"), errors))
                (select("pregnant", "Pregnant", &[("N", "No"), ("Y", "Yes")], values.get("pregnant").unwrap_or("N"), errors))
                (input("number", "abortions", "No. of Abortions", values.raw("abortions"), errors))
            }

            fieldset {
                legend { "Hormone Levels" }
                (number_fields(&HORMONES, values, errors))
            }

            fieldset {
                legend { "Body Measurements" }
                (input("number", "hip", "Hip (inch)", values.raw("hip"), errors))
                (input("number", "waist", "Waist (inch)", values.raw("waist"), errors))
                (derived("waistHipRatio", "Waist:Hip Ratio", measures.waist_hip_ratio()))
            }

            fieldset {
                legend { "Ultrasound Findings" }
                (number_fields(&ULTRASOUND, values, errors))
            }

            fieldset {
                legend { "Symptoms & Lifestyle" }
                div class="symptom-grid" {
                    @for (name, label) in SYMPTOM_FLAGS {
                        label class="checkbox-item" {
                            input type="checkbox" id=(name) name=(name) value="1" checked[values.checked(name)];
                            " " (label)
                        }
                    }
                }
            }

            button type="submit" id="predictBtn" class="btn btn-primary" {
                span class="btn-text" { "Analyze Risk" }
            }
        }
    }
}
