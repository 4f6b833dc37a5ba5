//! Prediction request model
//!
//! The JSON body posted to the inference service. Optional clinical values
//! serialize as `null` when the input was left blank; symptom flags serialize
//! as `0`/`1`.

use serde::{Deserialize, Serialize};

use crate::form::FormFields;
use crate::validation::{BodyMeasurements, Measure, ValidationErrors};

/// Menstrual cycle regularity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cycle {
    #[default]
    #[serde(rename = "R")]
    Regular,
    #[serde(rename = "I")]
    Irregular,
}

impl Cycle {
    pub fn code(&self) -> &'static str {
        match self {
            Cycle::Regular => "R",
            Cycle::Irregular => "I",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "R" => Some(Cycle::Regular),
            "I" => Some(Cycle::Irregular),
            _ => None,
        }
    }
}

/// Symptom and lifestyle checkboxes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymptomFlags {
    #[serde(with = "flag")]
    pub weight_gain: bool,
    #[serde(with = "flag")]
    pub hair_growth: bool,
    #[serde(with = "flag")]
    pub skin_darkening: bool,
    #[serde(with = "flag")]
    pub hair_loss: bool,
    #[serde(with = "flag")]
    pub pimples: bool,
    #[serde(with = "flag")]
    pub fast_food: bool,
    #[serde(with = "flag")]
    pub reg_exercise: bool,
}

/// Clinical inputs for one risk prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub age: u32,
    pub weight: f64,
    pub height: u32,
    pub bmi: f64,
    pub blood_group: String,
    pub marriage_status: u32,

    pub pulse_rate: Option<u32>,
    pub respiratory_rate: Option<u32>,
    pub hb: Option<f64>,
    pub bp_systolic: Option<u32>,
    pub bp_diastolic: Option<u32>,

    pub cycle: Cycle,
    pub cycle_length: Option<u32>,
    /// `Y` or `N`
    pub pregnant: String,
    pub abortions: u32,

    #[serde(rename = "betaHCG1")]
    pub beta_hcg1: Option<f64>,
    #[serde(rename = "betaHCG2")]
    pub beta_hcg2: Option<f64>,
    pub fsh: Option<f64>,
    pub lh: Option<f64>,
    pub tsh: Option<f64>,
    pub amh: Option<f64>,
    pub prl: Option<f64>,
    pub vit_d3: Option<f64>,
    pub prg: Option<f64>,
    pub rbs: Option<u32>,

    pub hip: Option<f64>,
    pub waist: Option<f64>,

    pub follicle_no_l: Option<u32>,
    pub follicle_no_r: Option<u32>,
    pub avg_f_size_l: Option<f64>,
    pub avg_f_size_r: Option<f64>,
    pub endometrium: Option<f64>,

    #[serde(flatten)]
    pub flags: SymptomFlags,
}

impl PredictionRequest {
    /// Decode and validate a prediction form submission
    ///
    /// BMI is always derived from weight and height. The posted `bmi` is
    /// only used when those cannot produce one.
    pub fn from_form(form: &FormFields) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let age = required::<u32>(form, "age", "Age", &mut errors);
        let weight = required::<f64>(form, "weight", "Weight", &mut errors);
        let height = required::<u32>(form, "height", "Height", &mut errors);

        let mut measures = BodyMeasurements::new();
        measures
            .input(Measure::Weight, form.raw("weight"))
            .input(Measure::Height, form.raw("height"));
        let bmi = measures
            .bmi()
            .or_else(|| form.parse_opt::<f64>("bmi").filter(|b| *b > 0.0));

        let blood_group = form.get("bloodGroup").unwrap_or_default().to_string();
        if blood_group.is_empty() {
            errors.add("bloodGroup", "Please select a blood group");
        }

        let cycle = match form.get("cycle") {
            None => Cycle::default(),
            Some(code) => Cycle::from_code(code).unwrap_or_else(|| {
                errors.add("cycle", "Choose regular (R) or irregular (I)");
                Cycle::default()
            }),
        };

        let pregnant = match form.get("pregnant") {
            None => "N".to_string(),
            Some(p @ ("Y" | "N")) => p.to_string(),
            Some(_) => {
                errors.add("pregnant", "Choose Y or N");
                "N".to_string()
            }
        };

        let flags = SymptomFlags {
            weight_gain: form.checked("weightGain"),
            hair_growth: form.checked("hairGrowth"),
            skin_darkening: form.checked("skinDarkening"),
            hair_loss: form.checked("hairLoss"),
            pimples: form.checked("pimples"),
            fast_food: form.checked("fastFood"),
            reg_exercise: form.checked("regExercise"),
        };

        let request = PredictionRequest {
            age: age.unwrap_or_default(),
            weight: weight.unwrap_or_default(),
            height: height.unwrap_or_default(),
            bmi: bmi.unwrap_or_default(),
            blood_group,
            marriage_status: form.parse_opt("marriageStatus").unwrap_or(0),

            pulse_rate: positive(form, "pulseRate"),
            respiratory_rate: positive(form, "respiratoryRate"),
            hb: positive(form, "hb"),
            bp_systolic: positive(form, "bpSystolic"),
            bp_diastolic: positive(form, "bpDiastolic"),

            cycle,
            cycle_length: positive(form, "cycleLength"),
            pregnant,
            abortions: form.parse_opt("abortions").unwrap_or(0),

            beta_hcg1: positive(form, "betaHCG1"),
            beta_hcg2: positive(form, "betaHCG2"),
            fsh: positive(form, "fsh"),
            lh: positive(form, "lh"),
            tsh: positive(form, "tsh"),
            amh: positive(form, "amh"),
            prl: positive(form, "prl"),
            vit_d3: positive(form, "vitD3"),
            prg: positive(form, "prg"),
            rbs: positive(form, "rbs"),

            hip: positive(form, "hip"),
            waist: positive(form, "waist"),

            follicle_no_l: positive(form, "follicleNoL"),
            follicle_no_r: positive(form, "follicleNoR"),
            avg_f_size_l: positive(form, "avgFSizeL"),
            avg_f_size_r: positive(form, "avgFSizeR"),
            endometrium: positive(form, "endometrium"),

            flags,
        };

        errors.into_result(request)
    }
}

fn required<T>(form: &FormFields, name: &'static str, label: &str, errors: &mut ValidationErrors) -> Option<T>
where
    T: std::str::FromStr + Default + PartialOrd,
{
    match form.get(name) {
        None => {
            errors.add(name, format!("{} is required", label));
            None
        }
        Some(raw) => match raw.parse::<T>() {
            Ok(v) if v > T::default() => Some(v),
            _ => {
                errors.add(name, format!("{} must be a positive number", label));
                None
            }
        },
    }
}

/// Optional clinical value; blank, unparseable and zero all map to `None`
fn positive<T>(form: &FormFields, name: &str) -> Option<T>
where
    T: std::str::FromStr + Default + PartialOrd,
{
    form.parse_opt::<T>(name).filter(|v| *v > T::default())
}

/// Serialize a `bool` as `0`/`1`
mod flag {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(deserializer)? != 0)
    }
}
