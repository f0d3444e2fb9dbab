use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

/// Years projected past the current one.
pub const HORIZON_YEARS: u32 = 20;
pub const HIGH_RISK_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Continuous,
    Categorical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Age,
    Sex,
    ChestPain,
    RestingBp,
    Cholesterol,
    FastingBloodSugar,
    RestingEcg,
    MaxHeartRate,
    ExerciseAngina,
    StDepression,
    Slope,
    Vessels,
    Thal,
}

/// Widget hints for a field. The core never clamps to these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Age,
        Field::Sex,
        Field::ChestPain,
        Field::RestingBp,
        Field::Cholesterol,
        Field::FastingBloodSugar,
        Field::RestingEcg,
        Field::MaxHeartRate,
        Field::ExerciseAngina,
        Field::StDepression,
        Field::Slope,
        Field::Vessels,
        Field::Thal,
    ];

    /// Key used by the projection service.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Age => "age",
            Field::Sex => "sex",
            Field::ChestPain => "cp",
            Field::RestingBp => "trestbps",
            Field::Cholesterol => "chol",
            Field::FastingBloodSugar => "fbs",
            Field::RestingEcg => "restecg",
            Field::MaxHeartRate => "thalach",
            Field::ExerciseAngina => "exang",
            Field::StDepression => "oldpeak",
            Field::Slope => "slope",
            Field::Vessels => "ca",
            Field::Thal => "thal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Age => "Age",
            Field::Sex => "Sex",
            Field::ChestPain => "Chest Pain Type",
            Field::RestingBp => "Systolic BP",
            Field::Cholesterol => "Cholesterol",
            Field::FastingBloodSugar => "Fasting Blood Sugar > 120",
            Field::RestingEcg => "Resting ECG",
            Field::MaxHeartRate => "Max Heart Rate",
            Field::ExerciseAngina => "Exercise Angina",
            Field::StDepression => "ST Depression",
            Field::Slope => "ST Slope",
            Field::Vessels => "Major Vessels",
            Field::Thal => "Thalassemia",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Age
            | Field::RestingBp
            | Field::Cholesterol
            | Field::MaxHeartRate
            | Field::StDepression
            | Field::Vessels => FieldKind::Continuous,
            _ => FieldKind::Categorical,
        }
    }

    pub fn bounds(&self) -> FieldBounds {
        let (min, max, step) = match self {
            Field::Age => (20.0, 80.0, 1.0),
            Field::Sex => (0.0, 1.0, 1.0),
            Field::ChestPain => (0.0, 3.0, 1.0),
            Field::RestingBp => (90.0, 200.0, 1.0),
            Field::Cholesterol => (120.0, 400.0, 1.0),
            Field::FastingBloodSugar => (0.0, 1.0, 1.0),
            Field::RestingEcg => (0.0, 2.0, 1.0),
            Field::MaxHeartRate => (60.0, 220.0, 1.0),
            Field::ExerciseAngina => (0.0, 1.0, 1.0),
            Field::StDepression => (0.0, 5.0, 0.1),
            Field::Slope => (0.0, 2.0, 1.0),
            Field::Vessels => (0.0, 3.0, 1.0),
            Field::Thal => (0.0, 3.0, 1.0),
        };
        FieldBounds { min, max, step }
    }

    /// Display names for the codes of a categorical field.
    pub fn options(&self) -> &'static [(i64, &'static str)] {
        match self {
            Field::Sex => &[(1, "Male"), (0, "Female")],
            Field::ChestPain => &[
                (0, "Typical Angina"),
                (1, "Atypical Angina"),
                (2, "Non-anginal Pain"),
                (3, "Asymptomatic"),
            ],
            Field::FastingBloodSugar | Field::ExerciseAngina => &[(0, "No"), (1, "Yes")],
            Field::RestingEcg => {
                &[(0, "Normal"), (1, "ST-T Abnormality"), (2, "LV Hypertrophy")]
            }
            Field::Slope => &[(0, "Upsloping"), (1, "Flat"), (2, "Downsloping")],
            Field::Thal => &[(0, "Unknown"), (1, "Normal"), (2, "Fixed Defect"), (3, "Reversible")],
            _ => &[],
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Full set of clinical inputs, serialized exactly as the service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub age: f64,
    pub sex: i64,
    pub cp: i64,
    pub trestbps: f64,
    pub chol: f64,
    pub fbs: i64,
    pub restecg: i64,
    pub thalach: f64,
    pub exang: i64,
    pub oldpeak: f64,
    pub slope: i64,
    pub ca: f64,
    pub thal: i64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            age: 45.0,
            sex: 1,
            cp: 2,
            trestbps: 130.0,
            chol: 200.0,
            fbs: 0,
            restecg: 0,
            thalach: 150.0,
            exang: 0,
            oldpeak: 1.0,
            slope: 1,
            ca: 0.0,
            thal: 3,
        }
    }
}

impl ParameterSet {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Age => self.age,
            Field::Sex => self.sex as f64,
            Field::ChestPain => self.cp as f64,
            Field::RestingBp => self.trestbps,
            Field::Cholesterol => self.chol,
            Field::FastingBloodSugar => self.fbs as f64,
            Field::RestingEcg => self.restecg as f64,
            Field::MaxHeartRate => self.thalach,
            Field::ExerciseAngina => self.exang as f64,
            Field::StDepression => self.oldpeak,
            Field::Slope => self.slope as f64,
            Field::Vessels => self.ca,
            Field::Thal => self.thal as f64,
        }
    }

    /// Categorical fields take the nearest integer code.
    pub fn set(&mut self, field: Field, value: f64) {
        let code = value.round() as i64;
        match field {
            Field::Age => self.age = value,
            Field::Sex => self.sex = code,
            Field::ChestPain => self.cp = code,
            Field::RestingBp => self.trestbps = value,
            Field::Cholesterol => self.chol = value,
            Field::FastingBloodSugar => self.fbs = code,
            Field::RestingEcg => self.restecg = code,
            Field::MaxHeartRate => self.thalach = value,
            Field::ExerciseAngina => self.exang = code,
            Field::StDepression => self.oldpeak = value,
            Field::Slope => self.slope = code,
            Field::Vessels => self.ca = value,
            Field::Thal => self.thal = code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    #[serde(default)]
    pub year_offset: u32,
    pub age: i64,
    pub probability: f64,
}

/// Risk per future year; index 0 is the current year.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Projection {
    points: Vec<ProjectionPoint>,
}

impl Projection {
    pub fn new(points: Vec<ProjectionPoint>) -> Self {
        Self { points }
    }

    pub fn get(&self, offset: usize) -> Option<&ProjectionPoint> {
        self.points.get(offset)
    }

    pub fn points(&self) -> &[ProjectionPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn peak(&self) -> Option<&ProjectionPoint> {
        self.points.iter().max_by(|a, b| a.probability.total_cmp(&b.probability))
    }
}

/// Monotonic id of a dispatched projection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Low,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability > HIGH_RISK_THRESHOLD {
            RiskLevel::High
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "HIGH RISK",
            RiskLevel::Low => "LOW RISK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_set_serializes_service_keys() {
        let json = serde_json::to_value(ParameterSet::default()).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), Field::ALL.len());
        for field in Field::ALL {
            assert!(object.contains_key(field.name()), "missing {}", field.name());
        }
        assert_eq!(json["sex"], serde_json::json!(1));
        assert_eq!(json["oldpeak"], serde_json::json!(1.0));
    }

    #[test]
    fn test_set_rounds_categorical_codes() {
        let mut params = ParameterSet::default();
        params.set(Field::ChestPain, 2.6);
        params.set(Field::StDepression, 2.6);

        assert_eq!(params.cp, 3);
        assert_eq!(params.get(Field::StDepression), 2.6);
    }

    #[test]
    fn test_projection_point_year_offset_is_optional() {
        let projection: Projection =
            serde_json::from_str(r#"[{"age": 50, "probability": 0.3}]"#).unwrap();

        assert_eq!(projection.len(), 1);
        assert_eq!(projection.get(0).unwrap().year_offset, 0);
        assert!(projection.get(1).is_none());
    }

    #[test]
    fn test_risk_level_threshold_is_exclusive() {
        assert_eq!(RiskLevel::from_probability(0.5), RiskLevel::Low);
        assert_eq!(RiskLevel::from_probability(0.500001), RiskLevel::High);
    }
}
