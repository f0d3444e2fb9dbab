use serde::{
    Deserialize,
    Serialize,
};

use crate::core::models::RiskLevel;

pub const SIMULATE_PATH: &str = "simulate";
pub const PREDICT_PATH: &str = "predict";
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000";

/// Single-year answer from the `predict` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPrediction {
    pub risk: RiskLevel,
    pub probability: f64,
}
