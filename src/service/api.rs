use reqwest::Client;

use super::types::{
    PointPrediction,
    PREDICT_PATH,
    SIMULATE_PATH,
};
use crate::core::{
    http::{
        endpoint,
        post_json,
    },
    models::{
        ParameterSet,
        Projection,
    },
    MyoSimError,
};

pub async fn simulate(
    client: &Client,
    base_url: &str,
    parameters: &ParameterSet,
) -> Result<Projection, MyoSimError> {
    let body = post_json(client, &endpoint(base_url, SIMULATE_PATH), parameters).await?.text().await?;
    parse_projection(&body)
}

pub async fn predict(
    client: &Client,
    base_url: &str,
    parameters: &ParameterSet,
) -> Result<PointPrediction, MyoSimError> {
    let body = post_json(client, &endpoint(base_url, PREDICT_PATH), parameters).await?.text().await?;
    let prediction: PointPrediction = serde_json::from_str(&body)?;
    check_probability(prediction.probability, 0)?;
    Ok(prediction)
}

/// Decodes a `simulate` body. Any bad point rejects the whole projection.
pub fn parse_projection(body: &str) -> Result<Projection, MyoSimError> {
    let projection: Projection = serde_json::from_str(body)?;

    for (index, point) in projection.points().iter().enumerate() {
        check_probability(point.probability, index)?;
    }

    Ok(projection)
}

fn check_probability(probability: f64, index: usize) -> Result<(), MyoSimError> {
    if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
        return Err(MyoSimError::MalformedProjection(format!(
            "probability {} at index {} is outside [0, 1]",
            probability, index
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::core::{
        errors::{
            FailureKind,
            ProjectionFailure,
        },
        http::http_client,
        models::RiskLevel,
    };

    #[test]
    fn test_parse_full_projection() {
        let body = serde_json::to_string(
            &(0..21)
                .map(|i| {
                    serde_json::json!({
                        "year_offset": i,
                        "age": 45 + i,
                        "probability": 0.2 + i as f64 * 0.01,
                    })
                })
                .collect::<Vec<_>>(),
        )
        .unwrap();

        let projection = parse_projection(&body).unwrap();
        assert_eq!(projection.len(), 21);
        assert_eq!(projection.get(20).unwrap().age, 65);
        assert_eq!(projection.get(20).unwrap().year_offset, 20);
    }

    #[test]
    fn test_parse_empty_projection_is_valid() {
        assert!(parse_projection("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_bodies_are_rejected() {
        let cases = [
            r#"{"detail": "Model missing"}"#,
            r#"[{"age": 50}]"#,
            r#"[{"age": 50, "probability": 0.3}, {"age": 51, "probability": 1.2}]"#,
            r#"[{"age": "fifty", "probability": 0.3}]"#,
            "not json",
        ];

        for body in cases {
            let failure: ProjectionFailure = parse_projection(body).unwrap_err().into();
            assert_eq!(failure.kind, FailureKind::Malformed, "body: {}", body);
        }
    }

    #[test]
    fn test_point_prediction_shape() {
        let prediction: PointPrediction =
            serde_json::from_str(r#"{"risk": "High", "probability": 0.71}"#).unwrap();
        assert_eq!(prediction.risk, RiskLevel::High);
    }

    #[tokio::test]
    async fn test_unreachable_service_maps_to_failure() {
        let client = http_client(Duration::from_secs(2)).unwrap();
        let result = simulate(&client, "http://127.0.0.1:9", &ParameterSet::default()).await;

        let failure: ProjectionFailure = result.unwrap_err().into();
        assert!(
            matches!(failure.kind, FailureKind::Connection | FailureKind::Timeout),
            "unexpected failure: {}",
            failure
        );
    }
}
