//! JSON body returned for a successful prediction.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResponse {
    pub cl: f64,
    pub cd: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl PredictionResponse {
    /// Rounds both coefficients to 5 decimal places.
    pub fn new(cl: f64, cd: f64, warning: Option<String>) -> Self {
        Self {
            cl: round5(cl),
            cd: round5(cd),
            warning,
        }
    }
}

fn round5(value: f64) -> f64 {
    // Scaling by 1e5 would overflow near f64::MAX; no 5th decimal survives here anyway.
    if value.abs() >= 1e15 {
        return value;
    }
    (value * 1e5).round() / 1e5
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round5() {
        assert_eq!(round5(0.123456789), 0.12346);
        assert_eq!(round5(-0.000004), 0.0);
        assert_eq!(round5(1.5), 1.5);
        assert_eq!(round5(-0.0000151), -0.00002);
    }

    #[test]
    fn test_round5_keeps_huge_values_finite() {
        assert_eq!(round5(1e307), 1e307);
        assert_eq!(round5(-1.7e308), -1.7e308);
        assert_eq!(round5(1e15), 1e15);

        let body = serde_json::to_value(PredictionResponse::new(1e307, 0.5, None)).unwrap();
        assert_eq!(body["cl"].as_f64(), Some(1e307));
    }

    #[test]
    fn test_omits_absent_warning() {
        let body = serde_json::to_value(PredictionResponse::new(0.1, 0.2, None)).unwrap();
        assert_eq!(body, json!({"cl": 0.1, "cd": 0.2}));
    }

    #[test]
    fn test_includes_warning() {
        let response = PredictionResponse::new(0.712345678, 0.0412, Some("careful".into()));
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body, json!({"cl": 0.71235, "cd": 0.0412, "warning": "careful"}));
    }
}
