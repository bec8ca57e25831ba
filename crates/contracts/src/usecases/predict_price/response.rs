use serde::{Deserialize, Serialize};

/// Body of `GET /api/predict-price`.
///
/// The service answers `200 { "error": ... }` when there is not enough order
/// history for the crop, so both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictPriceResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_price: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictPriceResponse {
    /// Suggested price, or the server message (if any) explaining its absence
    pub fn into_result(self) -> Result<f64, Option<String>> {
        match (self.predicted_price, self.error) {
            (Some(price), None) if price.is_finite() => Ok(price),
            (_, Some(error)) => Err(Some(error).filter(|e| !e.trim().is_empty())),
            _ => Err(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::predict_price::PredictPriceRoute;

    #[test]
    fn test_price_present() {
        let body: PredictPriceResponse = serde_json::from_str(r#"{"predicted_price": 2150.5}"#).unwrap();
        assert_eq!(body.into_result(), Ok(2150.5));
    }

    #[test]
    fn test_not_enough_history_is_an_error() {
        let body: PredictPriceResponse = serde_json::from_str(
            r#"{"error": "Not enough historical data to predict a price for Wheat."}"#,
        )
        .unwrap();
        assert_eq!(
            body.into_result(),
            Err(Some("Not enough historical data to predict a price for Wheat.".to_string()))
        );
    }

    #[test]
    fn test_empty_body_has_no_message() {
        let body: PredictPriceResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_result(), Err(None));
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(PredictPriceRoute::Query.path_for("Paddy%20%28Rice%29"), "/api/predict-price?crop=Paddy%20%28Rice%29");
        assert_eq!(PredictPriceRoute::Path.path_for("Wheat"), "/api/predict-price/Wheat");
    }
}
