use serde::{Deserialize, Serialize};

/// Where the crop name goes in the price-prediction URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictPriceRoute {
    /// `/api/predict-price?crop={crop}`
    #[default]
    Query,
    /// `/api/predict-price/{crop}`
    Path,
}

impl PredictPriceRoute {
    /// Build the request path for an already percent-encoded crop name
    pub fn path_for(self, encoded_crop: &str) -> String {
        match self {
            PredictPriceRoute::Query => format!("/api/predict-price?crop={}", encoded_crop),
            PredictPriceRoute::Path => format!("/api/predict-price/{}", encoded_crop),
        }
    }
}
