use contracts::usecases::predict_price::{PredictPriceResponse, PredictPriceRoute};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_base, api_url, read_json};
use crate::shared::error::FrontendError;

/// Source of server-computed price suggestions
#[allow(async_fn_in_trait)]
pub trait PricePredictor {
    async fn predict_price(&self, crop_name: &str) -> Result<f64, FrontendError>;
}

/// `GET /api/predict-price` over fetch
#[derive(Debug, Clone)]
pub struct HttpPricePredictor {
    base: String,
    route: PredictPriceRoute,
}

impl HttpPricePredictor {
    pub fn new(configured_base: &str, route: PredictPriceRoute) -> Self {
        Self {
            base: api_base(configured_base),
            route,
        }
    }
}

impl PricePredictor for HttpPricePredictor {
    async fn predict_price(&self, crop_name: &str) -> Result<f64, FrontendError> {
        let path = self.route.path_for(&urlencoding::encode(crop_name));
        let url = api_url(&self.base, &path);
        log::debug!("requesting price suggestion: {}", url);

        let body: PredictPriceResponse = read_json(Request::get(&url).send().await).await?;
        // 200 with `{ "error": ... }` means the backend had too little history
        body.into_result()
            .map_err(|message| FrontendError::Server { status: 200, message })
    }
}
