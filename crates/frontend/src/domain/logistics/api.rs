use contracts::domain::common::{OrderId, PartnerId};
use contracts::domain::logistics_partner::LogisticsPartner;
use contracts::usecases::assign_logistics::{
    assign_logistics_path, AssignLogisticsRequest, AssignLogisticsResponse,
};
use gloo_net::http::Request;

use crate::shared::api_utils::{api_base, api_url, read_json};
use crate::shared::error::FrontendError;

/// Backend calls behind the logistics dialog
#[allow(async_fn_in_trait)]
pub trait LogisticsApi {
    async fn list_partners(&self) -> Result<Vec<LogisticsPartner>, FrontendError>;

    /// Assign `partner_id` to `order_id`; `Ok` carries the server's message
    async fn assign_partner(
        &self,
        order_id: &OrderId,
        partner_id: &PartnerId,
    ) -> Result<Option<String>, FrontendError>;
}

#[derive(Debug, Clone)]
pub struct HttpLogisticsApi {
    base: String,
}

impl HttpLogisticsApi {
    pub fn new(configured_base: &str) -> Self {
        Self {
            base: api_base(configured_base),
        }
    }
}

impl LogisticsApi for HttpLogisticsApi {
    async fn list_partners(&self) -> Result<Vec<LogisticsPartner>, FrontendError> {
        let url = api_url(&self.base, "/api/logistics-partners");
        read_json(Request::get(&url).send().await).await
    }

    async fn assign_partner(
        &self,
        order_id: &OrderId,
        partner_id: &PartnerId,
    ) -> Result<Option<String>, FrontendError> {
        let url = api_url(&self.base, &assign_logistics_path(order_id));
        let body = AssignLogisticsRequest {
            partner_id: partner_id.clone(),
        };
        let request = Request::post(&url)
            .json(&body)
            .map_err(|e| FrontendError::BrowserApi(format!("failed to build request: {}", e)))?;

        let reply: AssignLogisticsResponse = read_json(request.send().await).await?;
        if reply.success {
            if let Some(status) = &reply.new_status {
                log::info!("order {} is now '{}'", order_id, status);
            }
            Ok(reply.message)
        } else {
            Err(FrontendError::Server {
                status: 200,
                message: reply.error,
            })
        }
    }
}
