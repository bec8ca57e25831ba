use serde::{Deserialize, Serialize};

use crate::domain::common::{OrderId, PartnerId};

/// Body of `POST /order/{order_id}/assign-logistics`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignLogisticsRequest {
    pub partner_id: PartnerId,
}

pub fn assign_logistics_path(order_id: &OrderId) -> String {
    format!("/order/{}/assign-logistics", order_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_and_path() {
        let order_id = OrderId::parse("42").unwrap();
        let request = AssignLogisticsRequest {
            partner_id: PartnerId::parse("p1").unwrap(),
        };
        assert_eq!(assign_logistics_path(&order_id), "/order/42/assign-logistics");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "partner_id": "p1" })
        );
    }
}
