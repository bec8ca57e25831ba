use serde::{Deserialize, Serialize};

use crate::domain::common::PartnerId;

/// Logistics provider as listed by `GET /api/logistics-partners`.
///
/// The buyer pages receive `phone`/`rating`, the company dashboard receives
/// `vehicles_available`/`contact_email`; every display field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticsPartner {
    pub id: PartnerId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, alias = "contact_email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, alias = "vehicles", skip_serializing_if = "Option::is_none")]
    pub vehicles_available: Option<u32>,
}

impl LogisticsPartner {
    /// Contact fields joined for the secondary line of a partner entry
    pub fn contact_line(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.phone.as_ref().map(|p| format!("Phone: {}", p)),
            self.email.as_ref().map(|e| format!("Email: {}", e)),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| parts.join(" | "))
    }

    /// Rating / fleet summary, e.g. "Rating: 4.7" or "Vehicles: 12"
    pub fn capacity_line(&self) -> Option<String> {
        let parts: Vec<String> = [
            self.rating.map(|r| format!("Rating: {:.1}", r)),
            self.vehicles_available.map(|v| format!("Vehicles: {}", v)),
        ]
        .into_iter()
        .flatten()
        .collect();

        (!parts.is_empty()).then(|| parts.join(" | "))
    }
}
