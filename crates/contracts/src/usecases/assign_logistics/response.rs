use serde::{Deserialize, Serialize};

/// Reply to an assignment request.
///
/// Success: `{ "success": true, "message": "...", "new_status": "Awaiting Pickup" }`.
/// Rejections carry `{ "success": false, "error": "..." }` or only `{ "error": "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignLogisticsResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_reply() {
        let reply: AssignLogisticsResponse = serde_json::from_str(
            r#"{"success": true, "message": "Logistics partner FarmHaul assigned.", "new_status": "Awaiting Pickup"}"#,
        )
        .unwrap();
        assert!(reply.success);
        assert_eq!(reply.new_status.as_deref(), Some("Awaiting Pickup"));
    }

    #[test]
    fn test_error_only_reply_is_failure() {
        let reply: AssignLogisticsResponse =
            serde_json::from_str(r#"{"error": "Logistics partner not found"}"#).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.error.as_deref(), Some("Logistics partner not found"));
    }
}
