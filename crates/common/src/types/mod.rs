use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Response envelope shared by every survey endpoint.
///
/// `success` is always present; `data`, `error` and `message` are omitted
/// from the JSON output when unset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None, message: None }
    }

    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(error.into()), message: Some(message.into()) }
    }
}

impl ApiResponse<()> {
    /// Success without a payload, e.g. after update or delete.
    pub fn done(message: impl Into<String>) -> Self {
        Self { success: true, data: None, error: None, message: Some(message.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_omits_error_fields() {
        let v = serde_json::to_value(ApiResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(v, json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn failure_envelope_has_no_data() {
        let v = serde_json::to_value(ApiResponse::<()>::failure("Not Found", "survey not found")).unwrap();
        assert_eq!(v, json!({"success": false, "error": "Not Found", "message": "survey not found"}));
    }

    #[test]
    fn done_envelope_carries_message_only() {
        let v = serde_json::to_value(ApiResponse::done("deleted")).unwrap();
        assert_eq!(v, json!({"success": true, "message": "deleted"}));
    }
}
