//! API response envelope
//!
//! Success responses are wrapped as `{"message": ..., "data": ...}`.

use serde::Serialize;

/// 成功応答の共通エンベロープ
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let res = ApiResponse::success("Signed up", 42);
/// assert_eq!(res.message, "Signed up");
/// assert_eq!(res.data, Some(42));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// データ付きの成功応答
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// データなしの成功応答
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let res = ApiResponse::success("ok", serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&res).unwrap();
        assert_eq!(json["message"], "ok");
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn test_message_only_omits_data() {
        let res = ApiResponse::message_only("done");
        let json = serde_json::to_value(&res).unwrap();
        assert!(json.get("data").is_none());
    }
}
