//! API 错误类型
//!
//! 前端所有网络操作都返回 `ApiResult<T>`。
//! 获取类操作失败时只记录日志并回退到空状态，
//! 用户发起的修改操作通过 `user_message` 给出提示文本。

use serde::Deserialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 网络层失败（连接被拒绝、CORS 等）
    #[error("network error: {0}")]
    Transport(String),

    /// 401 / 419：视为没有会话
    #[error("unauthenticated")]
    Unauthorized,

    /// 服务端拒绝了请求
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("CSRF token not found")]
    MissingToken,

    /// 请求被更新的请求取代并中止
    #[error("request cancelled")]
    Cancelled,

    /// 客户端校验失败，请求未发出
    #[error("{0}")]
    Validation(String),
}

/// Laravel 错误响应体：`{"message": "..."}`
#[derive(Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

impl ApiError {
    /// 由非 2xx 响应构造错误
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 || status == 419 {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<ServerMessage>(body)
            .ok()
            .and_then(|m| m.message)
            .filter(|m| !m.trim().is_empty());
        ApiError::Rejected { status, message }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    /// 展示给用户的文本：优先使用服务端消息，否则使用调用方给定的通用文本
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ApiError::MissingToken | ApiError::Validation(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_statuses_map_to_unauthorized() {
        assert_eq!(ApiError::from_response(401, ""), ApiError::Unauthorized);
        assert_eq!(
            ApiError::from_response(419, r#"{"message":"CSRF token mismatch."}"#),
            ApiError::Unauthorized
        );
    }

    #[test]
    fn test_server_message_is_extracted() {
        let err = ApiError::from_response(422, r#"{"message":"Data sudah ada","errors":{}}"#);
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 422,
                message: Some("Data sudah ada".into())
            }
        );
        assert_eq!(err.user_message("Gagal simpan"), "Data sudah ada");
    }

    #[test]
    fn test_fallback_when_body_has_no_message() {
        let err = ApiError::from_response(500, "<html>Server Error</html>");
        assert_eq!(err.user_message("Gagal simpan"), "Gagal simpan");

        let err = ApiError::from_response(500, r#"{"message":""}"#);
        assert_eq!(err.user_message("Gagal update"), "Gagal update");

        let err = ApiError::Transport("Failed to fetch".into());
        assert_eq!(err.user_message("Gagal simpan"), "Gagal simpan");
    }

    #[test]
    fn test_missing_token_message() {
        assert_eq!(
            ApiError::MissingToken.user_message("Login gagal"),
            "CSRF token not found"
        );
        assert!(ApiError::Cancelled.is_cancelled());
        assert!(!ApiError::Unauthorized.is_cancelled());
    }
}
