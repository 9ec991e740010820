use serde_json::Value;

// =========================================================
// 错误类型枚举
// =========================================================

/// 错误类别
///
/// 页面只关心三种处理方式：内联提示、弹窗、或静默记录日志，
/// 具体选哪一种由调用方根据类别决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 请求未能到达服务器
    Network,
    /// 400 / 422，或在发请求前被本地校验拦下
    InvalidInput,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 5xx 及其他非预期状态码
    Server,
    /// 响应体无法解析
    Decode,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => ApiErrorKind::InvalidInput,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Server,
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 调用错误
///
/// `message` 总是可以直接展示给用户。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidInput, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    /// 根据非 2xx 响应构造错误
    ///
    /// 优先使用响应体中的 `message` 或 `error` 字段。
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| {
                ["message", "error"]
                    .iter()
                    .find_map(|key| v.get(key).and_then(Value::as_str).map(str::to_string))
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        Self {
            kind: ApiErrorKind::from_status(status),
            status: Some(status),
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ApiErrorKind::NotFound
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(format!("Invalid response: {}", e))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_comes_from_body_when_present() {
        let e = ApiError::from_response(401, r#"{"message":"Invalid credentials"}"#);
        assert_eq!(e.kind, ApiErrorKind::Unauthorized);
        assert_eq!(e.status, Some(401));
        assert_eq!(e.to_string(), "Invalid credentials");

        let e = ApiError::from_response(400, r#"{"error":"Title is required"}"#);
        assert_eq!(e.kind, ApiErrorKind::InvalidInput);
        assert_eq!(e.message, "Title is required");
    }

    #[test]
    fn falls_back_to_status_text() {
        let e = ApiError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(e.kind, ApiErrorKind::Server);
        assert_eq!(e.message, "Request failed with status 502");

        let e = ApiError::from_response(404, r#"{"message":""}"#);
        assert!(e.is_not_found());
        assert_eq!(e.message, "Request failed with status 404");
    }
}
