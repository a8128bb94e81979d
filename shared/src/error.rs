use std::fmt;

use serde::{Deserialize, Serialize};

// =========================================================
// 错误状态枚举
// =========================================================

/// 错误状态枚举
///
/// 前端只区分两类失败：传输层失败与后端拒绝。`Decode` / `Encode` 是客户端自身的
/// 序列化失败，对用户而言同样只展示消息文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorStatus {
    /// 网络不可达、CORS、fetch 抛出异常等
    Network,
    /// 后端返回非 2xx
    Rejected,
    /// 响应体无法解析为期望的结构
    Decode,
    /// 请求体序列化失败
    Encode,
}

impl ApiErrorStatus {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorStatus::Network => "NETWORK_ERROR",
            ApiErrorStatus::Rejected => "REQUEST_REJECTED",
            ApiErrorStatus::Decode => "RESPONSE_DECODE_ERROR",
            ApiErrorStatus::Encode => "REQUEST_ENCODE_ERROR",
        }
    }
}

// =========================================================
// 错误上下文追踪
// =========================================================

/// 结构化的错误追踪片段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorSpan {
    /// 操作名称，如 "api.send", "plans.fetch"
    pub operation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorSpan {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: None,
        }
    }

    pub fn with_detail(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            detail: Some(detail.into()),
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// API 调用错误
///
/// - status: 错误类型
/// - message: 面向用户的消息，切片原样存储
/// - http_status: 后端拒绝时的 HTTP 状态码
/// - spans: 结构化的调用追踪栈（只用于日志）
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: ApiErrorStatus,
    message: String,
    http_status: Option<u16>,
    spans: Vec<ErrorSpan>,
}

impl ApiError {
    pub fn new(status: ApiErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            http_status: None,
            spans: Vec::new(),
        }
    }

    // --- Convenience constructors ---

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Decode, message)
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorStatus::Encode, message)
    }

    /// 后端拒绝。消息提取顺序：响应 JSON 的 `message` 字段，
    /// 否则回退为 `Request failed with status code <n>`。
    pub fn rejected(http_status: u16, body: &str) -> Self {
        let message = backend_message(body)
            .unwrap_or_else(|| format!("Request failed with status code {}", http_status));
        Self {
            status: ApiErrorStatus::Rejected,
            message,
            http_status: Some(http_status),
            spans: Vec::new(),
        }
    }

    // --- Context builders ---

    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::new(operation));
        self
    }

    pub fn in_op_with(mut self, operation: impl Into<String>, detail: impl Into<String>) -> Self {
        self.spans.push(ErrorSpan::with_detail(operation, detail));
        self
    }

    // --- Accessors ---

    pub fn error_code(&self) -> &'static str {
        self.status.error_code()
    }

    /// 用户可见的消息
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn spans(&self) -> &[ErrorSpan] {
        &self.spans
    }
}

/// 从后端错误体中取出结构化的 `message` 字段
fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

// =========================================================
// Display & Error trait 实现
// =========================================================

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message)?;

        if !self.spans.is_empty() {
            write!(f, " | trace: ")?;
            for (i, span) in self.spans.iter().enumerate() {
                if i > 0 {
                    write!(f, " -> ")?;
                }
                write!(f, "{}", span.operation)?;
                if let Some(detail) = &span.detail {
                    write!(f, "({})", detail)?;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::decode(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_backend_message_field() {
        let e = ApiError::rejected(400, r#"{"message":"Plan not found","error":"Bad Request"}"#);
        assert_eq!(e.message(), "Plan not found");
        assert_eq!(e.http_status(), Some(400));
        assert_eq!(e.status, ApiErrorStatus::Rejected);
    }

    #[test]
    fn falls_back_to_generic_message() {
        let e = ApiError::rejected(401, "");
        assert_eq!(e.message(), "Request failed with status code 401");

        let e = ApiError::rejected(500, r#"{"error":"Internal Server Error","message":""}"#);
        assert_eq!(e.message(), "Request failed with status code 500");

        let e = ApiError::rejected(502, "<html>Bad Gateway</html>");
        assert_eq!(e.message(), "Request failed with status code 502");

        let e = ApiError::rejected(400, r#"{"message":"   \n"}"#);
        assert_eq!(e.message(), "Request failed with status code 400");
    }

    #[test]
    fn backend_message_is_not_trimmed() {
        let e = ApiError::rejected(400, r#"{"message":"  Invalid IFSC \n"}"#);
        assert_eq!(e.message(), "  Invalid IFSC \n");
    }

    #[test]
    fn display_includes_trace_but_message_stays_verbatim() {
        let e = ApiError::network("Failed to fetch")
            .in_op_with("api.send", "/api/plans")
            .in_op("plans.fetch");
        assert_eq!(e.message(), "Failed to fetch");
        assert_eq!(
            e.to_string(),
            "[NETWORK_ERROR] Failed to fetch | trace: api.send(/api/plans) -> plans.fetch"
        );
    }
}
