use crate::error::ApiResult;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 方法枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP 客户端特性
///
/// 浏览器里的 fetch future 不是 `Send` 的，因此使用 `?Send`。
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse>;
}

// =========================================================
// 测试工具: MockHttpClient
// =========================================================

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::ApiError;
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};

    pub enum MockReply {
        Respond(u16, String),
        Fail(String),
    }

    /// 按 "METHOD url" 排队的响应；同一个 key 多次请求时依次出队，
    /// 队列只剩最后一个时重复使用它。
    pub struct MockHttpClient {
        replies: RefCell<HashMap<String, VecDeque<MockReply>>>,
        pub requests: RefCell<Vec<HttpRequest>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self {
                replies: RefCell::new(HashMap::new()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn key(method: HttpMethod, url: &str) -> String {
            format!("{} {}", method.as_str(), url)
        }

        pub fn mock_json(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
            self.mock_text(method, url, status, &body.to_string());
        }

        pub fn mock_text(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
            self.replies
                .borrow_mut()
                .entry(Self::key(method, url))
                .or_default()
                .push_back(MockReply::Respond(status, body.to_string()));
        }

        pub fn mock_failure(&self, method: HttpMethod, url: &str, message: &str) {
            self.replies
                .borrow_mut()
                .entry(Self::key(method, url))
                .or_default()
                .push_back(MockReply::Fail(message.to_string()));
        }

        pub fn request_count(&self) -> usize {
            self.requests.borrow().len()
        }

        pub fn last_request(&self) -> Option<HttpRequest> {
            self.requests.borrow().last().cloned()
        }
    }

    #[async_trait::async_trait(?Send)]
    impl HttpClient for MockHttpClient {
        async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
            let key = Self::key(req.method, &req.url);
            self.requests.borrow_mut().push(req);

            let mut replies = self.replies.borrow_mut();
            let Some(queue) = replies.get_mut(&key) else {
                return Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                });
            };

            let reply = if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().map(|r| match r {
                    MockReply::Respond(s, b) => MockReply::Respond(*s, b.clone()),
                    MockReply::Fail(m) => MockReply::Fail(m.clone()),
                })
            };

            match reply {
                Some(MockReply::Respond(status, body)) => Ok(HttpResponse { status, body }),
                Some(MockReply::Fail(message)) => Err(ApiError::network(message)),
                None => Ok(HttpResponse {
                    status: 404,
                    body: "Not Found".to_string(),
                }),
            }
        }
    }
}
