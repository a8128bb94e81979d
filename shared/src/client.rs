use crate::error::{ApiError, ApiResult};
use crate::protocol::ApiRequest;
use crate::transport::{HttpClient, HttpMethod, HttpRequest};
use crate::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

/// 计费后端的强类型客户端
///
/// 这里接受任何实现了 `HttpClient` 的传输层，从而解耦了具体的 HTTP 实现：
/// 浏览器里是 fetch，测试里是内存 mock。
#[derive(Clone, Debug, PartialEq)]
pub struct BillingApi<C> {
    base_url: String,
    client: C,
}

impl<C: HttpClient> BillingApi<C> {
    pub fn new(base_url: &str, client: C) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送强类型请求并获取解析后的响应
    ///
    /// `token` 只在端点需要鉴权时附加到 `Authorization` 头。
    pub async fn send<T: ApiRequest>(&self, req: &T, token: Option<&str>) -> ApiResult<T::Response> {
        let path = req.path();
        let url = self.url(&path);

        // 1. 构造请求
        let mut http = HttpRequest::new(&url, T::METHOD)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        if T::AUTHENTICATED {
            if let Some(token) = token {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
            }
        }

        if T::METHOD != HttpMethod::Get {
            let body = serde_json::to_string(req).map_err(|e| {
                ApiError::encode(e.to_string()).in_op_with("api.serialize", path.as_ref())
            })?;
            http = http.with_body(body);
        }

        // 2. 发送
        let response = self
            .client
            .send(http)
            .await
            .map_err(|e| e.in_op_with("api.send", path.as_ref()))?;

        // 3. 检查状态码
        if !response.ok() {
            return Err(ApiError::rejected(response.status, &response.body)
                .in_op_with("api.send", path.as_ref()));
        }

        // 4. 反序列化
        T::decode(&response.body)
            .map_err(|e| ApiError::decode(e.to_string()).in_op_with("api.decode", path.as_ref()))
    }
}
