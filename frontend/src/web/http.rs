//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现共享库的 `HttpClient` 特性。
//! 所有 `JsValue` 异常在这里转换为 `ApiError::network`。

use paydesk_shared::error::{ApiError, ApiResult};
use paydesk_shared::transport::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// fetch 抛出的异常通常是 `TypeError: Failed to fetch`，取其 message
fn js_message(value: &JsValue) -> String {
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// 基于浏览器 fetch 的 HTTP 客户端
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FetchHttpClient;

impl FetchHttpClient {
    fn build(req: &HttpRequest) -> ApiResult<Request> {
        let headers = Headers::new()
            .map_err(|e| ApiError::network(js_message(&e)).in_op("fetch.headers"))?;

        for (key, value) in &req.headers {
            headers
                .set(key, value)
                .map_err(|e| ApiError::network(js_message(&e)).in_op_with("fetch.header", key))?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());

        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }

        Request::new_with_str_and_init(&req.url, &opts)
            .map_err(|e| ApiError::network(js_message(&e)).in_op("fetch.request"))
    }

    async fn text(response: &Response) -> ApiResult<String> {
        let promise = response
            .text()
            .map_err(|e| ApiError::decode(js_message(&e)).in_op("fetch.text"))?;

        let text = JsFuture::from(promise)
            .await
            .map_err(|e| ApiError::decode(js_message(&e)).in_op("fetch.text"))?;

        Ok(text.as_string().unwrap_or_default())
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let request = Self::build(&req)?;

        let window =
            web_sys::window().ok_or_else(|| ApiError::network("window is not available"))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| ApiError::network(js_message(&e)))?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|e| ApiError::decode(js_message(&e)).in_op("fetch.response"))?;

        let body = Self::text(&response).await?;
        Ok(HttpResponse {
            status: response.status(),
            body,
        })
    }
}
