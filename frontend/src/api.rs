use leptos::prelude::*;
use paydesk_shared::client::BillingApi;
use paydesk_shared::config::ClientConfig;

use crate::web::FetchHttpClient;

/// 浏览器中使用的后端客户端
pub type Api = BillingApi<FetchHttpClient>;

pub fn provide_api(config: &ClientConfig) {
    provide_context(Api::new(&config.api_base_url, FetchHttpClient));
}

/// 从 Context 获取后端客户端（克隆一份，便于移入异步任务）
pub fn use_api() -> Api {
    use_context::<Api>().expect("Api should be provided")
}
