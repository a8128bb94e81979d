//! 运行时配置
//!
//! 优先级：LocalStorage 覆盖 > 编译期 `PAYDESK_API_BASE_URL` > 默认值。

use leptos::prelude::*;
use paydesk_shared::config::{API_BASE_URL_STORAGE_KEY, ClientConfig};

use crate::web::LocalStorage;

pub fn load_config() -> ClientConfig {
    ClientConfig::resolve(
        LocalStorage::get(API_BASE_URL_STORAGE_KEY),
        option_env!("PAYDESK_API_BASE_URL"),
    )
}

pub fn provide_config() -> ClientConfig {
    let config = load_config();
    log_info!("[Config] API base URL: {}", config.api_base_url);
    provide_context(config.clone());
    config
}

pub fn use_config() -> ClientConfig {
    use_context::<ClientConfig>().expect("ClientConfig should be provided")
}
