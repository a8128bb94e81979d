use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:9000";
pub const DEFAULT_RAZORPAY_SCRIPT_SRC: &str = "https://checkout.razorpay.com/v1/checkout.js";
pub const DEFAULT_BRAND_NAME: &str = "PayDesk";
pub const DEFAULT_THEME_COLOR: &str = "#2563eb";

/// LocalStorage 中覆盖后端地址的键
pub const API_BASE_URL_STORAGE_KEY: &str = "paydesk_api_base_url";

/// 客户端配置
///
/// 后端地址的优先级：LocalStorage 覆盖 > 编译期 `PAYDESK_API_BASE_URL` > 默认值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub razorpay_script_src: String,
    pub brand_name: String,
    pub theme_color: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            razorpay_script_src: DEFAULT_RAZORPAY_SCRIPT_SRC.to_string(),
            brand_name: DEFAULT_BRAND_NAME.to_string(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
        }
    }
}

impl ClientConfig {
    /// 按优先级合成配置；空白值视为未设置
    pub fn resolve(stored: Option<String>, compiled: Option<&str>) -> Self {
        let api_base_url = stored
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| compiled.map(str::trim).filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        let config = ClientConfig::resolve(None, None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:9000");
    }

    #[test]
    fn compiled_value_beats_default() {
        let config = ClientConfig::resolve(None, Some("https://billing.example.com/"));
        assert_eq!(config.api_base_url, "https://billing.example.com");
    }

    #[test]
    fn stored_value_beats_compiled() {
        let config = ClientConfig::resolve(
            Some("http://127.0.0.1:8080//".into()),
            Some("https://billing.example.com"),
        );
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = ClientConfig::resolve(Some("   ".into()), Some(""));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
