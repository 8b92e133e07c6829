//! 应用配置
//!
//! 所有配置在构建时通过环境变量注入（wasm 运行时没有进程环境）：
//! - `REKAP_API_BASE_URL`: 后端地址，默认 `http://localhost:8000`
//! - `REKAP_CSRF_DELAY_MS`: 预取 CSRF cookie 后的等待时间，默认 100
//! - `REKAP_LOG_LEVEL`: 控制台日志级别，默认 `info`

use std::str::FromStr;
use std::time::Duration;

use leptos::prelude::*;
use rekap_shared::{ApiClient, DEFAULT_API_BASE_URL, DEFAULT_CSRF_DELAY_MS};

use crate::web::{CookieTokenStore, FetchHttpClient};

/// 浏览器环境下的 API 客户端
pub type BrowserApi = ApiClient<FetchHttpClient, CookieTokenStore>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    pub api_base_url: &'static str,
    pub csrf_delay: Duration,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL,
            csrf_delay: Duration::from_millis(DEFAULT_CSRF_DELAY_MS),
            log_level: log::Level::Info,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("REKAP_API_BASE_URL"),
            option_env!("REKAP_CSRF_DELAY_MS"),
            option_env!("REKAP_LOG_LEVEL"),
        )
    }

    /// 空值或无法解析的值使用默认配置
    pub fn from_values(
        base_url: Option<&'static str>,
        delay_ms: Option<&str>,
        level: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: base_url
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.api_base_url),
            csrf_delay: delay_ms
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.csrf_delay),
            log_level: level
                .and_then(|s| log::Level::from_str(s.trim()).ok())
                .unwrap_or(defaults.log_level),
        }
    }

    pub fn client(&self) -> BrowserApi {
        self.client_with(FetchHttpClient::new())
    }

    /// 使用指定的 fetch 实现（例如绑定了 AbortSignal 的）
    pub fn client_with(&self, http: FetchHttpClient) -> BrowserApi {
        ApiClient::new(self.api_base_url, http, CookieTokenStore, self.csrf_delay)
    }
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(AppConfig::from_values(None, None, None), AppConfig::default());
    }

    #[test]
    fn test_values_are_parsed() {
        let config = AppConfig::from_values(Some("https://api.example.id"), Some("250"), Some("debug"));
        assert_eq!(config.api_base_url, "https://api.example.id");
        assert_eq!(config.csrf_delay, Duration::from_millis(250));
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_values(Some("  "), Some("soon"), Some("chatty"));
        assert_eq!(config, AppConfig::default());
    }
}
