//! XSRF 令牌来源
//!
//! 浏览器中令牌保存在 `XSRF-TOKEN` cookie 里；后端通过 csrf-cookie 端点下发，
//! 写入 cookie 的时机不可观测，因此客户端在预取后固定等待一段时间再读取。

use std::time::Duration;

#[cfg(test)]
use std::cell::{Cell, RefCell};

#[async_trait::async_trait(?Send)]
pub trait TokenStore {
    /// 读取当前令牌，不存在时返回 `None`
    fn read(&self) -> Option<String>;

    /// 预取后等待令牌落地
    async fn wait(&self, delay: Duration);
}

/// 从 `document.cookie` 格式的字符串中取出指定 cookie（已做 URL 解码）
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
        .filter(|v| !v.is_empty())
}

// =========================================================
// 测试工具: MockTokenStore
// =========================================================

/// 预取前为空，`wait` 之后出现 `after_wait` 中的令牌
#[cfg(test)]
pub struct MockTokenStore {
    token: RefCell<Option<String>>,
    after_wait: RefCell<Option<String>>,
    pub waits: Cell<usize>,
}

#[cfg(test)]
impl MockTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RefCell::new(Some(token.to_string())),
            after_wait: RefCell::new(None),
            waits: Cell::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            token: RefCell::new(None),
            after_wait: RefCell::new(None),
            waits: Cell::new(0),
        }
    }

    pub fn primed_by_wait(token: &str) -> Self {
        let store = Self::empty();
        *store.after_wait.borrow_mut() = Some(token.to_string());
        store
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl TokenStore for MockTokenStore {
    fn read(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    async fn wait(&self, _delay: Duration) {
        self.waits.set(self.waits.get() + 1);
        if let Some(token) = self.after_wait.borrow_mut().take() {
            *self.token.borrow_mut() = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_decodes_value() {
        let cookies = "laravel_session=abc; XSRF-TOKEN=eyJpdiI6%3D%3D; theme=dark";
        assert_eq!(
            parse_cookie(cookies, "XSRF-TOKEN").as_deref(),
            Some("eyJpdiI6==")
        );
        assert_eq!(parse_cookie(cookies, "theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_parse_cookie_missing_or_empty() {
        assert_eq!(parse_cookie("", "XSRF-TOKEN"), None);
        assert_eq!(parse_cookie("XSRF-TOKEN=", "XSRF-TOKEN"), None);
        // 名称必须完全匹配
        assert_eq!(parse_cookie("MY-XSRF-TOKEN=1", "XSRF-TOKEN"), None);
    }
}
