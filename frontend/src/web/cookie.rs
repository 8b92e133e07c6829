//! Cookie 令牌存储
//!
//! 从 `document.cookie` 读取 `XSRF-TOKEN`，预取后用定时器等待写入。

use std::time::Duration;

use rekap_shared::XSRF_COOKIE_NAME;
use rekap_shared::token::{TokenStore, parse_cookie};
use wasm_bindgen::JsCast;

#[derive(Clone, Copy, Default)]
pub struct CookieTokenStore;

impl CookieTokenStore {
    fn cookies() -> Option<String> {
        let document = web_sys::window()?.document()?;
        document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()
    }
}

#[async_trait::async_trait(?Send)]
impl TokenStore for CookieTokenStore {
    fn read(&self) -> Option<String> {
        parse_cookie(&Self::cookies()?, XSRF_COOKIE_NAME)
    }

    async fn wait(&self, delay: Duration) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}
