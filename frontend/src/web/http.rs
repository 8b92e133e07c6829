//! HTTP 请求封装模块
//!
//! 使用 `web_sys::fetch` 实现共享层的 `HttpClient`。
//! 所有请求都携带 cookie（`credentials: include`），会话依赖于此。

use rekap_shared::ApiError;
use rekap_shared::error::ApiResult;
use rekap_shared::request::{HttpClient, HttpRequest, HttpResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, Headers, Request, RequestCredentials, RequestInit, Response};

/// 将 JS 异常转换为 API 错误，中止请求映射为 `Cancelled`
fn js_error(e: JsValue) -> ApiError {
    if let Some(dom) = e.dyn_ref::<web_sys::DomException>() {
        if dom.name() == "AbortError" {
            return ApiError::Cancelled;
        }
        return ApiError::Transport(dom.message());
    }
    if let Some(err) = e.dyn_ref::<js_sys::Error>() {
        return ApiError::Transport(String::from(err.message()));
    }
    ApiError::Transport(format!("{:?}", e))
}

/// 基于 fetch 的 HTTP 客户端
#[derive(Clone, Default)]
pub struct FetchHttpClient {
    signal: Option<AbortSignal>,
}

impl FetchHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 绑定中止信号，控制器 `abort()` 后请求以 `Cancelled` 结束
    pub fn with_signal(signal: AbortSignal) -> Self {
        Self {
            signal: Some(signal),
        }
    }

    fn build(&self, req: &HttpRequest) -> Result<Request, JsValue> {
        let headers = Headers::new()?;
        for (key, value) in &req.headers {
            headers.set(key, value)?;
        }

        let opts = RequestInit::new();
        opts.set_method(req.method.as_str());
        opts.set_headers(&headers.into());
        opts.set_credentials(RequestCredentials::Include);
        if let Some(body) = &req.body {
            opts.set_body(&JsValue::from_str(body));
        }
        if let Some(signal) = &self.signal {
            opts.set_signal(Some(signal));
        }

        Request::new_with_str_and_init(&req.url, &opts)
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchHttpClient {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let request = self.build(&req).map_err(js_error)?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("window is not available".to_string()))?;

        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;

        let response: Response = resp_value
            .dyn_into()
            .map_err(|_| ApiError::Decode("fetch did not return a Response".to_string()))?;

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;

        Ok(HttpResponse {
            status: response.status(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// 可中止的请求槽：每次 `renew` 中止上一个请求并返回新的信号
#[derive(Default)]
pub struct AbortSlot {
    current: Option<AbortController>,
}

impl AbortSlot {
    pub fn renew(&mut self) -> Option<AbortSignal> {
        self.abort();
        let controller = AbortController::new().ok()?;
        let signal = controller.signal();
        self.current = Some(controller);
        Some(signal)
    }

    pub fn abort(&mut self) {
        if let Some(controller) = self.current.take() {
            controller.abort();
        }
    }
}
