//! API 客户端
//!
//! 对 `HttpClient` 与 `TokenStore` 泛型，浏览器中使用 fetch + cookie 实现，
//! 测试中使用 Mock 实现。

use std::time::Duration;

use crate::calendar::Period;
use crate::error::{ApiError, ApiResult};
use crate::protocol::*;
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use crate::token::TokenStore;
use crate::{
    Credentials, HEADER_REQUESTED_WITH, HEADER_XSRF_TOKEN, Item, MasterData, Outlet,
    ReportPayload, ReportRecord, User,
};

#[cfg(test)]
mod tests;

pub struct ApiClient<C: HttpClient, T: TokenStore> {
    base_url: String,
    http: C,
    tokens: T,
    csrf_delay: Duration,
}

impl<C: HttpClient, T: TokenStore> ApiClient<C, T> {
    pub fn new(base_url: &str, http: C, tokens: T, csrf_delay: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            tokens,
            csrf_delay,
        }
    }

    // =========================================================
    // 请求管道
    // =========================================================

    /// 执行一个端点请求
    ///
    /// 修改类请求附带 XSRF 令牌；预取后仍没有令牌时发送空值，由后端拒绝。
    pub async fn execute<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let token = if R::METHOD.is_mutating() {
            Some(self.ensure_token().await?.unwrap_or_default())
        } else {
            None
        };
        self.dispatch(req, token.as_deref()).await
    }

    async fn dispatch<R: ApiRequest>(&self, req: &R, token: Option<&str>) -> ApiResult<R::Response> {
        let url = format!("{}{}", self.base_url, req.path());
        let mut http_req = HttpRequest::new(&url, R::METHOD)
            .with_header("Accept", "application/json")
            .with_header("Content-Type", "application/json")
            .with_header(HEADER_REQUESTED_WITH, "XMLHttpRequest")
            .with_body(req.body()?);
        if let Some(token) = token {
            http_req = http_req.with_header(HEADER_XSRF_TOKEN, token);
        }

        log::debug!("[Api] {} {}", R::METHOD.as_str(), url);
        let resp = self.http.send(http_req).await?;
        Self::map_http(resp)?.json()
    }

    fn map_http(resp: HttpResponse) -> ApiResult<HttpResponse> {
        if resp.ok() {
            Ok(resp)
        } else {
            Err(ApiError::from_response(resp.status, &resp.body))
        }
    }

    /// 预取 CSRF cookie 并等待其写入
    async fn prime_token(&self) -> ApiResult<()> {
        self.dispatch(&CsrfCookie, None).await?;
        self.tokens.wait(self.csrf_delay).await;
        Ok(())
    }

    /// 读取令牌；不存在时预取一次后重新读取
    async fn ensure_token(&self) -> ApiResult<Option<String>> {
        if let Some(token) = self.tokens.read() {
            return Ok(Some(token));
        }
        log::debug!("[Api] XSRF token absent, priming csrf cookie");
        self.prime_token().await?;
        Ok(self.tokens.read())
    }

    // =========================================================
    // Session
    // =========================================================

    pub async fn current_user(&self) -> ApiResult<User> {
        self.execute(&CurrentUser).await
    }

    /// 登录：预取令牌 → 提交凭据 → 重新获取用户信息
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        self.prime_token().await?;
        let token = self.tokens.read().ok_or(ApiError::MissingToken)?;
        self.dispatch(&Login(credentials), Some(&token)).await?;
        self.current_user().await
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.execute(&Logout).await.map(|_| ())
    }

    // =========================================================
    // Master data
    // =========================================================

    pub async fn list_outlets(&self) -> ApiResult<Vec<Outlet>> {
        self.execute(&ListOutlets).await
    }

    pub async fn create_outlet(&self, input: &OutletInput) -> ApiResult<()> {
        self.execute(&CreateOutlet(input)).await.map(|_| ())
    }

    pub async fn update_outlet(&self, id: u64, input: &OutletInput) -> ApiResult<()> {
        self.execute(&UpdateOutlet { id, input }).await.map(|_| ())
    }

    pub async fn delete_outlet(&self, id: u64) -> ApiResult<()> {
        self.execute(&DeleteOutlet(id)).await.map(|_| ())
    }

    pub async fn list_items(&self) -> ApiResult<Vec<Item>> {
        self.execute(&ListItems).await
    }

    pub async fn create_item(&self, input: &ItemInput) -> ApiResult<()> {
        self.execute(&CreateItem(input)).await.map(|_| ())
    }

    pub async fn update_item(&self, id: u64, input: &ItemInput) -> ApiResult<()> {
        self.execute(&UpdateItem { id, input }).await.map(|_| ())
    }

    pub async fn delete_item(&self, id: u64) -> ApiResult<()> {
        self.execute(&DeleteItem(id)).await.map(|_| ())
    }

    /// 并行获取门店与商品，任一失败则整体失败
    pub async fn load_master_data(&self) -> ApiResult<MasterData> {
        let (outlets, items) =
            futures::try_join!(self.execute(&ListOutlets), self.execute(&ListItems))?;
        Ok(MasterData { outlets, items })
    }

    // =========================================================
    // Sales reports
    // =========================================================

    pub async fn fetch_report(&self, period: Period) -> ApiResult<Vec<ReportRecord>> {
        self.execute(&FetchReport(period)).await
    }

    /// 已有数据的期间，无效条目被丢弃
    pub async fn list_periods(&self) -> ApiResult<Vec<Period>> {
        let entries = self.execute(&ListPeriods).await?;
        Ok(entries
            .iter()
            .filter_map(|e| {
                let period = e.to_period();
                if period.is_none() {
                    log::warn!("[Api] ignoring invalid period {}-{}", e.year, e.month);
                }
                period
            })
            .collect())
    }

    pub async fn submit_report(&self, rows: &[ReportPayload]) -> ApiResult<()> {
        self.execute(&SubmitReport(rows)).await.map(|_| ())
    }

    pub async fn overwrite_report(&self, rows: &[ReportPayload]) -> ApiResult<()> {
        self.execute(&OverwriteReport(rows)).await.map(|_| ())
    }
}
