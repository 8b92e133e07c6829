//! 端点定义
//!
//! 每个请求类型声明自己的路径、方法、请求体和响应类型，
//! `ApiClient::execute` 统一负责请求头、令牌和错误映射。

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::amount::de_lenient_u32;
use crate::calendar::Period;
use crate::request::HttpMethod;
use crate::{Credentials, Item, Outlet, ReportPayload, ReportRecord, User};

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, including any query string.
    fn path(&self) -> String;

    /// JSON body, `None` for body-less requests.
    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        Ok(None)
    }
}

/// 后端对修改类请求的响应内容不被使用
pub type Ignored = IgnoredAny;

macro_rules! json_body {
    ($value:expr) => {
        serde_json::to_string($value).map(Some)
    };
}

// =========================================================
// Session
// =========================================================

pub struct CurrentUser;

impl ApiRequest for CurrentUser {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/user".into()
    }
}

/// 预取 CSRF cookie
pub struct CsrfCookie;

impl ApiRequest for CsrfCookie {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/sanctum/csrf-cookie".into()
    }
}

pub struct Login<'a>(pub &'a Credentials);

impl ApiRequest for Login<'_> {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/login".into()
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        json_body!(self.0)
    }
}

pub struct Logout;

impl ApiRequest for Logout {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/logout".into()
    }
}

// =========================================================
// Master data
// =========================================================

/// 门店新建 / 更新的请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutletInput {
    pub code: String,
    pub name: String,
}

/// 商品新建 / 更新的请求体，价格以数字发送
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    pub code: String,
    pub name: String,
    pub price: f64,
}

pub struct ListOutlets;

impl ApiRequest for ListOutlets {
    type Response = Vec<Outlet>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/outlets".into()
    }
}

pub struct CreateOutlet<'a>(pub &'a OutletInput);

impl ApiRequest for CreateOutlet<'_> {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/outlets".into()
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        json_body!(self.0)
    }
}

pub struct UpdateOutlet<'a> {
    pub id: u64,
    pub input: &'a OutletInput,
}

impl ApiRequest for UpdateOutlet<'_> {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/outlets/{}", self.id)
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        json_body!(self.input)
    }
}

pub struct DeleteOutlet(pub u64);

impl ApiRequest for DeleteOutlet {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/outlets/{}", self.0)
    }
}

pub struct ListItems;

impl ApiRequest for ListItems {
    type Response = Vec<Item>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/items".into()
    }
}

pub struct CreateItem<'a>(pub &'a ItemInput);

impl ApiRequest for CreateItem<'_> {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/items".into()
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        json_body!(self.0)
    }
}

pub struct UpdateItem<'a> {
    pub id: u64,
    pub input: &'a ItemInput,
}

impl ApiRequest for UpdateItem<'_> {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/api/items/{}", self.id)
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        json_body!(self.input)
    }
}

pub struct DeleteItem(pub u64);

impl ApiRequest for DeleteItem {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/items/{}", self.0)
    }
}

// =========================================================
// Sales reports
// =========================================================

pub struct FetchReport(pub Period);

impl ApiRequest for FetchReport {
    type Response = Vec<ReportRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!(
            "/api/sales-reports?month={}&year={}",
            self.0.month, self.0.year
        )
    }
}

/// `/periods` 返回的原始条目，数值字段可能是字符串
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodEntry {
    #[serde(deserialize_with = "de_lenient_u32")]
    pub year: u32,
    #[serde(deserialize_with = "de_lenient_u32")]
    pub month: u32,
}

impl PeriodEntry {
    pub fn to_period(&self) -> Option<Period> {
        Period::new(i32::try_from(self.year).ok()?, self.month)
    }
}

pub struct ListPeriods;

impl ApiRequest for ListPeriods {
    type Response = Vec<PeriodEntry>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/sales-reports/periods".into()
    }
}

/// 新建期间报表（后端在期间已有数据时拒绝）
pub struct SubmitReport<'a>(pub &'a [ReportPayload]);

impl ApiRequest for SubmitReport<'_> {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/sales-reports".into()
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        json_body!(self.0)
    }
}

/// 整体覆盖一个期间的所有行
pub struct OverwriteReport<'a>(pub &'a [ReportPayload]);

impl ApiRequest for OverwriteReport<'_> {
    type Response = Ignored;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/sales-reports/update".into()
    }

    fn body(&self) -> Result<Option<String>, serde_json::Error> {
        json_body!(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_paths() {
        let period = Period::new(2025, 3).unwrap();
        assert_eq!(
            FetchReport(period).path(),
            "/api/sales-reports?month=3&year=2025"
        );
        assert_eq!(DeleteItem(7).path(), "/api/items/7");
        assert_eq!(
            UpdateOutlet {
                id: 3,
                input: &OutletInput {
                    code: "OUT-003".into(),
                    name: "Pasar Baru".into()
                }
            }
            .path(),
            "/api/outlets/3"
        );
    }

    #[test]
    fn test_item_input_sends_numeric_price() {
        let input = ItemInput {
            code: "ITEM-A".into(),
            name: "Roti".into(),
            price: 15000.0,
        };
        let body = CreateItem(&input).body().unwrap().unwrap();
        let v: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(v["price"], serde_json::json!(15000.0));
        assert!(ListItems.body().unwrap().is_none());
    }

    #[test]
    fn test_period_entry_is_lenient() {
        let entries: Vec<PeriodEntry> =
            serde_json::from_str(r#"[{"year": "2025", "month": 3}, {"year": 2024, "month": 0}]"#)
                .unwrap();
        assert_eq!(entries[0].to_period(), Period::new(2025, 3));
        assert_eq!(entries[1].to_period(), None);
    }
}
