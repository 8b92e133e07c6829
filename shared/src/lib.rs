//! Rekap 共享层
//!
//! 与运行平台无关的领域模型与状态逻辑，供 wasm 前端使用，也可在本机直接测试：
//! - `grid`: 报表网格状态（核心）
//! - `lock`: 期间锁状态机与表单模式
//! - `session`: 会话状态机与路由守卫判定
//! - `api`: 基于 `HttpClient` 抽象的 API 客户端

use serde::{Deserialize, Serialize};

pub mod amount;
pub mod api;
pub mod calendar;
pub mod error;
pub mod forms;
pub mod grid;
pub mod lock;
pub mod protocol;
pub mod request;
pub mod sequence;
pub mod session;
pub mod token;

pub use api::ApiClient;
pub use calendar::{MONTHS, Period, Week, Weekday, group_periods};
pub use error::{ApiError, ApiResult};
pub use grid::{ReportGrid, Row, RowField, Totals, compute_totals};
pub use lock::{FormMode, PeriodLock, ReportForm, SubmitBlocked};
pub use session::{RouteAccess, SessionState};

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const XSRF_COOKIE_NAME: &str = "XSRF-TOKEN";
pub const HEADER_XSRF_TOKEN: &str = "X-XSRF-TOKEN";
pub const HEADER_REQUESTED_WITH: &str = "X-Requested-With";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CSRF_DELAY_MS: u64 = 100;

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 当前登录用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// 门店主数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlet {
    pub id: u64,
    /// 人类可读的业务编码，报表行通过它引用门店
    pub code: String,
    pub name: String,
}

/// 商品主数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub code: String,
    pub name: String,
    #[serde(default, deserialize_with = "amount::de_opt_amount")]
    pub price: Option<f64>,
}

/// 报表页面使用的主数据快照（每个页面独立获取，不共享缓存）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MasterData {
    pub outlets: Vec<Outlet>,
    pub items: Vec<Item>,
}

impl MasterData {
    pub fn item_by_code(&self, code: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.code == code)
    }
}

/// 后端已保存的报表行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    #[serde(default, deserialize_with = "amount::de_text")]
    pub day_name: String,
    #[serde(default, deserialize_with = "amount::de_lenient_u32")]
    pub week: u32,
    #[serde(default, deserialize_with = "amount::de_text")]
    pub outlet_code: String,
    #[serde(default, deserialize_with = "amount::de_text")]
    pub item_code: String,
    #[serde(default, deserialize_with = "amount::de_text")]
    pub qty_order: String,
    #[serde(default, deserialize_with = "amount::de_text")]
    pub qty_sold: String,
    #[serde(default, deserialize_with = "amount::de_text")]
    pub deposit: String,
}

/// 提交给后端的报表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPayload {
    pub day_name: String,
    pub week: u8,
    pub month: u32,
    pub year: i32,
    pub outlet_id: String,
    pub item_id: String,
    pub qty_order: i64,
    pub qty_sold: i64,
    pub deposit: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_price_accepts_decimal_string() {
        let item: Item =
            serde_json::from_str(r#"{"id": 1, "code": "ITEM-A", "name": "Roti", "price": "15000.00"}"#)
                .unwrap();
        assert_eq!(item.price, Some(15000.0));

        let item: Item =
            serde_json::from_str(r#"{"id": 2, "code": "ITEM-B", "name": "Susu"}"#).unwrap();
        assert_eq!(item.price, None);
    }

    #[test]
    fn test_report_record_tolerates_mixed_types() {
        let rec: ReportRecord = serde_json::from_str(
            r#"{"day_name": "senin", "week": 1, "outlet_code": "OUT-001", "item_code": "ITEM-A",
                "qty_order": 10, "qty_sold": "4", "deposit": "60000.00"}"#,
        )
        .unwrap();
        assert_eq!(rec.qty_order, "10");
        assert_eq!(rec.qty_sold, "4");
        assert_eq!(rec.deposit, "60000.00");

        let rec: ReportRecord = serde_json::from_str(r#"{"week": "2"}"#).unwrap();
        assert_eq!(rec.day_name, "");
        assert_eq!(rec.week, 2);
    }

    #[test]
    fn test_master_data_lookup() {
        let master = MasterData {
            outlets: vec![],
            items: vec![Item {
                id: 1,
                code: "ITEM-A".into(),
                name: "Roti".into(),
                price: Some(15000.0),
            }],
        };
        assert!(master.item_by_code("ITEM-A").is_some());
        assert!(master.item_by_code("ITEM-Z").is_none());
    }
}
