//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use rekap_shared::Period;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    Login,
    /// 首页 (需要认证)
    #[default]
    Dashboard,
    /// 新建周报
    Laporan,
    /// 已提交期间列表
    Rekap,
    /// 编辑已提交期间；参数无效时为 `None`，页面显示错误
    EditReport(Option<Period>),
    Outlets,
    Items,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL（path + query）解析为路由枚举
    pub fn from_location(path: &str, query: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        match path {
            "/" => Self::Dashboard,
            "/login" => Self::Login,
            "/laporan" => Self::Laporan,
            "/rekap" => Self::Rekap,
            "/edit" => Self::EditReport(Period::from_query(query)),
            "/outlet" => Self::Outlets,
            "/item" => Self::Items,
            _ => Self::NotFound,
        }
    }

    /// 解析 `navigate` 传入的地址，例如 `/edit?year=2025&month=3`
    pub fn from_href(href: &str) -> Self {
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        Self::from_location(path, query)
    }

    /// 获取路由对应的 URL
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".into(),
            Self::Dashboard => "/".into(),
            Self::Laporan => "/laporan".into(),
            Self::Rekap => "/rekap".into(),
            Self::EditReport(Some(period)) => format!("/edit?{}", period.to_query()),
            Self::EditReport(None) => "/edit".into(),
            Self::Outlets => "/outlet".into(),
            Self::Items => "/item".into(),
            Self::NotFound => "/404".into(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 顶栏标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Laporan => "Laporan",
            Self::Rekap | Self::EditReport(_) => "Rekap",
            Self::Outlets => "Outlet",
            Self::Items => "Item",
            _ => "Dashboard",
        }
    }

    /// 侧边抽屉中的导航项
    pub fn menu() -> [AppRoute; 5] {
        [
            Self::Dashboard,
            Self::Laporan,
            Self::Rekap,
            Self::Outlets,
            Self::Items,
        ]
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
