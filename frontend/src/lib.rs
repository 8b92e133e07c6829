//! Rekap 前端应用
//!
//! 采用 Context-Driven 架构：
//! - `config`: 构建时配置与 API 客户端工厂
//! - `auth`: 会话上下文（显式对象，通过 Context 共享）
//! - `web::route` / `web::router`: 路由定义与带守卫的路由服务
//! - `components`: UI 组件层

mod auth;
pub mod config;
mod components {
    pub mod app_bar;
    pub mod dashboard;
    pub mod edit_laporan;
    mod form_dialog;
    pub mod icons;
    pub mod item;
    pub mod laporan;
    pub mod login;
    pub mod outlet;
    pub mod rekap;
    mod report;
}

use crate::auth::SessionContext;
use crate::components::app_bar::AppShell;
use crate::components::dashboard::DashboardPage;
use crate::components::edit_laporan::EditLaporanPage;
use crate::components::item::ItemPage;
use crate::components::laporan::LaporanPage;
use crate::components::login::LoginPage;
use crate::components::outlet::OutletPage;
use crate::components::rekap::RekapPage;
use crate::config::AppConfig;

use leptos::prelude::*;

// 浏览器原生 API 封装模块
pub(crate) mod web {
    mod cookie;
    pub mod dialog;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use cookie::CookieTokenStore;
    pub use http::{AbortSlot, FetchHttpClient};
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 受保护页面统一包在 `AppShell` 中。
fn route_matcher(route: AppRoute) -> AnyView {
    let page = match route {
        AppRoute::Login => return view! { <LoginPage /> }.into_any(),
        AppRoute::NotFound => {
            return view! {
                <div class="flex items-center justify-center min-h-screen bg-base-200">
                    <div class="text-center">
                        <h1 class="text-6xl font-bold text-error">"404"</h1>
                        <p class="text-xl mt-4">"Halaman tidak ditemukan"</p>
                    </div>
                </div>
            }
            .into_any();
        }
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Laporan => view! { <LaporanPage /> }.into_any(),
        AppRoute::Rekap => view! { <RekapPage /> }.into_any(),
        AppRoute::EditReport(period) => view! { <EditLaporanPage period=period /> }.into_any(),
        AppRoute::Outlets => view! { <OutletPage /> }.into_any(),
        AppRoute::Items => view! { <ItemPage /> }.into_any(),
    };
    view! { <AppShell route=route>{page}</AppShell> }.into_any()
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(config);

    // 1. 创建会话上下文并探测现有会话
    let session = SessionContext::new(config);
    provide_context(session);
    session.init();

    view! {
        // 2. 路由器只依赖注入的会话信号
        <Router session=session.signal()>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
