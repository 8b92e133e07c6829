//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 导航流程："监听 -> 验证 -> 处理 -> 加载"。
//! 守卫判定来自 `SessionState::access`，会话加载期间渲染占位内容。

use leptos::prelude::*;
use rekap_shared::{RouteAccess, SessionState};
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路由（path + query）
fn current_route() -> AppRoute {
    let location = web_sys::window().map(|w| w.location());
    let path = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    let query = location
        .as_ref()
        .and_then(|l| l.search().ok())
        .unwrap_or_default();
    AppRoute::from_location(&path, &query)
}

/// 写入 History 状态；`push` 为 false 时替换当前记录（用于重定向）
fn write_history(route: &AppRoute, push: bool) {
    let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
        return;
    };
    let url = route.to_path();
    let result = if push {
        history.push_state_with_url(&JsValue::NULL, "", Some(&url))
    } else {
        history.replace_state_with_url(&JsValue::NULL, "", Some(&url))
    };
    if result.is_err() {
        log::warn!("[Router] failed to update history for {}", url);
    }
}

/// 路由器服务
///
/// 通过 Signal 驱动界面更新；会话状态以信号注入，与认证模块解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<SessionState>,
}

impl RouterService {
    fn new(session: Signal<SessionState>) -> Self {
        let (current_route, set_route) = signal(current_route());
        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, href: &str) {
        self.navigate_to_route(AppRoute::from_href(href), true);
    }

    pub fn go(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }

    /// 根据会话状态决定最终落地的路由
    ///
    /// 会话仍在加载时放行，由 `RouterOutlet` 显示占位，加载完成后再由
    /// `setup_auth_redirect` 处理。
    fn resolve(route: AppRoute, session: &SessionState) -> AppRoute {
        match session.access(route.requires_auth()) {
            RouteAccess::Denied => AppRoute::auth_failure_redirect(),
            _ if session.is_authenticated() && route.should_redirect_when_authenticated() => {
                AppRoute::auth_success_redirect()
            }
            _ => route,
        }
    }

    fn navigate_to_route(&self, target: AppRoute, use_push: bool) {
        let resolved = self.session.with_untracked(|s| Self::resolve(target, s));
        if resolved != target {
            log::info!("[Router] {} redirected to {}", target, resolved);
            // 重定向替换当前记录，避免后退回到被拒绝的页面
            write_history(&resolved, false);
        } else {
            write_history(&resolved, use_push);
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            let target = current_route();
            let resolved = router.session.with_untracked(|s| Self::resolve(target, s));
            if resolved != target {
                write_history(&resolved, false);
            }
            router.set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let router = *self;
        Effect::new(move |_| {
            let session = router.session.get();
            let route = router.current_route.get_untracked();
            if session.is_loading() {
                return;
            }
            let resolved = Self::resolve(route, &session);
            if resolved != route {
                log::info!(
                    "[Router] session changed (authenticated = {}), redirecting to {}",
                    session.is_authenticated(),
                    resolved
                );
                write_history(&resolved, false);
                router.set_route.set(resolved);
            }
        });
    }
}

fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);
    router.init_popstate_listener();
    router.setup_auth_redirect();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(session: Signal<SessionState>, children: Children) -> impl IntoView {
    provide_router(session);
    children()
}

/// 路由出口组件
///
/// 受保护页面在会话加载期间显示占位；被拒绝时不渲染（重定向由 Effect 完成）。
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || {
        let route = router.current_route().get();
        let access = router.session.with(|s| s.access(route.requires_auth()));
        match access {
            RouteAccess::Granted => matcher(route),
            RouteAccess::Pending => view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                    <span class="ml-3">"Loading user..."</span>
                </div>
            }
            .into_any(),
            RouteAccess::Denied => ().into_any(),
        }
    }
}

/// 站内链接：拦截点击，通过路由服务导航
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let href = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&to);
    };

    view! {
        <a href=href class=class on:click=on_click>
            {children()}
        </a>
    }
}
