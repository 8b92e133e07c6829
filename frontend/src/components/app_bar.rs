//! 受保护页面的外壳：顶栏 + 侧边抽屉导航 + 用户菜单

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::use_session;
use crate::components::icons::{LogOut, Menu, UserCircle};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn AppShell(route: AppRoute, children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let (drawer_open, set_drawer_open) = signal(false);

    let user_name = move || session.user().map(|u| u.name).unwrap_or_default();

    let on_logout = move |_| {
        spawn_local(async move {
            // 导航由路由服务监听会话状态后自动处理
            session.logout().await;
        });
    };

    let go = move |target: AppRoute| {
        set_drawer_open.set(false);
        router.go(target);
    };

    view! {
        <div class="drawer min-h-screen bg-base-200">
            <input
                id="app-drawer"
                type="checkbox"
                class="drawer-toggle"
                prop:checked=move || drawer_open.get()
                on:change=move |ev| set_drawer_open.set(event_target_checked(&ev))
            />
            <div class="drawer-content flex flex-col">
                <div class="navbar bg-primary text-primary-content shadow">
                    <div class="flex-none">
                        <label for="app-drawer" class="btn btn-square btn-ghost">
                            <Menu attr:class="h-6 w-6" />
                        </label>
                    </div>
                    <div class="flex-1 text-xl font-semibold px-2">{route.title()}</div>
                    <div class="flex-none dropdown dropdown-end">
                        <div tabindex="0" role="button" class="btn btn-ghost btn-circle">
                            <UserCircle attr:class="h-7 w-7" />
                        </div>
                        <ul tabindex="0" class="dropdown-content menu z-[1] p-2 shadow bg-base-100 text-base-content rounded-box w-56">
                            <li class="menu-title">{move || format!("Profile ({})", user_name())}</li>
                            <li>
                                <a class="text-error" on:click=on_logout>
                                    <LogOut attr:class="h-4 w-4" /> "Logout"
                                </a>
                            </li>
                        </ul>
                    </div>
                </div>
                <main class="flex-1">{children()}</main>
            </div>
            <div class="drawer-side z-20">
                <label for="app-drawer" aria-label="close sidebar" class="drawer-overlay"></label>
                <ul class="menu p-4 w-64 min-h-full bg-base-100 text-base-content">
                    {AppRoute::menu()
                        .into_iter()
                        .map(|target| {
                            let active = target == route;
                            view! {
                                <li>
                                    <a class:active=active on:click=move |_| go(target)>
                                        {target.title()}
                                    </a>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}
