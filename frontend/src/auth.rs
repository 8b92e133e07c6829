//! 认证模块
//!
//! 会话状态保存在显式的上下文对象中，与路由系统解耦：
//! 路由服务只读取注入的 `Signal<SessionState>`。

use leptos::prelude::*;
use leptos::task::spawn_local;
use rekap_shared::error::ApiResult;
use rekap_shared::{Credentials, SessionState, User};

use crate::config::AppConfig;
use crate::web::LocalStorage;

const STORAGE_EMAIL_KEY: &str = "rekap_last_email";

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: ReadSignal<SessionState>,
    set_state: WriteSignal<SessionState>,
    config: AppConfig,
}

impl SessionContext {
    pub fn new(config: AppConfig) -> Self {
        let (state, set_state) = signal(SessionState::Loading);
        Self {
            state,
            set_state,
            config,
        }
    }

    /// 用于路由服务注入
    pub fn signal(&self) -> Signal<SessionState> {
        self.state.into()
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    /// 启动时探测一次会话，任何失败都视为未登录
    pub fn init(&self) {
        let ctx = *self;
        spawn_local(async move {
            let result = ctx.config.client().current_user().await;
            if let Err(e) = &result {
                log::info!("[Auth] no active session: {}", e);
            }
            let state = SessionState::from_probe(result);
            if let Some(user) = state.user() {
                log::info!("[Auth] session restored for {}", user.name);
            }
            ctx.set_state.set(state);
        });
    }

    /// 登录：成功后更新会话并记住邮箱；失败时会话保持未登录并把错误交给调用方
    pub async fn login(&self, credentials: Credentials) -> ApiResult<User> {
        match self.config.client().login(&credentials).await {
            Ok(user) => {
                LocalStorage::set(STORAGE_EMAIL_KEY, &credentials.email);
                log::info!("[Auth] logged in as {}", user.name);
                self.set_state.set(SessionState::Authenticated(user.clone()));
                Ok(user)
            }
            Err(e) => {
                log::error!("[Auth] login failed: {}", e);
                self.set_state.set(SessionState::Unauthenticated);
                Err(e)
            }
        }
    }

    /// 注销：无论请求是否成功，本地会话都会被清除
    ///
    /// 导航由路由服务监听会话状态后自动处理。
    pub async fn logout(&self) {
        if let Err(e) = self.config.client().logout().await {
            log::error!("[Auth] logout request failed: {}", e);
        }
        self.set_state.set(SessionState::Unauthenticated);
    }
}

pub fn last_email() -> String {
    LocalStorage::get(STORAGE_EMAIL_KEY).unwrap_or_default()
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
