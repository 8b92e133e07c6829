//! 会话状态模块
//!
//! 启动时发一次探测请求决定状态：成功为 `Authenticated`，
//! 任何失败（网络、401 等）一律视为 `Unauthenticated`。

use crate::User;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Loading,
    Authenticated(User),
    Unauthenticated,
}

/// 路由守卫的判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// 会话仍在加载，显示占位
    Pending,
    /// 跳转到登录页
    Denied,
    /// 渲染页面
    Granted,
}

impl SessionState {
    /// 由探测结果得到会话状态，错误内容不做区分
    pub fn from_probe<E>(result: Result<User, E>) -> Self {
        match result {
            Ok(user) => SessionState::Authenticated(user),
            Err(_) => SessionState::Unauthenticated,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// **核心守卫逻辑**
    pub fn access(&self, requires_auth: bool) -> RouteAccess {
        if !requires_auth {
            return RouteAccess::Granted;
        }
        match self {
            SessionState::Loading => RouteAccess::Pending,
            SessionState::Authenticated(_) => RouteAccess::Granted,
            SessionState::Unauthenticated => RouteAccess::Denied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 1,
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
        }
    }

    #[test]
    fn test_probe_failure_is_unauthenticated() {
        let state = SessionState::from_probe::<&str>(Err("connection refused"));
        assert_eq!(state, SessionState::Unauthenticated);

        let state = SessionState::from_probe::<&str>(Ok(user()));
        assert_eq!(state.user().map(|u| u.id), Some(1));
    }

    #[test]
    fn test_access_matrix() {
        assert_eq!(SessionState::Loading.access(true), RouteAccess::Pending);
        assert_eq!(SessionState::Unauthenticated.access(true), RouteAccess::Denied);
        assert_eq!(
            SessionState::Authenticated(user()).access(true),
            RouteAccess::Granted
        );
        // 公开页面无论状态如何都可访问
        assert_eq!(SessionState::Loading.access(false), RouteAccess::Granted);
        assert_eq!(SessionState::Unauthenticated.access(false), RouteAccess::Granted);
    }
}
