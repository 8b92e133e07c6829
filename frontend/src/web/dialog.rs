//! 浏览器原生对话框
//!
//! 修改操作的结果和删除确认都使用阻塞式的 `alert` / `confirm`。

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// 无法弹出对话框时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
