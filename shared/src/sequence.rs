//! 请求序号栅栏
//!
//! 每次发起获取前调用 `begin()` 拿到一张票据；响应返回时只有最新的票据
//! 仍然有效，较早请求的迟到响应会被丢弃，不会覆盖新状态。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Default)]
pub struct LatestOnly {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone)]
pub struct Ticket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl LatestOnly {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始新请求，之前的所有票据立即失效
    pub fn begin(&self) -> Ticket {
        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            id,
            latest: self.latest.clone(),
        }
    }

    /// 让所有未完成的票据失效（页面卸载时使用）
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let seq = LatestOnly::new();
        let first = seq.begin();
        assert!(first.is_current());

        let second = seq.begin();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn test_invalidate_and_clones_share_counter() {
        let seq = LatestOnly::new();
        let handle = seq.clone();
        let ticket = seq.begin();
        handle.invalidate();
        assert!(!ticket.is_current());

        let next = handle.begin();
        assert!(next.is_current());
    }
}
