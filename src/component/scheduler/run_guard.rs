use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// 單一名額的執行鎖，確保同時最多只有一次執行
#[derive(Debug, Clone, Default)]
pub struct RunGuard {
    busy: Arc<AtomicBool>,
}

/// 持有期間代表有一次執行正在進行，drop 時釋放
#[derive(Debug)]
pub struct RunPermit {
    busy: Arc<AtomicBool>,
}

impl RunGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 嘗試取得執行名額；已有執行進行中時回傳 `None`
    #[must_use]
    pub fn try_acquire(&self) -> Option<RunPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RunPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

impl Drop for RunPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
