use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use std::time::Instant;

static PERF_ENABLED: AtomicBool = AtomicBool::new(false);
static PERF_INIT: Once = Once::new();

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 性能日志开关
///
/// - Debug 默认开启；Release 默认关闭
/// - `KLINKE_PERF=1` 强制开启，`KLINKE_PERF=0` 强制关闭
pub fn perf_enabled() -> bool {
    PERF_INIT.call_once(|| {
        let enabled = match std::env::var("KLINKE_PERF") {
            Ok(v) => is_true(&v),
            Err(_) => cfg!(debug_assertions),
        };
        PERF_ENABLED.store(enabled, Ordering::Relaxed);
    });
    PERF_ENABLED.load(Ordering::Relaxed)
}

/// 性能统计 Guard：记录 elapsed_ms + 输入/输出规模
///
/// 使用方式：
/// ```ignore
/// let mut perf = klinke_planejamento::perf::PerfGuard::new("allocate");
/// perf.set_items(orders.len());
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    items_in: usize,
    items_out: usize,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            items_in: 0,
            items_out: 0,
        }
    }

    /// 输入规模（订单数 / 行数）
    pub fn set_items(&mut self, items_in: usize) {
        self.items_in = items_in;
    }

    /// 输出规模（片段数 / 日数）
    pub fn set_output(&mut self, items_out: usize) {
        self.items_out = items_out;
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        if !perf_enabled() {
            return;
        }
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.elapsed_ms(),
            items_in = self.items_in,
            items_out = self.items_out,
            "done"
        );
    }
}
