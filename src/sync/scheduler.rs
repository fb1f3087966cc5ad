//! Scheduler - Chạy sync định kỳ cho watch mode.
//!
//! Thay setInterval-style timer bằng tick loop tuần tự: một chu kỳ
//! phải xong trước khi chu kỳ sau bắt đầu (không có hai sync chồng
//! nhau). Chu kỳ chạy quá interval thì các ticks bị trễ được bỏ qua
//! thay vì bắn dồn.

use anyhow::Result;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use super::server::{sync_once, QuoteSource, SyncReport};
use crate::storage::{AppState, QuoteStore};

/// Sync loop với tick cố định
pub struct Scheduler {
    interval: Duration,
    limit: usize,
}

impl Scheduler {
    /// Tạo scheduler mới; interval phải lớn hơn zero
    pub fn new(interval: Duration, limit: usize) -> Self {
        Self { interval, limit }
    }

    /// Chạy sync loop.
    ///
    /// `cycles = None` chạy cho đến khi process bị kill; `Some(n)` dừng
    /// sau đúng n chu kỳ (dùng cho scripts và tests). `on_cycle` được
    /// gọi sau mỗi chu kỳ với report của chu kỳ đó.
    /// Trả về số chu kỳ đã chạy.
    pub fn run<F>(
        &self,
        source: &dyn QuoteSource,
        store: &mut QuoteStore,
        state: &mut AppState,
        store_dir: &Path,
        cycles: Option<u64>,
        mut on_cycle: F,
    ) -> Result<u64>
    where
        F: FnMut(&SyncReport),
    {
        let mut completed: u64 = 0;
        let mut next_tick = Instant::now();

        loop {
            let report = sync_once(source, store, state, store_dir, self.limit)?;
            on_cycle(&report);
            completed += 1;

            if let Some(max) = cycles {
                if completed >= max {
                    break;
                }
            }

            let (tick, skipped) = advance_tick(next_tick, Instant::now(), self.interval);
            next_tick = tick;
            if skipped > 0 {
                tracing::warn!(
                    "[scheduler] Sync cycle overran interval, skipped {} tick(s)",
                    skipped
                );
            }

            thread::sleep(next_tick.saturating_duration_since(Instant::now()));
        }

        Ok(completed)
    }
}

/// Tính tick tiếp theo sau `now`.
///
/// Trả về (tick mới, số ticks bị bỏ qua). Tick kế tiếp luôn nằm sau
/// `now` để loop không bao giờ chạy bù các chu kỳ đã lỡ.
fn advance_tick(next_tick: Instant, now: Instant, interval: Duration) -> (Instant, u64) {
    let mut tick = next_tick + interval;
    let mut skipped = 0u64;
    while tick <= now {
        tick += interval;
        skipped += 1;
    }
    (tick, skipped)
}
