//! Monotonic record id source.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static GLOBAL_CLOCK: IdClock = IdClock::new();

/// Millisecond clock that never hands out the same value twice.
///
/// Ids follow wall-clock time but are forced strictly upward, so two records
/// created within the same millisecond (or after a clock step back) still
/// get distinct ids.
#[derive(Debug, Default)]
pub struct IdClock {
    last: AtomicU64,
}

impl IdClock {
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }

    /// Shared process-wide clock.
    pub fn global() -> &'static IdClock {
        &GLOBAL_CLOCK
    }

    /// Next id based on the current wall clock.
    pub fn next(&self) -> u64 {
        self.next_at(now_epoch_ms())
    }

    /// Next id given an explicit `now_ms`; returns `max(now_ms, last + 1)`.
    pub fn next_at(&self, now_ms: u64) -> u64 {
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = now_ms.max(last.saturating_add(1));
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return candidate,
                Err(actual) => last = actual,
            }
        }
    }

    /// Ids handed out afterwards are greater than `id`.
    pub fn observe(&self, id: u64) {
        self.last.fetch_max(id, Ordering::SeqCst);
    }

    /// `observe` over stored string ids; non-numeric ids are skipped.
    pub fn observe_ids<'a>(&self, ids: impl IntoIterator<Item = &'a str>) {
        for id in ids {
            if let Ok(value) = id.parse::<u64>() {
                self.observe(value);
            }
        }
    }

    /// String form used by every slice except bets.
    pub fn next_string(&self) -> String {
        self.next().to_string()
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
