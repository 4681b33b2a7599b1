//! Single-writer snapshot queue.
//!
//! # Responsibility
//! - Move slice snapshot writes off the caller's thread.
//! - Keep at most one write in flight so writes for one key land in the
//!   order they were submitted.
//!
//! # Invariants
//! - A snapshot queued for a key is replaced (never written) when a newer
//!   snapshot for the same key arrives before the worker picks it up.
//! - Pending snapshots are written before the worker exits on drop.
//! - Write failures are logged and counted; submitters never see them.

use crate::store::adapter::SliceStore;
use crate::store::kv_store::KeyValueStore;
use log::{debug, error, info};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

/// Counters describing what the writer did with submitted snapshots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterStats {
    pub submitted: u64,
    pub written: u64,
    pub superseded: u64,
    pub failed: u64,
}

#[derive(Default)]
struct QueueState {
    order: VecDeque<String>,
    pending: HashMap<String, String>,
    in_flight: Option<(String, String)>,
    shutdown: bool,
    stats: WriterStats,
}

impl QueueState {
    fn is_idle(&self) -> bool {
        self.order.is_empty() && self.in_flight.is_none()
    }
}

struct Shared {
    state: Mutex<QueueState>,
    work_ready: Condvar,
    became_idle: Condvar,
    medium: Arc<dyn KeyValueStore>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Background writer owning the only write path to its medium.
pub struct SliceWriter {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl SliceWriter {
    /// Starts the worker thread for `medium`.
    pub fn spawn(medium: Arc<dyn KeyValueStore>) -> std::io::Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState::default()),
            work_ready: Condvar::new(),
            became_idle: Condvar::new(),
            medium,
        });
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name("casa-slice-writer".to_string())
            .spawn(move || run_worker(&worker_shared))?;

        info!("event=writer_start module=slice status=ok");
        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }

    /// Adapter over the same medium, for reads.
    pub fn store(&self) -> SliceStore {
        SliceStore::new(Arc::clone(&self.shared.medium))
    }

    /// Queues `json` as the newest snapshot of `key`.
    pub fn submit(&self, key: &str, json: String) {
        let mut state = self.shared.lock();
        state.stats.submitted += 1;
        if state.pending.insert(key.to_string(), json).is_some() {
            state.stats.superseded += 1;
            debug!("event=writer_submit module=slice status=superseded key={key}");
        } else {
            state.order.push_back(key.to_string());
        }
        drop(state);
        self.shared.work_ready.notify_one();
    }

    /// Newest snapshot for `key` not yet on the medium, if any.
    pub fn pending_snapshot(&self, key: &str) -> Option<String> {
        let state = self.shared.lock();
        if let Some(json) = state.pending.get(key) {
            return Some(json.clone());
        }
        state
            .in_flight
            .as_ref()
            .filter(|(in_flight_key, _)| in_flight_key == key)
            .map(|(_, json)| json.clone())
    }

    /// Blocks until every submitted snapshot has been attempted.
    pub fn flush(&self) {
        let mut state = self.shared.lock();
        while !state.is_idle() {
            state = self
                .shared
                .became_idle
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn stats(&self) -> WriterStats {
        self.shared.lock().stats
    }
}

impl Drop for SliceWriter {
    fn drop(&mut self) {
        self.shared.lock().shutdown = true;
        self.shared.work_ready.notify_all();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=writer_stop module=slice status=error error_code=worker_panicked");
                return;
            }
        }
        info!("event=writer_stop module=slice status=ok");
    }
}

fn run_worker(shared: &Shared) {
    loop {
        let (key, json) = {
            let mut state = shared.lock();
            loop {
                if let Some(key) = state.order.pop_front() {
                    if let Some(json) = state.pending.remove(&key) {
                        state.in_flight = Some((key.clone(), json.clone()));
                        break (key, json);
                    }
                    continue;
                }
                if state.shutdown {
                    return;
                }
                state = shared
                    .work_ready
                    .wait(state)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        let result = shared.medium.set(&key, &json);

        let mut state = shared.lock();
        state.in_flight = None;
        match result {
            Ok(()) => {
                state.stats.written += 1;
                debug!(
                    "event=writer_write module=slice status=ok key={key} bytes={}",
                    json.len()
                );
            }
            Err(err) => {
                state.stats.failed += 1;
                error!(
                    "event=writer_write module=slice status=error key={key} error_code=store_failed error={err}"
                );
            }
        }
        if state.is_idle() {
            shared.became_idle.notify_all();
        }
    }
}
