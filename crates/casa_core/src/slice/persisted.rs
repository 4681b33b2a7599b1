//! Generic persisted slice.
//!
//! # Responsibility
//! - Hold one slice's in-memory state.
//! - Hydrate it once from storage, then persist a full snapshot after every
//!   mutation.
//!
//! # Invariants
//! - Hydration is applied at most once per slice instance.
//! - A hydration result is discarded when any mutation happened after the
//!   load was issued; in-memory edits are never clobbered by a late load.
//! - Failed or wrongly-shaped loads leave the default state in place.
//! - After a load the medium itself failed, no snapshot is written: the
//!   stored document was never seen, so a snapshot would replace it.
//! - Every mutation (including deletions) persists the complete state.

use crate::slice::writer::SliceWriter;
use crate::store::adapter::{decode, LoadOutcome, SaveOutcome, SliceStore};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Where a slice's snapshots go.
#[derive(Clone)]
pub enum Persistence {
    /// Write synchronously through the adapter on every mutation.
    Direct(SliceStore),
    /// Hand snapshots to a single-writer queue.
    Queued(Arc<SliceWriter>),
    /// Keep state in memory only.
    InMemory,
}

impl Persistence {
    pub fn is_persisted(&self) -> bool {
        !matches!(self, Self::InMemory)
    }
}

/// Proof of when a hydration load was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrationTicket {
    generation: u64,
}

/// What hydration did to the in-memory state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationStatus {
    /// Persisted value replaced the default.
    Applied,
    /// Nothing stored yet; default kept.
    Missing,
    /// Load failed or did not match the slice shape; default kept.
    Rejected(String),
    /// A mutation raced ahead of the load; in-memory state kept.
    Discarded,
    /// Hydration already ran for this instance.
    AlreadyHydrated,
    /// Slice is memory-only.
    NotPersisted,
}

/// One slice of application state bound to one storage key.
pub struct PersistedSlice<T> {
    key: String,
    state: T,
    generation: u64,
    hydrated: bool,
    persistence: Persistence,
    last_save: Option<SaveOutcome>,
    load_failure: Option<String>,
}

impl<T> PersistedSlice<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(key: impl Into<String>, persistence: Persistence) -> Self {
        Self {
            key: key.into(),
            state: T::default(),
            generation: 0,
            hydrated: false,
            persistence,
            last_save: None,
            load_failure: None,
        }
    }

    /// Creates the slice and hydrates it immediately.
    pub fn open(key: impl Into<String>, persistence: Persistence) -> Self {
        let mut slice = Self::new(key, persistence);
        slice.hydrate();
        slice
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &T {
        &self.state
    }

    /// Number of mutations applied to this instance.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Outcome of the most recent snapshot persist. For queued slices
    /// `Saved` means the writer accepted the snapshot.
    pub fn last_save(&self) -> Option<&SaveOutcome> {
        self.last_save.as_ref()
    }

    /// Reason the medium failed during hydration. While set, mutations stay
    /// in memory and every persist reports `StoreFailed`.
    pub fn load_failure(&self) -> Option<&str> {
        self.load_failure.as_deref()
    }

    /// Loads and applies the persisted value (once).
    pub fn hydrate(&mut self) -> HydrationStatus {
        if self.hydrated {
            return HydrationStatus::AlreadyHydrated;
        }
        let ticket = self.begin_hydration();
        let outcome = self.fetch();
        self.complete_hydration(ticket, outcome)
    }

    /// Marks the point a load is issued, for callers that load off-thread.
    pub fn begin_hydration(&self) -> HydrationTicket {
        HydrationTicket {
            generation: self.generation,
        }
    }

    /// Reads the persisted value without touching in-memory state.
    ///
    /// Queued slices read their own not-yet-written snapshot first.
    pub fn fetch(&self) -> LoadOutcome<T> {
        match &self.persistence {
            Persistence::Direct(store) => store.load(&self.key),
            Persistence::Queued(writer) => match writer.pending_snapshot(&self.key) {
                Some(json) => decode(&self.key, &json),
                None => writer.store().load(&self.key),
            },
            Persistence::InMemory => LoadOutcome::Missing,
        }
    }

    /// Applies a load issued at `ticket` unless the slice moved on since.
    pub fn complete_hydration(
        &mut self,
        ticket: HydrationTicket,
        outcome: LoadOutcome<T>,
    ) -> HydrationStatus {
        if self.hydrated {
            return HydrationStatus::AlreadyHydrated;
        }
        self.hydrated = true;

        if !self.persistence.is_persisted() {
            return HydrationStatus::NotPersisted;
        }
        if ticket.generation != self.generation {
            info!(
                "event=slice_hydrate module=slice status=discarded key={} issued_at={} current={}",
                self.key, ticket.generation, self.generation
            );
            return HydrationStatus::Discarded;
        }

        match outcome {
            LoadOutcome::Loaded(value) => {
                self.state = value;
                debug!(
                    "event=slice_hydrate module=slice status=applied key={}",
                    self.key
                );
                HydrationStatus::Applied
            }
            LoadOutcome::Missing => HydrationStatus::Missing,
            LoadOutcome::DecodeFailed(reason) => {
                warn!(
                    "event=slice_hydrate module=slice status=rejected key={} reason={reason}",
                    self.key
                );
                HydrationStatus::Rejected(reason)
            }
            LoadOutcome::StoreFailed(reason) => {
                warn!(
                    "event=slice_hydrate module=slice status=unavailable key={} reason={reason}",
                    self.key
                );
                self.load_failure = Some(reason.clone());
                HydrationStatus::Rejected(reason)
            }
        }
    }

    /// Applies `edit` to the state and persists the resulting snapshot.
    pub fn mutate<R>(&mut self, edit: impl FnOnce(&mut T) -> R) -> R {
        let result = edit(&mut self.state);
        self.generation += 1;
        self.persist();
        result
    }

    /// Replaces the whole state and persists it.
    pub fn replace(&mut self, value: T) {
        self.mutate(|state| *state = value);
    }

    /// Consumes the slice, returning the in-memory state.
    pub fn into_inner(self) -> T {
        self.state
    }

    fn persist(&mut self) {
        if let Some(reason) = &self.load_failure {
            warn!(
                "event=slice_save module=slice status=skipped key={} error_code=not_loaded",
                self.key
            );
            self.last_save = Some(SaveOutcome::StoreFailed(format!(
                "slice {} was never loaded: {reason}",
                self.key
            )));
            return;
        }
        let outcome = match &self.persistence {
            Persistence::Direct(store) => store.save(&self.key, &self.state),
            Persistence::Queued(writer) => match serde_json::to_string(&self.state) {
                Ok(json) => {
                    writer.submit(&self.key, json);
                    SaveOutcome::Saved
                }
                Err(err) => {
                    warn!(
                        "event=slice_save module=slice status=error key={} error_code=encode_failed error={err}",
                        self.key
                    );
                    SaveOutcome::EncodeFailed(err.to_string())
                }
            },
            Persistence::InMemory => return,
        };
        self.last_save = Some(outcome);
    }
}
