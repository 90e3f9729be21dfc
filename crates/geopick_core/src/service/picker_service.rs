//! Picker use-case service.
//!
//! # Responsibility
//! - Keep the directory listing and the current selection for the UI shell.
//! - Fence overlapping single-record fetches with sequence tickets.
//! - Produce the render-ready [`PickerView`].
//!
//! # Invariants
//! - A failed listing fetch leaves the previous listing untouched.
//! - A failed record fetch leaves the selection and storage untouched.
//! - A fetched record is applied only when its ticket is the latest issued,
//!   regardless of the order responses arrive in.

use crate::directory::client::{DirectoryClient, DirectoryResult};
use crate::model::record::{Record, RecordId};
use crate::repo::kv_store::KeyValueStore;
use crate::service::picker_view::{PickerView, UserOption};
use crate::service::selection_store::SelectionStore;
use log::{info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Sequence token captured when a record fetch is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Result of applying a fetched record.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// Record became the current selection.
    ///
    /// `persisted` is `false` when the storage write failed; the record is
    /// still shown for this session but will not survive a restart.
    Applied { record: Record, persisted: bool },
    /// A newer fetch was issued meanwhile; the record was discarded.
    Superseded { ticket: FetchTicket, latest: FetchTicket },
}

/// Use-case service behind the picker screen.
pub struct PickerService<C: DirectoryClient, S: KeyValueStore> {
    client: C,
    listing: Mutex<Vec<Record>>,
    selection: Mutex<SelectionStore<S>>,
    latest_ticket: AtomicU64,
}

impl<C: DirectoryClient, S: KeyValueStore> PickerService<C, S> {
    /// Creates the service and restores the persisted selection once.
    pub fn new(client: C, storage: S) -> Self {
        Self {
            client,
            listing: Mutex::new(Vec::new()),
            selection: Mutex::new(SelectionStore::load(storage)),
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Fetches the full directory and replaces the cached listing.
    ///
    /// Returns the number of records on success. On failure the previous
    /// listing is kept and the error is returned for diagnostics only.
    pub fn refresh_directory(&self) -> DirectoryResult<usize> {
        match self.client.list_all() {
            Ok(records) => {
                let count = records.len();
                *lock(&self.listing) = records;
                info!(
                    "event=directory_refresh module=picker status=ok count={}",
                    count
                );
                Ok(count)
            }
            Err(err) => {
                warn!(
                    "event=directory_refresh module=picker status=error error_code={} listing=kept",
                    err.code()
                );
                Err(err)
            }
        }
    }

    /// Dropdown entries from the cached listing.
    pub fn listing(&self) -> Vec<UserOption> {
        lock(&self.listing).iter().map(UserOption::from).collect()
    }

    /// Snapshot of the current selection.
    pub fn selection(&self) -> Option<Record> {
        lock(&self.selection).current().cloned()
    }

    /// Issues the next fetch ticket; it becomes the only applicable one.
    pub fn issue_ticket(&self) -> FetchTicket {
        FetchTicket(self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Applies the outcome of a record fetch issued under `ticket`.
    ///
    /// Failed fetches are returned as errors without touching any state,
    /// whether or not they are stale.
    pub fn apply_fetched(
        &self,
        ticket: FetchTicket,
        fetched: DirectoryResult<Record>,
    ) -> DirectoryResult<SelectOutcome> {
        let record = match fetched {
            Ok(record) => record,
            Err(err) => {
                warn!(
                    "event=user_select module=picker status=error ticket={} error_code={} selection=kept",
                    ticket.sequence(),
                    err.code()
                );
                return Err(err);
            }
        };

        let mut selection = lock(&self.selection);
        let latest = FetchTicket(self.latest_ticket.load(Ordering::SeqCst));
        if ticket != latest {
            info!(
                "event=user_select module=picker status=superseded ticket={} latest={}",
                ticket.sequence(),
                latest.sequence()
            );
            return Ok(SelectOutcome::Superseded { ticket, latest });
        }

        let persisted = match selection.set(record.clone()) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    "event=user_select module=picker status=degraded ticket={} record_id={} error_code=selection_persist_failed error={}",
                    ticket.sequence(),
                    record.id,
                    err
                );
                false
            }
        };
        info!(
            "event=user_select module=picker status=ok ticket={} record_id={} persisted={}",
            ticket.sequence(),
            record.id,
            persisted
        );
        Ok(SelectOutcome::Applied { record, persisted })
    }

    /// Fetches one record and makes it the selection unless superseded.
    pub fn select(&self, id: RecordId) -> DirectoryResult<SelectOutcome> {
        let ticket = self.issue_ticket();
        let fetched = self.client.fetch_one(id);
        self.apply_fetched(ticket, fetched)
    }

    /// Builds the current screen state.
    pub fn view(&self) -> PickerView {
        let listing = lock(&self.listing);
        let selection = lock(&self.selection);
        PickerView::build(&listing, selection.current())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic while holding the lock cannot leave a half-written value: both
    // guarded values are only ever replaced wholesale.
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
