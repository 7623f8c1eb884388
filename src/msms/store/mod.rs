//! # Storage Layer
//!
//! This module defines the storage abstraction for msms. The [`DataStore`] trait
//! lets the command layer work against any backend that can hold an [`AppData`]
//! snapshot and persist it.
//!
//! ## Implementations
//!
//! - [`fs::JsonFileStore`]: Production storage
//!   - The whole snapshot lives in one JSON file (default `msms.json`)
//!   - Missing or corrupt files are replaced by an empty snapshot on open
//!   - Every save rewrites the file through a temp file and a rename
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence, counts saves
//!   - Can be told to fail saves, to exercise rollback
//!
//! ## Save Contract
//!
//! Mutations go through [`DataStore::commit`]: the next snapshot is installed
//! and persisted, and if persisting fails the previous snapshot is put back.
//! Memory and disk therefore never disagree after an operation returns.

use crate::error::Result;
use crate::model::AppData;
use std::mem;

pub mod fs;
pub mod memory;
mod self_test;

pub use self_test::self_test;

/// How a file-backed store arrived at its initial snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file existed and parsed cleanly.
    Loaded,
    /// No file existed; an empty one was written.
    Created,
    /// The file was unreadable or invalid; an empty one replaced it.
    Recovered,
    /// The file parsed but needed structural fixes, which were written back.
    Repaired,
}

/// Abstract interface for the single-snapshot store.
pub trait DataStore {
    /// Current in-memory snapshot.
    fn data(&self) -> &AppData;

    /// Mutable access to the snapshot. Callers must `save` afterwards.
    fn data_mut(&mut self) -> &mut AppData;

    /// Persist the current snapshot, replacing whatever was stored before.
    fn save(&mut self) -> Result<()>;

    /// Install `next` as the current snapshot and persist it.
    ///
    /// On a failed save the previous snapshot is restored and the error is
    /// returned.
    fn commit(&mut self, next: AppData) -> Result<()> {
        let previous = mem::replace(self.data_mut(), next);
        if let Err(err) = self.save() {
            *self.data_mut() = previous;
            return Err(err);
        }
        Ok(())
    }
}
