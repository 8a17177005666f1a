//! Single-writer state cell for the current reading.
//!
//! [`reading_cell`] returns a [`ReadingWriter`], which cannot be cloned and
//! is moved into whichever task owns updates, plus a [`ReadingView`] that any
//! number of renderers may clone and read. Every write bumps a revision
//! counter so readers can tell whether anything changed since they last
//! looked.
//!
//! Sealing the cell is the teardown step: once sealed, every later write is
//! refused. Seal and write take the same lock, so a write either lands
//! before the seal or not at all.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::reading::SensorReading;

#[derive(Debug, Default)]
struct Slot {
    reading: Option<SensorReading>,
    revision: u64,
    sealed: bool,
}

type Shared = Arc<Mutex<Slot>>;

fn lock(shared: &Shared) -> MutexGuard<'_, Slot> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

/// Create an empty cell, returning its sole writer and a read view.
pub fn reading_cell() -> (ReadingWriter, ReadingView) {
    let shared: Shared = Arc::new(Mutex::new(Slot::default()));
    (
        ReadingWriter {
            shared: Arc::clone(&shared),
        },
        ReadingView { shared },
    )
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// The only handle that can change the current reading.
#[derive(Debug)]
pub struct ReadingWriter {
    shared: Shared,
}

impl ReadingWriter {
    /// Replace the current reading. Returns `false` if the cell is sealed.
    pub fn set(&mut self, reading: SensorReading) -> bool {
        let mut slot = lock(&self.shared);
        if slot.sealed {
            return false;
        }
        slot.reading = Some(reading);
        slot.revision += 1;
        true
    }

    /// Derive a new reading from the current one.
    ///
    /// A no-op returning `false` when there is no reading yet or the cell is
    /// sealed; `f` is not called in either case.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&SensorReading) -> SensorReading,
    {
        let mut slot = lock(&self.shared);
        if slot.sealed {
            return false;
        }
        let Some(prev) = slot.reading.as_ref() else {
            return false;
        };
        let next = f(prev);
        slot.reading = Some(next);
        slot.revision += 1;
        true
    }

    pub fn is_sealed(&self) -> bool {
        lock(&self.shared).sealed
    }

    /// Refuse all further writes, including this writer's own.
    pub fn seal(&self) {
        lock(&self.shared).sealed = true;
    }

    /// A guard that can seal this cell without owning the writer.
    pub fn sealer(&self) -> Sealer {
        Sealer {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Seals a cell from outside the task that owns its writer.
#[derive(Debug, Clone)]
pub struct Sealer {
    shared: Shared,
}

impl Sealer {
    /// Refuse all further writes. Idempotent.
    pub fn seal(&self) {
        lock(&self.shared).sealed = true;
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

/// Read-only handle to the current reading.
#[derive(Debug, Clone)]
pub struct ReadingView {
    shared: Shared,
}

impl ReadingView {
    /// Clone of the current reading, if one has been set.
    pub fn get(&self) -> Option<SensorReading> {
        lock(&self.shared).reading.clone()
    }

    /// Number of successful writes so far.
    pub fn revision(&self) -> u64 {
        lock(&self.shared).revision
    }

    /// Reading and revision captured under one lock.
    pub fn snapshot(&self) -> (Option<SensorReading>, u64) {
        let slot = lock(&self.shared);
        (slot.reading.clone(), slot.revision)
    }

    pub fn is_sealed(&self) -> bool {
        lock(&self.shared).sealed
    }
}
