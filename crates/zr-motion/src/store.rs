//! `MoverStore` — the two concurrent mover registries.
//!
//! `movers` holds every mover ever created; `active` holds the subset the
//! scheduler must advance this tick.  Both map to the same shared cell.
//!
//! Lock order is always *mover cell → map shard*.  Callers never hold a
//! map guard while locking a cell: every iterator below clones the `Arc`s
//! out first and releases the shard before returning.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;

use zr_core::MoverId;

use crate::{MotionResult, Mover};

/// Shared, individually locked mover record.
pub type MoverCell = Arc<Mutex<Mover>>;

#[derive(Default)]
pub struct MoverStore {
    movers: DashMap<MoverId, MoverCell, FxBuildHasher>,
    active: DashMap<MoverId, MoverCell, FxBuildHasher>,
}

impl MoverStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: MoverId) -> Option<MoverCell> {
        self.movers.get(&id).map(|cell| Arc::clone(cell.value()))
    }

    /// Return the cell for `id`, creating it with `init` if absent.
    ///
    /// The boolean is `true` when this call inserted the mover.  `init` runs
    /// while the shard for `id` is held, so two racing callers never both
    /// create an entity for the same mover.  If `init` fails nothing is
    /// inserted.
    pub fn get_or_try_insert_with<F>(&self, id: MoverId, init: F) -> MotionResult<(MoverCell, bool)>
    where
        F: FnOnce() -> MotionResult<Mover>,
    {
        match self.movers.entry(id) {
            Entry::Occupied(e) => Ok((Arc::clone(e.get()), false)),
            Entry::Vacant(e) => {
                let cell = Arc::new(Mutex::new(init()?));
                e.insert(Arc::clone(&cell));
                Ok((cell, true))
            }
        }
    }

    /// Add a mover to the active set.  Call with the mover's lock held.
    pub fn activate(&self, id: MoverId, cell: &MoverCell) {
        self.active.insert(id, Arc::clone(cell));
    }

    /// Remove a mover from the active set.  Call with the mover's lock held.
    pub fn deactivate(&self, id: MoverId) {
        self.active.remove(&id);
    }

    pub fn is_active(&self, id: MoverId) -> bool {
        self.active.contains_key(&id)
    }

    /// Active movers, sorted by id, detached from the map.
    pub fn active_snapshot(&self) -> Vec<(MoverId, MoverCell)> {
        Self::sorted(&self.active)
    }

    /// Every mover, sorted by id, detached from the map.
    pub fn all_cells(&self) -> Vec<(MoverId, MoverCell)> {
        Self::sorted(&self.movers)
    }

    pub fn len(&self) -> usize {
        self.movers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movers.is_empty()
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    fn sorted(map: &DashMap<MoverId, MoverCell, FxBuildHasher>) -> Vec<(MoverId, MoverCell)> {
        let mut cells: Vec<_> = map
            .iter()
            .map(|e| (*e.key(), Arc::clone(e.value())))
            .collect();
        cells.sort_unstable_by_key(|(id, _)| *id);
        cells
    }
}
