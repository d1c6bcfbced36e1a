use indexmap::IndexSet;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, PoisonError,
};

/// Change tracking the write path relies on.
///
/// `is_new` chooses between INSERT and UPDATE; `dirty_fields` restricts an
/// UPDATE to the members changed since the entity was loaded or last stored.
pub trait Tracked {
    fn is_new(&self) -> bool;

    /// Member names changed since the last load or store.
    fn dirty_fields(&self) -> Vec<String>;

    fn reset_dirty(&self);

    /// Called once the entity has been written.
    fn mark_persisted(&self) {
        self.reset_dirty();
    }
}

/// Per-entity change state, safe to read and mutate from several threads.
///
/// Entities embed one and mark fields from their setters.
#[derive(Debug)]
pub struct ChangeSet {
    dirty: Mutex<IndexSet<String>>,
    new: AtomicBool,
}

impl ChangeSet {
    /// State for an entity not yet stored.
    pub fn new() -> ChangeSet {
        ChangeSet {
            dirty: Mutex::new(IndexSet::new()),
            new: AtomicBool::new(true),
        }
    }

    /// State for an entity read from the database.
    pub fn loaded() -> ChangeSet {
        ChangeSet {
            dirty: Mutex::new(IndexSet::new()),
            new: AtomicBool::new(false),
        }
    }

    pub fn mark(&self, field: &str) {
        let mut dirty = self.dirty.lock().unwrap_or_else(PoisonError::into_inner);
        if !dirty.contains(field) {
            dirty.insert(field.to_string());
        }
    }

    pub fn is_dirty(&self, field: &str) -> bool {
        self.dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(field)
    }
}

impl Tracked for ChangeSet {
    fn is_new(&self) -> bool {
        self.new.load(Ordering::Acquire)
    }

    fn dirty_fields(&self) -> Vec<String> {
        self.dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    fn reset_dirty(&self) {
        self.dirty
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn mark_persisted(&self) {
        self.reset_dirty();
        self.new.store(false, Ordering::Release);
    }
}

impl Default for ChangeSet {
    fn default() -> Self {
        ChangeSet::new()
    }
}

impl Clone for ChangeSet {
    fn clone(&self) -> Self {
        ChangeSet {
            dirty: Mutex::new(
                self.dirty
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone(),
            ),
            new: AtomicBool::new(self.is_new()),
        }
    }
}
