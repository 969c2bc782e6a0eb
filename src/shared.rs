//! A cheaply cloneable, thread-safe handle onto an [`Index`] for services
//! that build the dictionary once and then serve concurrent read-only lookups.
//!
//! Grounded on the teacher's `parking_lot::Mutex`-guarded shared state,
//! widened to an `RwLock` since lookups vastly outnumber dictionary
//! mutations in the expected deployment (a loaded dictionary served to many
//! readers, occasionally updated).

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::index::Index;

/// `Arc<RwLock<Index>>` behind a named type, so call sites read as domain
/// operations rather than lock plumbing.
#[derive(Clone)]
pub struct SharedIndex(Arc<RwLock<Index>>);

impl SharedIndex {
    pub fn new(index: Index) -> Self {
        Self(Arc::new(RwLock::new(index)))
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Index> {
        self.0.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Index> {
        self.0.write()
    }

    /// Returns a read guard, documenting at the call site that no further
    /// writes are expected past this point (loading is done, lookups begin).
    /// Does not actually prevent later `write()` calls on other handles.
    pub fn freeze(&self) -> RwLockReadGuard<'_, Index> {
        self.0.read()
    }

    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SymSpellConfig;

    #[test]
    fn clones_share_the_same_index() {
        let shared = SharedIndex::new(Index::new(SymSpellConfig::default()).unwrap());
        let handle = shared.clone();
        handle.write().create_dictionary_entry("pawn", 5);
        assert_eq!(shared.read().count_of("pawn"), Some(5));
    }
}
