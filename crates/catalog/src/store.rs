//! Catalog storage abstraction.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;

use packstore_core::PackId;

use crate::pack::{PackDraft, SamplePack};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A writer panicked while holding the catalog lock.
    #[error("catalog lock poisoned")]
    Poisoned,
}

/// Sole authority over the pack collection and id assignment.
///
/// Reads hand out owned copies; callers never hold references into the store.
pub trait CatalogStore: Send + Sync {
    /// All packs in insertion order.
    fn list(&self) -> StoreResult<Vec<SamplePack>>;
    fn get(&self, id: PackId) -> StoreResult<Option<SamplePack>>;
    /// First pack with `featured == 1` in insertion order.
    fn featured(&self) -> StoreResult<Option<SamplePack>>;
    /// Assign the next id and store the pack.
    fn create(&self, draft: PackDraft) -> StoreResult<SamplePack>;
    /// Replace every field except the id. `None` if the pack does not exist.
    fn update(&self, id: PackId, draft: PackDraft) -> StoreResult<Option<SamplePack>>;
    /// Whether an entry was removed.
    fn delete(&self, id: PackId) -> StoreResult<bool>;
    fn len(&self) -> StoreResult<usize>;
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn list(&self) -> StoreResult<Vec<SamplePack>> {
        (**self).list()
    }

    fn get(&self, id: PackId) -> StoreResult<Option<SamplePack>> {
        (**self).get(id)
    }

    fn featured(&self) -> StoreResult<Option<SamplePack>> {
        (**self).featured()
    }

    fn create(&self, draft: PackDraft) -> StoreResult<SamplePack> {
        (**self).create(draft)
    }

    fn update(&self, id: PackId, draft: PackDraft) -> StoreResult<Option<SamplePack>> {
        (**self).update(id, draft)
    }

    fn delete(&self, id: PackId) -> StoreResult<bool> {
        (**self).delete(id)
    }

    fn len(&self) -> StoreResult<usize> {
        (**self).len()
    }
}

#[derive(Debug)]
struct Catalog {
    // Ids are handed out in increasing order, so key order is insertion order.
    packs: BTreeMap<PackId, SamplePack>,
    next_id: PackId,
}

/// Process-lifetime in-memory store.
///
/// The map and the id counter share one mutex so that assigning an id and
/// inserting under it happen as a single step.
#[derive(Debug)]
pub struct InMemoryCatalogStore {
    inner: Mutex<Catalog>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Catalog {
                packs: BTreeMap::new(),
                next_id: PackId::FIRST,
            }),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Catalog>> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn list(&self) -> StoreResult<Vec<SamplePack>> {
        Ok(self.lock()?.packs.values().cloned().collect())
    }

    fn get(&self, id: PackId) -> StoreResult<Option<SamplePack>> {
        Ok(self.lock()?.packs.get(&id).cloned())
    }

    fn featured(&self) -> StoreResult<Option<SamplePack>> {
        Ok(self.lock()?.packs.values().find(|p| p.is_featured()).cloned())
    }

    fn create(&self, draft: PackDraft) -> StoreResult<SamplePack> {
        let mut catalog = self.lock()?;
        let id = catalog.next_id;
        catalog.next_id = id.next();

        let pack = SamplePack::from_draft(id, draft);
        catalog.packs.insert(id, pack.clone());
        Ok(pack)
    }

    fn update(&self, id: PackId, draft: PackDraft) -> StoreResult<Option<SamplePack>> {
        let mut catalog = self.lock()?;
        Ok(catalog.packs.get_mut(&id).map(|slot| {
            *slot = SamplePack::from_draft(id, draft);
            slot.clone()
        }))
    }

    fn delete(&self, id: PackId) -> StoreResult<bool> {
        Ok(self.lock()?.packs.remove(&id).is_some())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.lock()?.packs.len())
    }
}
