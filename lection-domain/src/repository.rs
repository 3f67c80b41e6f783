//! Keyed lookup of entities.
//!
//! [`Repository`] is the capability services depend on.
//! [`InMemoryRepository`] is the implementation the application wires by
//! default; anything else that can find an entity by key fits the same seam.

use std::any::type_name;
use std::collections::HashMap;
use std::fmt::{self, Display};
use std::hash::Hash;

use lection_support::rendering::shorten_type_name;
use parking_lot::RwLock;
use tracing::trace;

use crate::error::{DomainError, DomainResult};

/// Finds entities of type `E` by keys of type `K`.
pub trait Repository<E, K>: Send + Sync {
    /// The entity stored under `id`.
    ///
    /// # Errors
    /// [`DomainError::NotFound`] when nothing is stored under `id`.
    fn find_one(&self, id: &K) -> DomainResult<E>;
}

/// Thread-safe map-backed repository. Lookups hand out clones.
pub struct InMemoryRepository<E, K> {
    entries: RwLock<HashMap<K, E>>,
}

impl<E, K> Default for InMemoryRepository<E, K> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<E, K: Hash + Eq> InMemoryRepository<E, K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository pre-filled with `entries`. Later duplicates win.
    pub fn with_entries(entries: impl IntoIterator<Item = (K, E)>) -> Self {
        Self {
            entries: RwLock::new(entries.into_iter().collect()),
        }
    }

    /// Stores `entity` under `id`, returning what was there before.
    pub fn insert(&self, id: K, entity: E) -> Option<E> {
        self.entries.write().insert(id, entity)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<E, K> Repository<E, K> for InMemoryRepository<E, K>
where
    E: Clone + Send + Sync,
    K: Hash + Eq + Display + Send + Sync,
{
    fn find_one(&self, id: &K) -> DomainResult<E> {
        trace!(entity = type_name::<E>(), %id, "Looking up entity");
        self.entries
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound {
                entity: shorten_type_name(type_name::<E>()),
                id: id.to_string(),
            })
    }
}

impl<E, K> fmt::Debug for InMemoryRepository<E, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("entity", &shorten_type_name(type_name::<E>()))
            .field("entries", &self.entries.read().len())
            .finish()
    }
}
