//! Insertion-ordered extension registries.

use indexmap::IndexMap;
use mpext_core::{ExtRegistry, PackerEntry, RegistryEntry, Traced, UnpackerEntry};
use std::{any::Any, fmt};

/// An [`ExtRegistry`] backed by an insertion-ordered map.
///
/// Re-registering a key replaces its entry in place, so iteration order is
/// the order in which keys were first registered.
pub struct IndexedRegistry<E: RegistryEntry> {
    entries: IndexMap<E::Key, E>,
}

/// Encode-side registry, keyed by type.
pub type PackerExtRegistry = IndexedRegistry<PackerEntry>;

/// Decode-side registry, keyed by extension code.
pub type UnpackerExtRegistry = IndexedRegistry<UnpackerEntry>;

impl<E: RegistryEntry> IndexedRegistry<E> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Iterate over entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.values()
    }

    /// True when `key` has an entry.
    pub fn contains_key(&self, key: &E::Key) -> bool {
        self.entries.contains_key(key)
    }
}

impl PackerExtRegistry {
    /// Find the entry for the exact runtime type of `value`.
    pub fn lookup(&self, value: &dyn Any) -> Option<&PackerEntry> {
        self.entries.get(&Any::type_id(value))
    }
}

impl<E: RegistryEntry> ExtRegistry for IndexedRegistry<E> {
    type Entry = E;

    fn put(&mut self, entry: E) -> Option<E> {
        self.entries.insert(entry.key(), entry)
    }

    fn get(&self, key: &E::Key) -> Option<&E> {
        self.entries.get(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn trace<'a>(&'a self, tracer: &mut dyn FnMut(Traced<'a>)) {
        for entry in self.entries.values() {
            entry.trace(tracer);
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<E: RegistryEntry> Default for IndexedRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: RegistryEntry> Clone for IndexedRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<E> fmt::Debug for IndexedRegistry<E>
where
    E: RegistryEntry + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.values()).finish()
    }
}
