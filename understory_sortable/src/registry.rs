// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling registry: which elements belong to which collection, and at what index.
//!
//! Entries are registered by the host as items mount and unregistered as they
//! unmount, at any time, including while a drag is in progress. The engine only
//! reads the registry to resolve drag targets and to walk siblings in index
//! order, and writes the cached edge offsets it measures.

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};

/// A single sortable element within a collection.
#[derive(Clone, Debug, PartialEq)]
pub struct SortableEntry<E> {
    /// Handle to the element.
    pub element: E,
    /// Logical position within the collection.
    ///
    /// This is independent of visual order while dragging; sibling displacement
    /// is applied as a transform, never by reordering elements.
    pub index: usize,
    /// Cached distance of the element's leading edge from the container origin.
    ///
    /// Filled lazily during a drag and cleared when the drag ends.
    pub edge_offset: Option<f64>,
}

/// The element a press resolved to, before or during a drag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveTarget<C> {
    /// Collection of the pressed element.
    pub collection: C,
    /// Logical index of the pressed element.
    pub index: usize,
}

/// Registry of sortable elements for one mounted container.
#[derive(Clone, Debug)]
pub struct SortableRegistry<E, C> {
    collections: HashMap<C, Vec<SortableEntry<E>>>,
    handles: HashSet<E>,
    active: Option<ActiveTarget<C>>,
}

impl<E, C> Default for SortableRegistry<E, C> {
    fn default() -> Self {
        Self {
            collections: HashMap::new(),
            handles: HashSet::new(),
            active: None,
        }
    }
}

impl<E: Clone + Eq + Hash, C: Clone + Eq + Hash> SortableRegistry<E, C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `element` to `collection` at logical `index`.
    pub fn register(&mut self, collection: C, element: E, index: usize) {
        self.collections
            .entry(collection)
            .or_default()
            .push(SortableEntry {
                element,
                index,
                edge_offset: None,
            });
    }

    /// Removes `element` from `collection`. Does nothing if it is not registered.
    ///
    /// Returns `true` if an entry was removed.
    pub fn unregister(&mut self, collection: &C, element: &E) -> bool {
        let Some(entries) = self.collections.get_mut(collection) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|e| e.element == *element) else {
            return false;
        };
        entries.remove(pos);
        if entries.is_empty() {
            self.collections.remove(collection);
        }
        true
    }

    /// Updates the logical index of a registered element.
    ///
    /// Returns `true` if the element was found.
    pub fn set_index(&mut self, collection: &C, element: &E, index: usize) -> bool {
        match self
            .collections
            .get_mut(collection)
            .and_then(|entries| entries.iter_mut().find(|e| e.element == *element))
        {
            Some(entry) => {
                entry.index = index;
                true
            }
            None => false,
        }
    }

    /// Number of entries in `collection`.
    #[must_use]
    pub fn len(&self, collection: &C) -> usize {
        self.collections.get(collection).map_or(0, Vec::len)
    }

    /// Returns `true` if `collection` has no entries.
    #[must_use]
    pub fn is_empty(&self, collection: &C) -> bool {
        self.len(collection) == 0
    }

    /// Returns the collection and index `element` is registered under.
    pub fn info_of(&self, element: &E) -> Option<(C, usize)> {
        self.collections.iter().find_map(|(collection, entries)| {
            entries
                .iter()
                .find(|e| e.element == *element)
                .map(|e| (collection.clone(), e.index))
        })
    }

    /// Entries of a collection sorted by logical index.
    ///
    /// With `None`, the active collection is used; if nothing is active the
    /// result is empty. The sort is stable, so entries sharing an index keep
    /// their registration order.
    pub fn ordered_entries(&self, collection: Option<&C>) -> Vec<&SortableEntry<E>> {
        let mut entries: Vec<_> = self
            .entries_of(collection)
            .map(|list| list.iter().collect())
            .unwrap_or_default();
        entries.sort_by_key(|e| e.index);
        entries
    }

    /// Mutable variant of [`SortableRegistry::ordered_entries`].
    pub fn ordered_entries_mut(&mut self, collection: Option<&C>) -> Vec<&mut SortableEntry<E>> {
        let key = match collection {
            Some(c) => c.clone(),
            None => match &self.active {
                Some(active) => active.collection.clone(),
                None => return Vec::new(),
            },
        };
        let mut entries: Vec<_> = self
            .collections
            .get_mut(&key)
            .map(|list| list.iter_mut().collect())
            .unwrap_or_default();
        entries.sort_by_key(|e| e.index);
        entries
    }

    /// Finds the entry with logical `index` in `collection`.
    pub fn entry_at_index(&self, collection: &C, index: usize) -> Option<&SortableEntry<E>> {
        self.collections
            .get(collection)?
            .iter()
            .find(|e| e.index == index)
    }

    /// Forgets every cached edge offset in `collection`.
    pub fn clear_collection_cache(&mut self, collection: &C) {
        if let Some(entries) = self.collections.get_mut(collection) {
            for entry in entries {
                entry.edge_offset = None;
            }
        }
    }

    /// Marks `element` as a drag handle.
    pub fn register_handle(&mut self, element: E) {
        self.handles.insert(element);
    }

    /// Removes a drag handle mark.
    pub fn unregister_handle(&mut self, element: &E) -> bool {
        self.handles.remove(element)
    }

    /// Returns `true` if `element` is marked as a drag handle.
    #[must_use]
    pub fn is_handle(&self, element: &E) -> bool {
        self.handles.contains(element)
    }

    /// Sets the active target.
    pub fn set_active(&mut self, active: ActiveTarget<C>) {
        self.active = Some(active);
    }

    /// Returns the active target, if any.
    #[must_use]
    pub fn active(&self) -> Option<&ActiveTarget<C>> {
        self.active.as_ref()
    }

    /// Clears the active target.
    pub fn clear_active(&mut self) {
        self.active = None;
    }

    /// The entry currently targeted by [`SortableRegistry::active`].
    pub fn active_entry(&self) -> Option<&SortableEntry<E>> {
        let active = self.active.as_ref()?;
        self.entry_at_index(&active.collection, active.index)
    }

    fn entries_of(&self, collection: Option<&C>) -> Option<&Vec<SortableEntry<E>>> {
        let key = match collection {
            Some(c) => c,
            None => &self.active.as_ref()?.collection,
        };
        self.collections.get(key)
    }
}
