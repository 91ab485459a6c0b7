//! Identifier registry: document id → internal id, one registry per entity kind.
//!
//! A registry is owned by the reader that is parsing a layer.  Later layers do
//! not borrow an earlier layer's registry; they build their own and
//! [`seed_from`](IdRegistry::seed_from) the finished entity collections, which
//! copies `(key, id)` pairs once.  Mutating the upstream model afterwards does
//! not affect an already seeded registry.
//!
//! Keys are a projection of the entity chosen at construction time; the usual
//! projection is the document id ([`IdRegistry::by_doc_id`]).  Blank keys are
//! never registered.

use std::collections::hash_map::Entry;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::{CoreError, CoreResult, Entity, EntityKind};

/// Projection from an entity to the string it is indexed by.
pub type KeyFn<E> = fn(&E) -> &str;

pub struct IdRegistry<E: Entity> {
    key_fn: KeyFn<E>,
    by_key: FxHashMap<String, E::Id>,
}

impl<E: Entity> IdRegistry<E> {
    /// Registry keyed by an arbitrary projection of the entity.
    pub fn with_key(key_fn: KeyFn<E>) -> Self {
        Self { key_fn, by_key: FxHashMap::default() }
    }

    /// Registry keyed by document id.
    pub fn by_doc_id() -> Self {
        Self::with_key(E::doc_id)
    }

    pub fn kind(&self) -> EntityKind {
        E::KIND
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Index `entity` under its key.
    ///
    /// # Errors
    ///
    /// [`CoreError::DuplicateId`] if another entity already holds the same
    /// non-blank key.  The registry is left unchanged in that case.
    pub fn register(&mut self, entity: &E) -> CoreResult<()> {
        let key = (self.key_fn)(entity);
        if key.trim().is_empty() {
            return Ok(());
        }
        match self.by_key.entry(key.to_owned()) {
            Entry::Occupied(_) => Err(CoreError::DuplicateId {
                kind: E::KIND,
                id:   key.to_owned(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(entity.id());
                Ok(())
            }
        }
    }

    /// Bulk-register a finished collection, e.g. the network's nodes before
    /// a zoning document is parsed.
    pub fn seed_from<'a, I>(&mut self, entities: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        for entity in entities {
            self.register(entity)?;
        }
        Ok(())
    }

    /// Convenience: a fresh doc-id registry seeded from `entities`.
    pub fn seeded<'a, I>(entities: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        let mut registry = Self::by_doc_id();
        registry.seed_from(entities)?;
        Ok(registry)
    }

    pub fn get(&self, key: &str) -> Option<E::Id> {
        self.by_key.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Resolve a reference found in a document.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnresolvedReference`] naming `referrer` when `key` is not
    /// registered.
    pub fn resolve(&self, key: &str, referrer: impl fmt::Display) -> CoreResult<E::Id> {
        self.get(key).ok_or_else(|| CoreError::UnresolvedReference {
            kind:      E::KIND,
            reference: key.to_owned(),
            referrer:  referrer.to_string(),
        })
    }
}

impl<E: Entity> Default for IdRegistry<E> {
    fn default() -> Self {
        Self::by_doc_id()
    }
}

impl<E: Entity> fmt::Debug for IdRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdRegistry")
            .field("kind", &E::KIND)
            .field("len", &self.by_key.len())
            .finish()
    }
}
