//! Identifier synchronisation: overwrite document ids with internal ids.
//!
//! Internal ids are dense and unique per kind, so after synchronising, any
//! entity created later (whose internal id is the next free index) cannot
//! collide with a surviving document id.

use crate::Entity;

/// Rewrite the document id of every entity in `entities` to the decimal form
/// of its internal id.  Returns how many ids actually changed.
pub fn sync_doc_ids<E: Entity>(entities: &mut [E]) -> usize {
    let mut changed = 0;
    for entity in entities.iter_mut() {
        let internal = entity.internal_id().to_string();
        if entity.doc_id() != internal {
            entity.set_doc_id(internal);
            changed += 1;
        }
    }
    changed
}

/// A model root whose registered entities can all be synchronised at once.
pub trait SyncDocIds {
    /// Synchronise every entity reachable from `self`; returns the number of
    /// rewritten ids.
    fn sync_doc_ids(&mut self) -> usize;
}
