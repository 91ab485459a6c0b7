//! Default injection for optional document collections.
//!
//! Documents may omit the mode, traveller type and user class lists.  An
//! omitted list means "exactly one implicit default entity", and defaulting
//! is only allowed when it is unambiguous.  Anything that depends on picking
//! one entity out of several must go through [`single_candidate`], which
//! fails instead of guessing.

use tracing::debug;

use crate::{CoreError, CoreResult, Entity};

/// Reserved document id given to injected default entities.
pub const DEFAULT_DOC_ID: &str = "default";

/// If `collection` is empty, push the single entity built by `factory` and
/// return `true`.  A non-empty collection is left alone.
pub fn inject_default_if_empty<E, F>(collection: &mut Vec<E>, factory: F) -> bool
where
    E: Entity,
    F: FnOnce() -> E,
{
    if !collection.is_empty() {
        return false;
    }
    let entity = factory();
    debug!(kind = %E::KIND, doc_id = entity.doc_id(), "injected default entity");
    collection.push(entity);
    true
}

/// The one entity in `candidates`.
///
/// # Errors
///
/// [`CoreError::AmbiguousDefault`] when there are zero or several candidates.
pub fn single_candidate<E: Entity>(candidates: &[E]) -> CoreResult<&E> {
    match candidates {
        [only] => Ok(only),
        _ => Err(CoreError::AmbiguousDefault {
            kind:       E::KIND,
            candidates: candidates.len(),
        }),
    }
}
