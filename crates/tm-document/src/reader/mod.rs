//! Layer readers.
//!
//! Each reader owns the registries of one parse session.  Registries for
//! entities of an earlier layer are seeded from that layer's finished model,
//! so a reader never holds on to the upstream model between seeding and
//! reading.

pub mod demand;
pub mod network;
pub mod project;
pub mod zoning;

pub use demand::DemandReader;
pub use network::NetworkReader;
pub use project::{Project, ProjectReader};
pub use zoning::ZoningReader;

use std::fmt;

use rustc_hash::FxHashSet;

use tm_core::{CoreError, CoreResult, Entity, EntityKind, GeoPoint, IdRegistry};

/// The document id of an entity other documents refer to.
///
/// `position` is the entity's 1-based index within its collection.
fn required_id(id: Option<&str>, kind: EntityKind, position: usize) -> CoreResult<String> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(id.to_owned()),
        _ => Err(CoreError::MissingId {
            kind,
            context: format!("{kind} #{position}"),
        }),
    }
}

/// The document id of an entity nothing refers to, or `None` to back-fill it
/// from the internal id once one is allocated.
fn optional_id(id: Option<&str>) -> Option<String> {
    id.map(str::trim).filter(|id| !id.is_empty()).map(str::to_owned)
}

/// The explicit document ids of one collection.
fn explicit_ids<'a, I>(ids: I) -> FxHashSet<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    ids.into_iter().filter_map(optional_id).collect()
}

/// A document id for an entity that has none: its internal id, or
/// `<internal>_<n>` with the smallest `n` that neither `explicit` nor
/// `registry` already holds.
fn backfill_id<E: Entity>(
    internal: impl fmt::Display,
    explicit: &FxHashSet<String>,
    registry: &IdRegistry<E>,
) -> String {
    let taken = |id: &str| explicit.contains(id) || registry.contains(id);
    let base = internal.to_string();
    if !taken(&base) {
        return base;
    }
    let mut n = 1usize;
    loop {
        let id = format!("{base}_{n}");
        if !taken(&id) {
            return id;
        }
        n += 1;
    }
}

fn point(xy: Option<[f64; 2]>) -> Option<GeoPoint> {
    xy.map(|[x, y]| GeoPoint::new(x, y))
}

/// How an entity is named in error messages: its document id if it has one,
/// else its position.
fn referrer(kind: EntityKind, id: Option<&str>, position: usize) -> String {
    match optional_id(id) {
        Some(id) => format!("{kind} {id:?}"),
        None => format!("{kind} #{position}"),
    }
}
