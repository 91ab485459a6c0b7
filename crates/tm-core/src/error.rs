//! Framework error type.
//!
//! Every failure here is fatal for the document being read or written.  Sub-crates
//! wrap `CoreError` as one variant of their own error enum via `#[from]`.

use thiserror::Error;

use crate::EntityKind;

/// The top-level error type for `tm-core` and a common base for sub-crates.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("duplicate {kind} document id {id:?}")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("{referrer} references unknown {kind} {reference:?}")]
    UnresolvedReference {
        kind:      EntityKind,
        reference: String,
        referrer:  String,
    },

    #[error("{kind} without document id ({context})")]
    MissingId { kind: EntityKind, context: String },

    #[error("cannot default {kind}: {candidates} candidates, expected exactly one")]
    AmbiguousDefault { kind: EntityKind, candidates: usize },

    #[error("unknown coordinate reference system {0:?}")]
    UnknownCrs(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for all `tm-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
