//! Network-layer error type.

use thiserror::Error;

use tm_core::{CoreError, LinkId, LinkSegmentTypeId, ModeId, NodeId};

use crate::Direction;

/// Errors produced by `tm-network`.
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("link {0} not found in network")]
    LinkNotFound(LinkId),

    #[error("mode {0} not found in network")]
    ModeNotFound(ModeId),

    #[error("link segment type {0} not found in network")]
    SegmentTypeNotFound(LinkSegmentTypeId),

    #[error("link {link:?} already has a {direction} segment")]
    DuplicateDirection { link: String, direction: Direction },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
