use thiserror::Error;

use tm_core::{CoreError, LinkSegmentId, ModeId, NodeId, TransferZoneId, ZoneId};

#[derive(Debug, Error, PartialEq)]
pub enum ZoningError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("zone {0} not found in zoning")]
    ZoneNotFound(ZoneId),

    #[error("transfer zone {0} not found in zoning")]
    TransferZoneNotFound(TransferZoneId),

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("link segment {0} not found in network")]
    LinkSegmentNotFound(LinkSegmentId),

    #[error("mode {0} not found in network")]
    ModeNotFound(ModeId),

    #[error("connectoid {0:?} has no access zones")]
    NoAccessZones(String),
}

pub type ZoningResult<T> = Result<T, ZoningError>;
