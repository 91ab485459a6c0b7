//! The document tree.
//!
//! Plain serde structs mirroring the on-disk schema of the three layer
//! documents.  They carry no behaviour: readers turn them into domain models
//! and writers build them back from one.
//!
//! Cross-references are document-id strings and always end in `_ref` /
//! `_refs`.  Optional collections may be omitted entirely.

pub mod demand;
pub mod network;
pub mod zoning;

pub use demand::{
    DemandDocument, MatrixDocument, OdCellDocument, OdMatrixDocument, OdRowDocument,
    TimePeriodDocument, TravellerTypeDocument, UserClassDocument,
};
pub use network::{
    DirectionDocument, LinkDocument, LinkSegmentDocument, LinkSegmentTypeDocument,
    ModeAccessDocument, ModeDocument, NetworkDocument, NodeDocument,
};
pub use zoning::{
    AccessZoneDocument, ConnectoidDocument, LinkSegmentConnectoidDocument, NodeConnectoidDocument,
    TransferGroupDocument, TransferZoneDocument, TransferZoneTypeDocument, ZoneDocument,
    ZoningDocument,
};
