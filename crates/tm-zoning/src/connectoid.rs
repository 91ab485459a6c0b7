//! Connectoids: where a zone touches the network.
//!
//! A connectoid is either bound to a node (OD connectoids, accessing OD zones)
//! or to a link segment (transfer connectoids, accessing transfer zones).  One
//! connectoid may serve several zones and a zone may be served by several
//! connectoids; each pairing has its own length and mode restriction.

use tm_core::{ConnectoidId, EntityKind, LinkSegmentId, ModeId, NodeId, impl_entity};

/// One zone served by a connectoid.
#[derive(Clone, Debug, PartialEq)]
pub struct AccessZone<Z> {
    pub zone:          Z,
    /// Access length in km.  `None` if the document gave none and it could
    /// not be derived from geometry.
    pub length_km:     Option<f64>,
    /// Modes allowed to use this access; `None` allows every mode.
    pub allowed_modes: Option<Vec<ModeId>>,
}

impl<Z> AccessZone<Z> {
    pub fn new(zone: Z) -> Self {
        Self { zone, length_km: None, allowed_modes: None }
    }

    pub fn allows(&self, mode: ModeId) -> bool {
        self.allowed_modes.as_ref().is_none_or(|modes| modes.contains(&mode))
    }
}

/// What a connectoid is attached to, and which zones it serves.
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectoidAccess {
    NodeBased {
        node:  NodeId,
        zones: Vec<AccessZone<tm_core::ZoneId>>,
    },
    LinkSegmentBased {
        segment: LinkSegmentId,
        zones:   Vec<AccessZone<tm_core::TransferZoneId>>,
    },
}

impl ConnectoidAccess {
    pub fn zone_count(&self) -> usize {
        match self {
            ConnectoidAccess::NodeBased { zones, .. } => zones.len(),
            ConnectoidAccess::LinkSegmentBased { zones, .. } => zones.len(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connectoid {
    pub id:          ConnectoidId,
    pub doc_id:      String,
    pub external_id: Option<String>,
    pub name:        Option<String>,
    pub access:      ConnectoidAccess,
}

impl_entity!(Connectoid, ConnectoidId, EntityKind::Connectoid);

impl Connectoid {
    pub fn is_node_based(&self) -> bool {
        matches!(self.access, ConnectoidAccess::NodeBased { .. })
    }
}
