//! The zoning layer and its builder.
//!
//! Zoning is built against a finished [`MacroscopicNetwork`]: every node,
//! link segment and mode a connectoid refers to is checked when the
//! connectoid is added, never later.

use tm_core::{
    ConnectoidId, GeoPoint, LinkSegmentId, NodeId, SyncDocIds, TransferGroupId, TransferZoneId,
    ZoneId, sync_doc_ids,
};
use tm_network::MacroscopicNetwork;

use crate::{
    AccessZone, Connectoid, ConnectoidAccess, TransferGroup, TransferZone, TransferZoneType, Zone,
    ZoningError, ZoningResult,
};

// ── Zoning ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Zoning {
    /// OD zones.  `ZoneId` is also the zone's row/column in OD matrices.
    pub zones:           Vec<Zone>,
    pub transfer_zones:  Vec<TransferZone>,
    pub connectoids:     Vec<Connectoid>,
    pub transfer_groups: Vec<TransferGroup>,
}

impl Zoning {
    pub fn zone(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }

    pub fn transfer_zone(&self, id: TransferZoneId) -> &TransferZone {
        &self.transfer_zones[id.index()]
    }

    pub fn od_zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Node-based connectoids serving `zone`.
    pub fn connectoids_of(&self, zone: ZoneId) -> impl Iterator<Item = &Connectoid> + '_ {
        self.connectoids.iter().filter(move |c| match &c.access {
            ConnectoidAccess::NodeBased { zones, .. } => zones.iter().any(|a| a.zone == zone),
            ConnectoidAccess::LinkSegmentBased { .. } => false,
        })
    }

    /// Link-segment-based connectoids serving transfer zone `zone`.
    pub fn transfer_connectoids_of(&self, zone: TransferZoneId) -> impl Iterator<Item = &Connectoid> + '_ {
        self.connectoids.iter().filter(move |c| match &c.access {
            ConnectoidAccess::LinkSegmentBased { zones, .. } => zones.iter().any(|a| a.zone == zone),
            ConnectoidAccess::NodeBased { .. } => false,
        })
    }
}

impl SyncDocIds for Zoning {
    fn sync_doc_ids(&mut self) -> usize {
        sync_doc_ids(&mut self.zones)
            + sync_doc_ids(&mut self.transfer_zones)
            + sync_doc_ids(&mut self.connectoids)
            + sync_doc_ids(&mut self.transfer_groups)
    }
}

// ── ZoningBuilder ─────────────────────────────────────────────────────────────

/// Incrementally construct a [`Zoning`] on top of `network`.
pub struct ZoningBuilder<'n> {
    network: &'n MacroscopicNetwork,
    zoning:  Zoning,
}

impl<'n> ZoningBuilder<'n> {
    pub fn new(network: &'n MacroscopicNetwork) -> Self {
        Self { network, zoning: Zoning::default() }
    }

    pub fn network(&self) -> &'n MacroscopicNetwork {
        self.network
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zoning.zones
    }

    pub fn transfer_zones(&self) -> &[TransferZone] {
        &self.zoning.transfer_zones
    }

    pub fn add_zone(&mut self, doc_id: impl Into<String>, centroid: Option<GeoPoint>) -> ZoneId {
        let id = ZoneId(self.zoning.zones.len() as u32);
        self.zoning.zones.push(Zone {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: None,
            centroid,
        });
        id
    }

    pub fn zone_mut(&mut self, id: ZoneId) -> ZoningResult<&mut Zone> {
        self.zoning.zones.get_mut(id.index()).ok_or(ZoningError::ZoneNotFound(id))
    }

    pub fn add_transfer_zone(
        &mut self,
        doc_id: impl Into<String>,
        centroid: Option<GeoPoint>,
        transfer_type: TransferZoneType,
    ) -> TransferZoneId {
        let id = TransferZoneId(self.zoning.transfer_zones.len() as u32);
        self.zoning.transfer_zones.push(TransferZone {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: None,
            centroid,
            transfer_type,
        });
        id
    }

    pub fn transfer_zone_mut(&mut self, id: TransferZoneId) -> ZoningResult<&mut TransferZone> {
        self.zoning
            .transfer_zones
            .get_mut(id.index())
            .ok_or(ZoningError::TransferZoneNotFound(id))
    }

    /// Add a connectoid at `node` serving OD zones.
    ///
    /// Access zones without a length get the CRS distance from the zone
    /// centroid to `node`, when both positions are known.
    pub fn add_od_connectoid(
        &mut self,
        doc_id: impl Into<String>,
        node: NodeId,
        mut zones: Vec<AccessZone<ZoneId>>,
    ) -> ZoningResult<ConnectoidId> {
        let doc_id = doc_id.into();
        let node_pos = self
            .network
            .nodes
            .get(node.index())
            .ok_or(ZoningError::NodeNotFound(node))?
            .position;
        for access in &mut zones {
            let zone = self.zoning.zones.get(access.zone.index()).ok_or(ZoningError::ZoneNotFound(access.zone))?;
            self.check_modes(access)?;
            if access.length_km.is_none() {
                access.length_km = self.distance_km(zone.centroid, node_pos);
            }
        }
        self.push_connectoid(doc_id, ConnectoidAccess::NodeBased { node, zones })
    }

    /// Add a connectoid on link segment `segment` serving transfer zones.
    ///
    /// Derived lengths are measured to the segment's downstream node.
    pub fn add_transfer_connectoid(
        &mut self,
        doc_id: impl Into<String>,
        segment: LinkSegmentId,
        mut zones: Vec<AccessZone<TransferZoneId>>,
    ) -> ZoningResult<ConnectoidId> {
        let doc_id = doc_id.into();
        let downstream = self
            .network
            .link_segments
            .get(segment.index())
            .ok_or(ZoningError::LinkSegmentNotFound(segment))?
            .downstream;
        let node_pos = self.network.node(downstream).position;
        for access in &mut zones {
            let zone = self
                .zoning
                .transfer_zones
                .get(access.zone.index())
                .ok_or(ZoningError::TransferZoneNotFound(access.zone))?;
            self.check_modes(access)?;
            if access.length_km.is_none() {
                access.length_km = self.distance_km(zone.centroid, node_pos);
            }
        }
        self.push_connectoid(doc_id, ConnectoidAccess::LinkSegmentBased { segment, zones })
    }

    pub fn connectoid_mut(&mut self, id: ConnectoidId) -> Option<&mut Connectoid> {
        self.zoning.connectoids.get_mut(id.index())
    }

    pub fn add_transfer_group(
        &mut self,
        doc_id: impl Into<String>,
        zones: Vec<TransferZoneId>,
    ) -> ZoningResult<TransferGroupId> {
        if let Some(&bad) = zones.iter().find(|z| z.index() >= self.zoning.transfer_zones.len()) {
            return Err(ZoningError::TransferZoneNotFound(bad));
        }
        let id = TransferGroupId(self.zoning.transfer_groups.len() as u32);
        self.zoning.transfer_groups.push(TransferGroup {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: None,
            zones,
        });
        Ok(id)
    }

    pub fn transfer_group_mut(&mut self, id: TransferGroupId) -> Option<&mut TransferGroup> {
        self.zoning.transfer_groups.get_mut(id.index())
    }

    pub fn build(self) -> Zoning {
        self.zoning
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn push_connectoid(&mut self, doc_id: String, access: ConnectoidAccess) -> ZoningResult<ConnectoidId> {
        if access.zone_count() == 0 {
            return Err(ZoningError::NoAccessZones(doc_id));
        }
        let id = ConnectoidId(self.zoning.connectoids.len() as u32);
        self.zoning.connectoids.push(Connectoid {
            id,
            doc_id,
            external_id: None,
            name: None,
            access,
        });
        Ok(id)
    }

    fn check_modes<Z>(&self, access: &AccessZone<Z>) -> ZoningResult<()> {
        let mode_count = self.network.modes.len();
        match access.allowed_modes.iter().flatten().find(|m| m.index() >= mode_count) {
            Some(&bad) => Err(ZoningError::ModeNotFound(bad)),
            None => Ok(()),
        }
    }

    fn distance_km(&self, a: Option<GeoPoint>, b: Option<GeoPoint>) -> Option<f64> {
        Some(self.network.crs.distance_km(a?, b?))
    }
}
