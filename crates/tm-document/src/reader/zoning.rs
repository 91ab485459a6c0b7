//! Zoning document reader.

use rustc_hash::FxHashSet;
use tracing::info;

use tm_core::{Entity, EntityKind, IdRegistry, LinkSegmentId, Mode, ModeId, NodeId};
use tm_network::{LinkSegment, MacroscopicNetwork, Node};
use tm_zoning::{
    AccessZone, Connectoid, TransferGroup, TransferZone, TransferZoneType, Zone, Zoning,
    ZoningBuilder,
};

use super::{backfill_id, explicit_ids, optional_id, point, referrer, required_id};
use crate::document::{AccessZoneDocument, ConnectoidDocument, TransferZoneTypeDocument, ZoningDocument};
use crate::DocumentResult;

/// Reads a [`ZoningDocument`] on top of an already read network.
///
/// ```rust,ignore
/// let reader = ZoningReader::seeded(&network)?;
/// let zoning = reader.read(&network, &zoning_doc)?;
/// ```
#[derive(Debug, Default)]
pub struct ZoningReader {
    // Seeded from the network.
    modes:           IdRegistry<Mode>,
    nodes:           IdRegistry<Node>,
    segments:        IdRegistry<LinkSegment>,
    // Owned by this layer.
    zones:           IdRegistry<Zone>,
    transfer_zones:  IdRegistry<TransferZone>,
    connectoids:     IdRegistry<Connectoid>,
    transfer_groups: IdRegistry<TransferGroup>,
}

impl ZoningReader {
    /// A reader whose node, link segment and mode registries hold the
    /// current document ids of `network`.
    pub fn seeded(network: &MacroscopicNetwork) -> DocumentResult<Self> {
        Ok(Self {
            modes: IdRegistry::seeded(&network.modes)?,
            nodes: IdRegistry::seeded(&network.nodes)?,
            segments: IdRegistry::seeded(&network.link_segments)?,
            ..Self::default()
        })
    }

    pub fn read(mut self, network: &MacroscopicNetwork, doc: &ZoningDocument) -> DocumentResult<Zoning> {
        let mut builder = ZoningBuilder::new(network);

        for (i, zone) in doc.zones.iter().enumerate() {
            let doc_id = required_id(zone.id.as_deref(), EntityKind::Zone, i + 1)?;
            let id = builder.add_zone(doc_id, point(zone.centroid));
            let entry = builder.zone_mut(id)?;
            entry.external_id = zone.external_id.clone();
            entry.name = zone.name.clone();
            self.zones.register(&builder.zones()[id.index()])?;
        }

        for (i, zone) in doc.transfer_zones.iter().enumerate() {
            let doc_id = required_id(zone.id.as_deref(), EntityKind::TransferZone, i + 1)?;
            let transfer_type = match zone.transfer_type {
                TransferZoneTypeDocument::None => TransferZoneType::None,
                TransferZoneTypeDocument::Platform => TransferZoneType::Platform,
                TransferZoneTypeDocument::StopPole => TransferZoneType::StopPole,
            };
            let id = builder.add_transfer_zone(doc_id, point(zone.centroid), transfer_type);
            let entry = builder.transfer_zone_mut(id)?;
            entry.external_id = zone.external_id.clone();
            entry.name = zone.name.clone();
            self.transfer_zones.register(&builder.transfer_zones()[id.index()])?;
        }

        let explicit = explicit_ids(doc.connectoids.iter().map(ConnectoidDocument::id));
        for (i, connectoid) in doc.connectoids.iter().enumerate() {
            self.read_connectoid(&mut builder, connectoid, i + 1, &explicit)?;
        }

        let explicit = explicit_ids(doc.transfer_groups.iter().map(|g| g.id.as_deref()));
        for (i, group) in doc.transfer_groups.iter().enumerate() {
            let group_referrer = referrer(EntityKind::TransferGroup, group.id.as_deref(), i + 1);
            let zones = group
                .transfer_zone_refs
                .iter()
                .map(|r| self.transfer_zones.resolve(r, &group_referrer))
                .collect::<Result<Vec<_>, _>>()?;
            let id = builder.add_transfer_group(optional_id(group.id.as_deref()).unwrap_or_default(), zones)?;
            if let Some(entry) = builder.transfer_group_mut(id) {
                if entry.doc_id.is_empty() {
                    entry.doc_id = backfill_id(entry.internal_id(), &explicit, &self.transfer_groups);
                }
                entry.external_id = group.external_id.clone();
                entry.name = group.name.clone();
                self.transfer_groups.register(entry)?;
            }
        }

        let zoning = builder.build();
        info!(
            zones = zoning.zones.len(),
            transfer_zones = zoning.transfer_zones.len(),
            connectoids = zoning.connectoids.len(),
            transfer_groups = zoning.transfer_groups.len(),
            "read zoning layer"
        );
        Ok(zoning)
    }

    fn read_connectoid(
        &mut self,
        builder: &mut ZoningBuilder<'_>,
        doc: &ConnectoidDocument,
        position: usize,
        explicit: &FxHashSet<String>,
    ) -> DocumentResult<()> {
        let connectoid_referrer = referrer(EntityKind::Connectoid, doc.id(), position);
        let doc_id = optional_id(doc.id()).unwrap_or_default();

        let (id, external_id, name) = match doc {
            ConnectoidDocument::Node(c) => {
                let node: NodeId = self.nodes.resolve(&c.node_ref, &connectoid_referrer)?;
                let zones = c
                    .access_zones
                    .iter()
                    .map(|a| self.access_zone(&self.zones, a, &connectoid_referrer))
                    .collect::<DocumentResult<Vec<_>>>()?;
                (builder.add_od_connectoid(doc_id, node, zones)?, &c.external_id, &c.name)
            }
            ConnectoidDocument::LinkSegment(c) => {
                let segment: LinkSegmentId = self.segments.resolve(&c.link_segment_ref, &connectoid_referrer)?;
                let zones = c
                    .access_zones
                    .iter()
                    .map(|a| self.access_zone(&self.transfer_zones, a, &connectoid_referrer))
                    .collect::<DocumentResult<Vec<_>>>()?;
                (builder.add_transfer_connectoid(doc_id, segment, zones)?, &c.external_id, &c.name)
            }
        };

        if let Some(entry) = builder.connectoid_mut(id) {
            if entry.doc_id.is_empty() {
                entry.doc_id = backfill_id(entry.internal_id(), explicit, &self.connectoids);
            }
            entry.external_id = external_id.clone();
            entry.name = name.clone();
            self.connectoids.register(entry)?;
        }
        Ok(())
    }

    fn access_zone<Z: Entity>(
        &self,
        zones: &IdRegistry<Z>,
        doc: &AccessZoneDocument,
        connectoid: &str,
    ) -> DocumentResult<AccessZone<Z::Id>> {
        let allowed_modes = match &doc.mode_refs {
            Some(refs) => Some(
                refs.iter()
                    .map(|r| self.modes.resolve(r, connectoid))
                    .collect::<Result<Vec<ModeId>, _>>()?,
            ),
            None => None,
        };
        Ok(AccessZone {
            zone: zones.resolve(&doc.zone_ref, connectoid)?,
            length_km: doc.length_km,
            allowed_modes,
        })
    }
}
