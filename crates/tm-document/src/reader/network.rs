//! Network document reader.
//!
//! Resolution order inside the document:
//!
//! 1. modes (the default mode is injected when none are listed)
//! 2. link segment types, all of them, before any segment looks one up
//! 3. nodes
//! 4. links and their nested segments

use tracing::{debug, info, warn};

use tm_core::defaults::DEFAULT_DOC_ID;
use tm_core::{
    Crs, Entity, EntityKind, IdRegistry, LinkSegmentTypeId, Mode, ModeId, PredefinedModeType,
    single_candidate,
};
use tm_network::{
    Direction, Link, LinkSegment, LinkSegmentType, MacroscopicNetwork, ModeAccess,
    NetworkBuilder, Node,
};

use super::{backfill_id, explicit_ids, optional_id, point, referrer, required_id};
use crate::document::{DirectionDocument, LinkSegmentTypeDocument, ModeDocument, NetworkDocument};
use crate::DocumentResult;

/// Reads a [`NetworkDocument`] into a [`MacroscopicNetwork`].
#[derive(Debug, Default)]
pub struct NetworkReader {
    modes:         IdRegistry<Mode>,
    segment_types: IdRegistry<LinkSegmentType>,
    nodes:         IdRegistry<Node>,
    links:         IdRegistry<Link>,
    segments:      IdRegistry<LinkSegment>,
}

impl NetworkReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(mut self, doc: &NetworkDocument) -> DocumentResult<MacroscopicNetwork> {
        let crs = match &doc.crs {
            Some(name) => Crs::resolve(name)?,
            None => Crs::default(),
        };
        let mut builder = NetworkBuilder::new(crs);

        self.read_modes(&mut builder, &doc.modes)?;
        self.read_segment_types(&mut builder, doc)?;
        self.read_nodes(&mut builder, doc)?;
        self.read_links(&mut builder, doc)?;

        let network = builder.build();
        info!(
            crs = network.crs.as_str(),
            modes = network.modes.len(),
            nodes = network.nodes.len(),
            links = network.links.len(),
            link_segments = network.link_segments.len(),
            link_segment_types = network.link_segment_types.len(),
            "read network layer"
        );
        Ok(network)
    }

    fn read_modes(&mut self, builder: &mut NetworkBuilder, docs: &[ModeDocument]) -> DocumentResult<()> {
        for (i, doc) in docs.iter().enumerate() {
            let doc_id = required_id(doc.id.as_deref(), EntityKind::Mode, i + 1)?;
            let kind = doc.predefined.unwrap_or(PredefinedModeType::Custom);
            let mut mode = Mode::predefined(ModeId::INVALID, doc_id, kind);
            mode.external_id = doc.external_id.clone();
            if let Some(name) = &doc.name {
                mode.name = name.clone();
            }
            if let Some(pcu) = doc.pcu {
                mode.pcu = pcu;
            }
            if let Some(speed) = doc.max_speed_kmh {
                mode.max_speed_kmh = speed;
            }
            let id = builder.add_mode(mode);
            self.modes.register(&builder.modes()[id.index()])?;
        }
        if builder.inject_default_mode() {
            self.modes.seed_from(builder.modes())?;
        }
        Ok(())
    }

    fn read_segment_types(&mut self, builder: &mut NetworkBuilder, doc: &NetworkDocument) -> DocumentResult<()> {
        for (i, ty) in doc.link_segment_types.iter().enumerate() {
            let doc_id = required_id(ty.id.as_deref(), EntityKind::LinkSegmentType, i + 1)?;
            let access = self.mode_access(builder, ty, &doc_id)?;
            let name = match &ty.name {
                Some(name) => name.clone(),
                None => {
                    warn!(link_segment_type = %doc_id, "link segment type has no name, using its id");
                    doc_id.clone()
                }
            };
            let id = builder.add_link_segment_type(
                doc_id,
                name,
                ty.capacity_pcu_h_lane,
                ty.max_density_pcu_km_lane,
                access,
            );
            builder.link_segment_type_mut(id)?.external_id = ty.external_id.clone();
            self.segment_types.register(&builder.link_segment_types()[id.index()])?;
        }

        let untyped = doc.links.iter().flat_map(|l| &l.segments).any(|s| s.type_ref.is_none());
        if untyped && builder.link_segment_types().is_empty() {
            let id = builder.add_link_segment_type(DEFAULT_DOC_ID, DEFAULT_DOC_ID, None, None, Vec::new());
            self.segment_types.register(&builder.link_segment_types()[id.index()])?;
            debug!("injected default link segment type");
        }
        Ok(())
    }

    fn mode_access(
        &self,
        builder: &NetworkBuilder,
        ty: &LinkSegmentTypeDocument,
        type_id: &str,
    ) -> DocumentResult<Vec<ModeAccess>> {
        let referrer = format!("{} {type_id:?}", EntityKind::LinkSegmentType);
        ty.access
            .iter()
            .map(|row| -> DocumentResult<ModeAccess> {
                let mode = self.modes.resolve(&row.mode_ref, &referrer)?;
                Ok(ModeAccess {
                    mode,
                    max_speed_kmh: row
                        .max_speed_kmh
                        .unwrap_or(builder.modes()[mode.index()].max_speed_kmh),
                    critical_speed_kmh: row.critical_speed_kmh,
                })
            })
            .collect()
    }

    fn read_nodes(&mut self, builder: &mut NetworkBuilder, doc: &NetworkDocument) -> DocumentResult<()> {
        for (i, node) in doc.nodes.iter().enumerate() {
            let doc_id = required_id(node.id.as_deref(), EntityKind::Node, i + 1)?;
            let id = builder.add_node(doc_id, point(node.point));
            let entry = builder.node_mut(id)?;
            entry.external_id = node.external_id.clone();
            entry.name = node.name.clone();
            self.nodes.register(&builder.nodes()[id.index()])?;
        }
        Ok(())
    }

    fn read_links(&mut self, builder: &mut NetworkBuilder, doc: &NetworkDocument) -> DocumentResult<()> {
        let explicit = explicit_ids(doc.links.iter().map(|l| l.id.as_deref()));
        let mut segment_position = 0;
        for (i, link) in doc.links.iter().enumerate() {
            let link_referrer = referrer(EntityKind::Link, link.id.as_deref(), i + 1);
            let node_a = self.nodes.resolve(&link.node_a_ref, &link_referrer)?;
            let node_b = self.nodes.resolve(&link.node_b_ref, &link_referrer)?;

            let link_id = builder.add_link(
                optional_id(link.id.as_deref()).unwrap_or_default(),
                node_a,
                node_b,
                link.length_km,
            )?;
            let entry = builder.link_mut(link_id)?;
            if entry.doc_id.is_empty() {
                entry.doc_id = backfill_id(entry.internal_id(), &explicit, &self.links);
            }
            entry.external_id = link.external_id.clone();
            entry.name = link.name.clone();
            self.links.register(&builder.links()[link_id.index()])?;

            for seg in &link.segments {
                segment_position += 1;
                let doc_id = required_id(seg.id.as_deref(), EntityKind::LinkSegment, segment_position)?;
                let segment_type = match &seg.type_ref {
                    Some(type_ref) => self
                        .segment_types
                        .resolve(type_ref, format!("{} {doc_id:?}", EntityKind::LinkSegment))?,
                    None => single_type(builder)?,
                };
                let direction = match seg.direction {
                    DirectionDocument::AB => Direction::AB,
                    DirectionDocument::BA => Direction::BA,
                };
                let id = builder.add_link_segment(
                    doc_id,
                    link_id,
                    direction,
                    segment_type,
                    seg.lanes.unwrap_or(1),
                    seg.max_speed_kmh,
                )?;
                if let Some(entry) = builder.link_segment_mut(id) {
                    entry.external_id = seg.external_id.clone();
                }
                self.segments.register(&builder.link_segments()[id.index()])?;
            }
        }
        Ok(())
    }
}

/// The type of a segment that names none.
fn single_type(builder: &NetworkBuilder) -> DocumentResult<LinkSegmentTypeId> {
    Ok(single_candidate(builder.link_segment_types())?.id)
}
