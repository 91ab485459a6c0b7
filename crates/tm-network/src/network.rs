//! Network representation and builder.
//!
//! # Data layout
//!
//! Every entity kind lives in its own `Vec`, indexed by its typed id.  A link
//! is undirected and owns up to two directed link segments, one per
//! [`Direction`].  Segments reference their parent link, their end nodes and
//! their [`LinkSegmentType`].
//!
//! Entities are only created through [`NetworkBuilder`], which allocates ids
//! in creation order and validates every id it is handed.

use std::fmt;

use tm_core::{
    Crs, EntityKind, GeoPoint, LinkId, LinkSegmentId, LinkSegmentTypeId, Mode, ModeId, NodeId,
    SyncDocIds, impl_entity, inject_default_if_empty, sync_doc_ids,
};

use crate::{LinkSegmentType, ModeAccess, NetworkError, NetworkResult};

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id:          NodeId,
    pub doc_id:      String,
    pub external_id: Option<String>,
    pub name:        Option<String>,
    pub position:    Option<GeoPoint>,
}

impl_entity!(Node, NodeId, EntityKind::Node);

/// Travel direction of a link segment relative to its link's `a → b` order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    AB,
    BA,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::AB => "a_b",
            Direction::BA => "b_a",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub id:          LinkId,
    pub doc_id:      String,
    pub external_id: Option<String>,
    pub name:        Option<String>,
    pub node_a:      NodeId,
    pub node_b:      NodeId,
    pub length_km:   f64,
    pub segment_ab:  Option<LinkSegmentId>,
    pub segment_ba:  Option<LinkSegmentId>,
}

impl_entity!(Link, LinkId, EntityKind::Link);

impl Link {
    pub fn segment(&self, direction: Direction) -> Option<LinkSegmentId> {
        match direction {
            Direction::AB => self.segment_ab,
            Direction::BA => self.segment_ba,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinkSegment {
    pub id:            LinkSegmentId,
    pub doc_id:        String,
    pub external_id:   Option<String>,
    pub link:          LinkId,
    pub direction:     Direction,
    pub upstream:      NodeId,
    pub downstream:    NodeId,
    pub segment_type:  LinkSegmentTypeId,
    pub lanes:         u16,
    /// Explicit speed limit; `None` defers to the segment type and mode.
    pub max_speed_kmh: Option<f64>,
}

impl_entity!(LinkSegment, LinkSegmentId, EntityKind::LinkSegment);

// ── MacroscopicNetwork ────────────────────────────────────────────────────────

/// A fully built network layer.
///
/// All fields are `pub` for direct indexed access.  Do not construct directly;
/// use [`NetworkBuilder`].
#[derive(Clone, Debug)]
pub struct MacroscopicNetwork {
    pub crs:                Crs,
    pub modes:              Vec<Mode>,
    pub nodes:              Vec<Node>,
    pub links:              Vec<Link>,
    pub link_segments:      Vec<LinkSegment>,
    pub link_segment_types: Vec<LinkSegmentType>,
}

impl MacroscopicNetwork {
    pub fn mode(&self, id: ModeId) -> &Mode {
        &self.modes[id.index()]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.index()]
    }

    pub fn link_segment(&self, id: LinkSegmentId) -> &LinkSegment {
        &self.link_segments[id.index()]
    }

    pub fn link_segment_type(&self, id: LinkSegmentTypeId) -> &LinkSegmentType {
        &self.link_segment_types[id.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Effective speed limit of `mode` on `segment`, or `None` if the segment's
    /// type does not admit the mode.
    pub fn max_speed_kmh(&self, segment: LinkSegmentId, mode: ModeId) -> Option<f64> {
        let seg = self.link_segment(segment);
        let ty = self.link_segment_type(seg.segment_type);
        let mode_max = self.mode(mode).max_speed_kmh;
        let type_max = if ty.allows_all_modes() {
            mode_max
        } else {
            ty.access_for(mode)?.max_speed_kmh.min(mode_max)
        };
        Some(seg.max_speed_kmh.map_or(type_max, |s| s.min(type_max)))
    }
}

impl SyncDocIds for MacroscopicNetwork {
    fn sync_doc_ids(&mut self) -> usize {
        sync_doc_ids(&mut self.modes)
            + sync_doc_ids(&mut self.nodes)
            + sync_doc_ids(&mut self.links)
            + sync_doc_ids(&mut self.link_segments)
            + sync_doc_ids(&mut self.link_segment_types)
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`MacroscopicNetwork`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use tm_core::{Crs, GeoPoint};
/// use tm_network::{Direction, NetworkBuilder};
///
/// let mut b = NetworkBuilder::new(Crs::Cartesian);
/// let a = b.add_node("a", Some(GeoPoint::new(0.0, 0.0)));
/// let c = b.add_node("c", Some(GeoPoint::new(1_200.0, 0.0)));
/// let ty = b.add_link_segment_type("t", "road", Some(1_800.0), None, Vec::new());
/// let link = b.add_link("l", a, c, None).unwrap();
/// b.add_link_segment("s", link, Direction::AB, ty, 1, None).unwrap();
/// let net = b.build();
/// assert_eq!(net.links[0].length_km, 1.2);
/// assert_eq!(net.modes.len(), 1); // default mode injected
/// ```
pub struct NetworkBuilder {
    crs:           Crs,
    modes:         Vec<Mode>,
    nodes:         Vec<Node>,
    links:         Vec<Link>,
    segments:      Vec<LinkSegment>,
    segment_types: Vec<LinkSegmentType>,
}

impl NetworkBuilder {
    pub fn new(crs: Crs) -> Self {
        Self {
            crs,
            modes:         Vec::new(),
            nodes:         Vec::new(),
            links:         Vec::new(),
            segments:      Vec::new(),
            segment_types: Vec::new(),
        }
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Add a mode; its `id` is overwritten with the next free `ModeId`.
    pub fn add_mode(&mut self, mut mode: Mode) -> ModeId {
        let id = ModeId(self.modes.len() as u16);
        mode.id = id;
        self.modes.push(mode);
        id
    }

    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, doc_id: impl Into<String>, position: Option<GeoPoint>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: None,
            position,
        });
        id
    }

    pub fn node_mut(&mut self, id: NodeId) -> NetworkResult<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(NetworkError::NodeNotFound(id))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Register a link segment type.  Capacity and density are stored exactly
    /// as given; duplicate mode rows are merged.
    pub fn add_link_segment_type(
        &mut self,
        doc_id: impl Into<String>,
        name: impl Into<String>,
        capacity_pcu_h_lane: Option<f64>,
        max_density_pcu_km_lane: Option<f64>,
        mode_access: Vec<ModeAccess>,
    ) -> LinkSegmentTypeId {
        let id = LinkSegmentTypeId(self.segment_types.len() as u32);
        self.segment_types.push(LinkSegmentType {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: name.into(),
            capacity_pcu_h_lane,
            max_density_pcu_km_lane,
            mode_access: crate::merge_mode_access(mode_access),
        });
        id
    }

    pub fn link_segment_type_mut(&mut self, id: LinkSegmentTypeId) -> NetworkResult<&mut LinkSegmentType> {
        self.segment_types
            .get_mut(id.index())
            .ok_or(NetworkError::SegmentTypeNotFound(id))
    }

    pub fn link_segment_types(&self) -> &[LinkSegmentType] {
        &self.segment_types
    }

    /// Add an undirected link between two existing nodes.
    ///
    /// Without an explicit length the CRS distance between the end nodes is
    /// used, or zero if either node has no position.
    pub fn add_link(
        &mut self,
        doc_id: impl Into<String>,
        node_a: NodeId,
        node_b: NodeId,
        length_km: Option<f64>,
    ) -> NetworkResult<LinkId> {
        let pos_a = self.nodes.get(node_a.index()).ok_or(NetworkError::NodeNotFound(node_a))?.position;
        let pos_b = self.nodes.get(node_b.index()).ok_or(NetworkError::NodeNotFound(node_b))?.position;

        let length_km = match (length_km, pos_a, pos_b) {
            (Some(len), _, _) => len,
            (None, Some(a), Some(b)) => self.crs.distance_km(a, b),
            _ => 0.0,
        };

        let id = LinkId(self.links.len() as u32);
        self.links.push(Link {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            name: None,
            node_a,
            node_b,
            length_km,
            segment_ab: None,
            segment_ba: None,
        });
        Ok(id)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn link_mut(&mut self, id: LinkId) -> NetworkResult<&mut Link> {
        self.links.get_mut(id.index()).ok_or(NetworkError::LinkNotFound(id))
    }

    /// Add the directed segment of `link` running in `direction`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::DuplicateDirection`] if the link already has a segment
    /// in that direction.
    pub fn add_link_segment(
        &mut self,
        doc_id: impl Into<String>,
        link: LinkId,
        direction: Direction,
        segment_type: LinkSegmentTypeId,
        lanes: u16,
        max_speed_kmh: Option<f64>,
    ) -> NetworkResult<LinkSegmentId> {
        if segment_type.index() >= self.segment_types.len() {
            return Err(NetworkError::SegmentTypeNotFound(segment_type));
        }
        let id = LinkSegmentId(self.segments.len() as u32);
        let parent = self.links.get_mut(link.index()).ok_or(NetworkError::LinkNotFound(link))?;

        let slot = match direction {
            Direction::AB => &mut parent.segment_ab,
            Direction::BA => &mut parent.segment_ba,
        };
        if slot.is_some() {
            return Err(NetworkError::DuplicateDirection { link: parent.doc_id.clone(), direction });
        }
        *slot = Some(id);

        let (upstream, downstream) = match direction {
            Direction::AB => (parent.node_a, parent.node_b),
            Direction::BA => (parent.node_b, parent.node_a),
        };
        self.segments.push(LinkSegment {
            id,
            doc_id: doc_id.into(),
            external_id: None,
            link,
            direction,
            upstream,
            downstream,
            segment_type,
            lanes,
            max_speed_kmh,
        });
        Ok(id)
    }

    pub fn link_segment_mut(&mut self, id: LinkSegmentId) -> Option<&mut LinkSegment> {
        self.segments.get_mut(id.index())
    }

    pub fn link_segments(&self) -> &[LinkSegment] {
        &self.segments
    }

    /// Add the default mode if no mode has been added yet.
    pub fn inject_default_mode(&mut self) -> bool {
        inject_default_if_empty(&mut self.modes, Mode::default_mode)
    }

    /// Consume the builder and produce a [`MacroscopicNetwork`].
    ///
    /// A network without modes receives the default mode.
    pub fn build(mut self) -> MacroscopicNetwork {
        self.inject_default_mode();
        MacroscopicNetwork {
            crs:                self.crs,
            modes:              self.modes,
            nodes:              self.nodes,
            links:              self.links,
            link_segments:      self.segments,
            link_segment_types: self.segment_types,
        }
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new(Crs::default())
    }
}
