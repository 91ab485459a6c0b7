//! Model → document writers.
//!
//! Every emitted id, including cross-references, goes through the writer's
//! [`IdMapping`], so a document written with `IdMapping::InternalId`
//! resolves against itself.

pub mod csv;

pub use self::csv::{write_od_csv, write_od_csv_to};

use tracing::info;

use tm_core::Entity;
use tm_demand::{Demands, DurationUnit, MatrixEncoding, encode, format_clock_time};
use tm_network::{Direction, MacroscopicNetwork};
use tm_zoning::{AccessZone, ConnectoidAccess, TransferZoneType, Zoning};

use crate::document::{
    AccessZoneDocument, ConnectoidDocument, DemandDocument, DirectionDocument, LinkDocument,
    LinkSegmentConnectoidDocument, LinkSegmentDocument, LinkSegmentTypeDocument, MatrixDocument,
    ModeAccessDocument, ModeDocument, NetworkDocument, NodeConnectoidDocument, NodeDocument,
    OdCellDocument, OdMatrixDocument, OdRowDocument, TimePeriodDocument, TransferGroupDocument,
    TransferZoneDocument, TransferZoneTypeDocument, TravellerTypeDocument, UserClassDocument,
    ZoneDocument, ZoningDocument,
};
use crate::{DocumentResult, IdMapping, WriterSettings};

/// Builds layer documents from a model.
#[derive(Clone, Debug, Default)]
pub struct DocumentWriter {
    settings: WriterSettings,
}

impl DocumentWriter {
    /// # Errors
    ///
    /// [`crate::DocumentError::InvalidSettings`] if `settings` fail
    /// [`WriterSettings::validate`].
    pub fn new(settings: WriterSettings) -> DocumentResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &WriterSettings {
        &self.settings
    }

    fn id<E: Entity>(&self, entity: &E) -> String {
        self.settings.id_mapping.map(entity)
    }

    // ── Network ───────────────────────────────────────────────────────────

    pub fn write_network(&self, network: &MacroscopicNetwork) -> NetworkDocument {
        let modes = network
            .modes
            .iter()
            .map(|m| ModeDocument {
                id:            Some(self.id(m)),
                external_id:   m.external_id.clone(),
                name:          Some(m.name.clone()),
                predefined:    Some(m.predefined),
                pcu:           Some(m.pcu),
                max_speed_kmh: Some(m.max_speed_kmh),
            })
            .collect();

        let link_segment_types = network
            .link_segment_types
            .iter()
            .map(|t| LinkSegmentTypeDocument {
                id:                      Some(self.id(t)),
                external_id:             t.external_id.clone(),
                name:                    Some(t.name.clone()),
                capacity_pcu_h_lane:     t.capacity_pcu_h_lane,
                max_density_pcu_km_lane: t.max_density_pcu_km_lane,
                access: t
                    .mode_access
                    .iter()
                    .map(|a| ModeAccessDocument {
                        mode_ref:           self.id(network.mode(a.mode)),
                        max_speed_kmh:      Some(a.max_speed_kmh),
                        critical_speed_kmh: a.critical_speed_kmh,
                    })
                    .collect(),
            })
            .collect();

        let nodes = network
            .nodes
            .iter()
            .map(|n| NodeDocument {
                id:          Some(self.id(n)),
                external_id: n.external_id.clone(),
                name:        n.name.clone(),
                point:       n.position.map(|p| [p.x, p.y]),
            })
            .collect();

        let links = network
            .links
            .iter()
            .map(|l| LinkDocument {
                id:          Some(self.id(l)),
                external_id: l.external_id.clone(),
                name:        l.name.clone(),
                node_a_ref:  self.id(network.node(l.node_a)),
                node_b_ref:  self.id(network.node(l.node_b)),
                length_km:   Some(l.length_km),
                segments: [l.segment_ab, l.segment_ba]
                    .into_iter()
                    .flatten()
                    .map(|s| {
                        let seg = network.link_segment(s);
                        LinkSegmentDocument {
                            id:            Some(self.id(seg)),
                            external_id:   seg.external_id.clone(),
                            direction:     match seg.direction {
                                Direction::AB => DirectionDocument::AB,
                                Direction::BA => DirectionDocument::BA,
                            },
                            type_ref:      Some(self.id(network.link_segment_type(seg.segment_type))),
                            lanes:         Some(seg.lanes),
                            max_speed_kmh: seg.max_speed_kmh,
                        }
                    })
                    .collect(),
            })
            .collect();

        NetworkDocument {
            crs: Some(network.crs.as_str().to_owned()),
            modes,
            link_segment_types,
            nodes,
            links,
        }
    }

    // ── Zoning ────────────────────────────────────────────────────────────

    pub fn write_zoning(&self, network: &MacroscopicNetwork, zoning: &Zoning) -> ZoningDocument {
        let zones = zoning
            .zones
            .iter()
            .map(|z| ZoneDocument {
                id:          Some(self.id(z)),
                external_id: z.external_id.clone(),
                name:        z.name.clone(),
                centroid:    z.centroid.map(|p| [p.x, p.y]),
            })
            .collect();

        let transfer_zones = zoning
            .transfer_zones
            .iter()
            .map(|z| TransferZoneDocument {
                id:            Some(self.id(z)),
                external_id:   z.external_id.clone(),
                name:          z.name.clone(),
                centroid:      z.centroid.map(|p| [p.x, p.y]),
                transfer_type: match z.transfer_type {
                    TransferZoneType::None     => TransferZoneTypeDocument::None,
                    TransferZoneType::Platform => TransferZoneTypeDocument::Platform,
                    TransferZoneType::StopPole => TransferZoneTypeDocument::StopPole,
                },
            })
            .collect();

        let connectoids = zoning
            .connectoids
            .iter()
            .map(|c| match &c.access {
                ConnectoidAccess::NodeBased { node, zones } => {
                    ConnectoidDocument::Node(NodeConnectoidDocument {
                        id:           Some(self.id(c)),
                        external_id:  c.external_id.clone(),
                        name:         c.name.clone(),
                        node_ref:     self.id(network.node(*node)),
                        access_zones: zones
                            .iter()
                            .map(|a| self.access_zone(network, a, self.id(zoning.zone(a.zone))))
                            .collect(),
                    })
                }
                ConnectoidAccess::LinkSegmentBased { segment, zones } => {
                    ConnectoidDocument::LinkSegment(LinkSegmentConnectoidDocument {
                        id:               Some(self.id(c)),
                        external_id:      c.external_id.clone(),
                        name:             c.name.clone(),
                        link_segment_ref: self.id(network.link_segment(*segment)),
                        access_zones:     zones
                            .iter()
                            .map(|a| self.access_zone(network, a, self.id(zoning.transfer_zone(a.zone))))
                            .collect(),
                    })
                }
            })
            .collect();

        let transfer_groups = zoning
            .transfer_groups
            .iter()
            .map(|g| TransferGroupDocument {
                id:                 Some(self.id(g)),
                external_id:        g.external_id.clone(),
                name:               g.name.clone(),
                transfer_zone_refs: g.zones.iter().map(|&z| self.id(zoning.transfer_zone(z))).collect(),
            })
            .collect();

        ZoningDocument { zones, transfer_zones, connectoids, transfer_groups }
    }

    fn access_zone<Z>(&self, network: &MacroscopicNetwork, access: &AccessZone<Z>, zone_ref: String) -> AccessZoneDocument {
        AccessZoneDocument {
            zone_ref,
            length_km: access.length_km,
            mode_refs: access
                .allowed_modes
                .as_ref()
                .map(|modes| modes.iter().map(|&m| self.id(network.mode(m))).collect()),
        }
    }

    // ── Demand ────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// [`tm_demand::DemandError::AmbiguousUserClass`] when a stored matrix's
    /// mode is used by zero or several user classes.
    pub fn write_demands(
        &self,
        network: &MacroscopicNetwork,
        zoning: &Zoning,
        demands: &Demands,
    ) -> DocumentResult<DemandDocument> {
        let traveller_types = demands
            .traveller_types
            .iter()
            .map(|t| TravellerTypeDocument {
                id:          Some(self.id(t)),
                external_id: t.external_id.clone(),
                name:        t.name.clone(),
            })
            .collect();

        let user_classes = demands
            .user_classes
            .iter()
            .map(|uc| UserClassDocument {
                id:                 Some(self.id(uc)),
                external_id:        uc.external_id.clone(),
                name:               uc.name.clone(),
                mode_ref:           Some(self.id(network.mode(uc.mode))),
                traveller_type_ref: Some(self.id(demands.traveller_type(uc.traveller_type))),
            })
            .collect();

        let time_periods = demands
            .time_periods
            .iter()
            .map(|tp| TimePeriodDocument {
                id:            Some(self.id(tp)),
                external_id:   tp.external_id.clone(),
                name:          tp.name.clone(),
                start_time:    Some(format_clock_time(tp.start_secs)),
                duration:      tp.duration_secs as f64,
                duration_unit: Some(DurationUnit::Seconds.as_str().to_owned()),
            })
            .collect();

        let codec = self.settings.codec();
        let mut od_matrices = Vec::with_capacity(demands.od.len());
        for (mode_id, time_period, matrix) in demands.od.iter() {
            let mode = network.mode(mode_id);
            let user_class = demands.user_class_for_mode(mode)?;
            let encoding = encode(matrix, self.settings.matrix_encoding, mode.pcu, &codec, |z| {
                self.id(zoning.zone(z))
            })?;
            od_matrices.push(OdMatrixDocument {
                id:              None,
                time_period_ref: self.id(demands.time_period(time_period)),
                user_class_ref:  Some(self.id(user_class)),
                matrix:          self.matrix_document(encoding),
            });
        }

        info!(
            encoding = %self.settings.matrix_encoding,
            od_matrices = od_matrices.len(),
            "wrote demand layer"
        );
        Ok(DemandDocument { traveller_types, user_classes, time_periods, od_matrices })
    }

    fn matrix_document(&self, encoding: MatrixEncoding) -> MatrixDocument {
        let decimal = Some(self.settings.decimal_separator);
        match encoding {
            MatrixEncoding::Raw { text, origin_separator, destination_separator } => MatrixDocument::Raw {
                values:                text,
                origin_separator:      Some(origin_separator),
                destination_separator: Some(destination_separator),
                decimal_separator:     decimal,
            },
            MatrixEncoding::Row { separator, rows } => MatrixDocument::Row {
                separator:         Some(separator),
                decimal_separator: decimal,
                rows: rows
                    .into_iter()
                    .map(|r| OdRowDocument { origin_ref: r.origin, values: r.values })
                    .collect(),
            },
            MatrixEncoding::CellByCell(cells) => MatrixDocument::CellByCell {
                cells: cells
                    .into_iter()
                    .map(|c| OdCellDocument {
                        origin_ref:      c.origin,
                        destination_ref: c.destination,
                        value:           c.value,
                    })
                    .collect(),
            },
        }
    }
}

impl From<IdMapping> for DocumentWriter {
    fn from(id_mapping: IdMapping) -> Self {
        Self { settings: WriterSettings { id_mapping, ..WriterSettings::default() } }
    }
}
