//! Link segment types and their per-mode access properties.
//!
//! Capacity and density are forwarded from the document as-is; no defaults are
//! computed here.

use std::collections::BTreeMap;

use tm_core::{EntityKind, LinkSegmentTypeId, ModeId, impl_entity};

/// Access properties of one mode on a link segment type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ModeAccess {
    pub mode:               ModeId,
    pub max_speed_kmh:      f64,
    pub critical_speed_kmh: Option<f64>,
}

/// A named class of link segment (e.g. "motorway").
#[derive(Clone, Debug, PartialEq)]
pub struct LinkSegmentType {
    pub id:          LinkSegmentTypeId,
    pub doc_id:      String,
    pub external_id: Option<String>,
    pub name:        String,
    /// Capacity in pcu/h/lane.
    pub capacity_pcu_h_lane:     Option<f64>,
    /// Maximum density in pcu/km/lane.
    pub max_density_pcu_km_lane: Option<f64>,
    /// Modes allowed on this type.  Empty means every network mode is allowed
    /// at its own maximum speed.
    pub mode_access: Vec<ModeAccess>,
}

impl_entity!(LinkSegmentType, LinkSegmentTypeId, EntityKind::LinkSegmentType);

impl LinkSegmentType {
    pub fn allows_all_modes(&self) -> bool {
        self.mode_access.is_empty()
    }

    pub fn access_for(&self, mode: ModeId) -> Option<&ModeAccess> {
        self.mode_access.iter().find(|a| a.mode == mode)
    }
}

/// Collapse access rows that name the same mode into one row per mode.
///
/// Each field takes the maximum over the merged rows; a critical speed given on
/// any row wins over an absent one.  Output is sorted by `ModeId`.
pub fn merge_mode_access<I>(rows: I) -> Vec<ModeAccess>
where
    I: IntoIterator<Item = ModeAccess>,
{
    let mut by_mode: BTreeMap<ModeId, ModeAccess> = BTreeMap::new();
    for row in rows {
        by_mode
            .entry(row.mode)
            .and_modify(|acc| {
                acc.max_speed_kmh = acc.max_speed_kmh.max(row.max_speed_kmh);
                acc.critical_speed_kmh = match (acc.critical_speed_kmh, row.critical_speed_kmh) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    (a, b) => a.or(b),
                };
            })
            .or_insert(row);
    }
    by_mode.into_values().collect()
}
