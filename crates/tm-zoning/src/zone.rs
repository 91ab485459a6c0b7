//! Zone entities.

use std::fmt;

use tm_core::{EntityKind, GeoPoint, TransferGroupId, TransferZoneId, ZoneId, impl_entity};

/// An origin-destination zone.
#[derive(Clone, Debug, PartialEq)]
pub struct Zone {
    pub id:          ZoneId,
    pub doc_id:      String,
    pub external_id: Option<String>,
    pub name:        Option<String>,
    pub centroid:    Option<GeoPoint>,
}

impl_entity!(Zone, ZoneId, EntityKind::Zone);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum TransferZoneType {
    #[default]
    None,
    Platform,
    StopPole,
}

impl TransferZoneType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferZoneType::None     => "none",
            TransferZoneType::Platform => "platform",
            TransferZoneType::StopPole => "stop_pole",
        }
    }
}

impl fmt::Display for TransferZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stop, platform or other place where travellers change mode or vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferZone {
    pub id:            TransferZoneId,
    pub doc_id:        String,
    pub external_id:   Option<String>,
    pub name:          Option<String>,
    pub centroid:      Option<GeoPoint>,
    pub transfer_type: TransferZoneType,
}

impl_entity!(TransferZone, TransferZoneId, EntityKind::TransferZone);

/// A named set of transfer zones forming one station or interchange.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferGroup {
    pub id:          TransferGroupId,
    pub doc_id:      String,
    pub external_id: Option<String>,
    pub name:        Option<String>,
    pub zones:       Vec<TransferZoneId>,
}

impl_entity!(TransferGroup, TransferGroupId, EntityKind::TransferGroup);
