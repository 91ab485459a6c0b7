//! Travel modes.
//!
//! A mode is a network-level entity that demand and zoning documents refer to
//! by document id.  Its passenger-car-unit (PCU) factor converts vehicle flows
//! into the common capacity unit used for stored demand.

use crate::defaults::DEFAULT_DOC_ID;
use crate::{EntityKind, ModeId, impl_entity};

/// Well-known mode families, each with a default PCU and speed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[non_exhaustive]
pub enum PredefinedModeType {
    #[default]
    Car,
    Bus,
    Bicycle,
    Pedestrian,
    Train,
    Tram,
    GoodsVehicle,
    /// User-defined mode with no predefined properties.
    Custom,
}

impl PredefinedModeType {
    pub fn as_str(self) -> &'static str {
        match self {
            PredefinedModeType::Car          => "car",
            PredefinedModeType::Bus          => "bus",
            PredefinedModeType::Bicycle      => "bicycle",
            PredefinedModeType::Pedestrian   => "pedestrian",
            PredefinedModeType::Train        => "train",
            PredefinedModeType::Tram         => "tram",
            PredefinedModeType::GoodsVehicle => "goods_vehicle",
            PredefinedModeType::Custom       => "custom",
        }
    }

    /// Passenger-car-unit factor.
    pub fn default_pcu(self) -> f64 {
        match self {
            PredefinedModeType::Bus          => 2.0,
            PredefinedModeType::Bicycle      => 0.2,
            PredefinedModeType::Pedestrian   => 0.1,
            PredefinedModeType::Train        => 6.0,
            PredefinedModeType::Tram         => 3.0,
            PredefinedModeType::GoodsVehicle => 1.8,
            PredefinedModeType::Car | PredefinedModeType::Custom => 1.0,
        }
    }

    /// Maximum speed in km/h.
    pub fn default_max_speed_kmh(self) -> f64 {
        match self {
            PredefinedModeType::Car | PredefinedModeType::Custom => 130.0,
            PredefinedModeType::Bus          => 100.0,
            PredefinedModeType::Bicycle      => 25.0,
            PredefinedModeType::Pedestrian   => 5.0,
            PredefinedModeType::Train        => 140.0,
            PredefinedModeType::Tram         => 70.0,
            PredefinedModeType::GoodsVehicle => 90.0,
        }
    }
}

impl std::fmt::Display for PredefinedModeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A travel mode available on the network.
#[derive(Clone, Debug, PartialEq)]
pub struct Mode {
    pub id:            ModeId,
    pub doc_id:        String,
    pub external_id:   Option<String>,
    pub name:          String,
    pub predefined:    PredefinedModeType,
    pub pcu:           f64,
    pub max_speed_kmh: f64,
}

impl_entity!(Mode, ModeId, EntityKind::Mode);

impl Mode {
    /// A mode of the given predefined type with that type's defaults.
    pub fn predefined(id: ModeId, doc_id: impl Into<String>, kind: PredefinedModeType) -> Self {
        Self {
            id,
            doc_id:        doc_id.into(),
            external_id:   None,
            name:          kind.as_str().to_owned(),
            predefined:    kind,
            pcu:           kind.default_pcu(),
            max_speed_kmh: kind.default_max_speed_kmh(),
        }
    }

    /// The mode injected when a network document lists none.
    pub fn default_mode() -> Self {
        Self::predefined(ModeId(0), DEFAULT_DOC_ID, PredefinedModeType::Car)
    }
}
