//! Demand document reader.
//!
//! Configuration entities are read first (traveller types, user classes,
//! time periods, with defaults injected where a collection is omitted), then
//! every OD matrix is decoded and stored under its user class's mode.

use tracing::info;

use tm_core::{
    CoreError, EntityKind, IdRegistry, Mode, TimePeriodId, UserClassId, single_candidate,
};
use tm_demand::{
    Cell, CodecSettings, Demands, DurationUnit, MatrixEncoding, NumberFormat, RowEntry, TimePeriod,
    TravellerType, UserClass, decode, parse_clock_time,
};
use tm_network::MacroscopicNetwork;
use tm_zoning::{Zone, Zoning};

use super::{optional_id, required_id};
use crate::document::{DemandDocument, MatrixDocument, OdMatrixDocument, UserClassDocument};
use crate::DocumentResult;

/// Reads a [`DemandDocument`] on top of a network and its zoning.
#[derive(Debug, Default)]
pub struct DemandReader {
    // Seeded from earlier layers.
    modes:           IdRegistry<Mode>,
    zones:           IdRegistry<Zone>,
    // Owned by this layer.
    traveller_types: IdRegistry<TravellerType>,
    user_classes:    IdRegistry<UserClass>,
    time_periods:    IdRegistry<TimePeriod>,
}

impl DemandReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose the network's modes to this reader.
    pub fn seed_network(&mut self, network: &MacroscopicNetwork) -> DocumentResult<()> {
        self.modes.seed_from(&network.modes)?;
        Ok(())
    }

    /// Expose the zoning's OD zones to this reader.
    pub fn seed_zoning(&mut self, zoning: &Zoning) -> DocumentResult<()> {
        self.zones.seed_from(&zoning.zones)?;
        Ok(())
    }

    pub fn read(
        mut self,
        network: &MacroscopicNetwork,
        zoning: &Zoning,
        doc: &DemandDocument,
    ) -> DocumentResult<Demands> {
        let mut demands = Demands::new();

        for (i, tt) in doc.traveller_types.iter().enumerate() {
            let doc_id = required_id(tt.id.as_deref(), EntityKind::TravellerType, i + 1)?;
            let id = demands.add_traveller_type(doc_id);
            let entry = &mut demands.traveller_types[id.index()];
            entry.external_id = tt.external_id.clone();
            entry.name = tt.name.clone();
            self.traveller_types.register(entry)?;
        }
        if demands.inject_default_traveller_type() {
            self.traveller_types.seed_from(&demands.traveller_types)?;
        }

        for (i, uc) in doc.user_classes.iter().enumerate() {
            self.read_user_class(network, &mut demands, uc, i + 1)?;
        }
        if demands.inject_default_user_class(&network.modes)? {
            self.user_classes.seed_from(&demands.user_classes)?;
        }

        for (i, tp) in doc.time_periods.iter().enumerate() {
            let doc_id = required_id(tp.id.as_deref(), EntityKind::TimePeriod, i + 1)?;
            let start = match &tp.start_time {
                Some(text) => parse_clock_time(text)?,
                None => 0,
            };
            let unit = match &tp.duration_unit {
                Some(text) => text.parse::<DurationUnit>()?,
                None => DurationUnit::default(),
            };
            if !(tp.duration.is_finite() && tp.duration >= 0.0) {
                return Err(CoreError::Parse(format!(
                    "time period {doc_id:?} has invalid duration {}",
                    tp.duration
                ))
                .into());
            }
            let id = demands.add_time_period(doc_id, start, unit.to_secs(tp.duration));
            let entry = &mut demands.time_periods[id.index()];
            entry.external_id = tp.external_id.clone();
            entry.name = tp.name.clone();
            self.time_periods.register(entry)?;
        }

        for (i, od) in doc.od_matrices.iter().enumerate() {
            self.read_od_matrix(network, zoning, &mut demands, od, i + 1)?;
        }

        info!(
            traveller_types = demands.traveller_types.len(),
            user_classes = demands.user_classes.len(),
            time_periods = demands.time_periods.len(),
            od_matrices = demands.od.len(),
            "read demand layer"
        );
        Ok(demands)
    }

    fn read_user_class(
        &mut self,
        network: &MacroscopicNetwork,
        demands: &mut Demands,
        doc: &UserClassDocument,
        position: usize,
    ) -> DocumentResult<()> {
        let doc_id = required_id(doc.id.as_deref(), EntityKind::UserClass, position)?;
        let uc_referrer = format!("{} {doc_id:?}", EntityKind::UserClass);
        let mode = match &doc.mode_ref {
            Some(r) => self.modes.resolve(r, &uc_referrer)?,
            None => single_candidate(&network.modes)?.id,
        };
        let traveller_type = match &doc.traveller_type_ref {
            Some(r) => self.traveller_types.resolve(r, &uc_referrer)?,
            None => single_candidate(&demands.traveller_types)?.id,
        };
        let id = demands.add_user_class(doc_id, mode, traveller_type);
        let entry = &mut demands.user_classes[id.index()];
        entry.external_id = doc.external_id.clone();
        entry.name = doc.name.clone();
        self.user_classes.register(entry)?;
        Ok(())
    }

    fn read_od_matrix(
        &self,
        network: &MacroscopicNetwork,
        zoning: &Zoning,
        demands: &mut Demands,
        doc: &OdMatrixDocument,
        position: usize,
    ) -> DocumentResult<()> {
        let od_referrer = match optional_id(doc.id.as_deref()) {
            Some(id) => format!("OD matrix {id:?}"),
            None => format!("OD matrix #{position}"),
        };
        let time_period: TimePeriodId = self.time_periods.resolve(&doc.time_period_ref, &od_referrer)?;
        let user_class: UserClassId = match &doc.user_class_ref {
            Some(r) => self.user_classes.resolve(r, &od_referrer)?,
            None => single_candidate(&demands.user_classes)?.id,
        };
        let mode = network.mode(demands.user_class(user_class).mode);

        let (encoding, number) = to_encoding(&doc.matrix);
        let matrix = decode(&encoding, zoning.zones.len(), mode.pcu, &number, |zone_ref| {
            Ok(self.zones.resolve(zone_ref, &od_referrer)?)
        })?;
        demands.register_od_matrix(mode, time_period, matrix)?;
        Ok(())
    }
}

/// The codec's view of a document matrix.  Omitted separators take the
/// writer defaults.
fn to_encoding(doc: &MatrixDocument) -> (MatrixEncoding, NumberFormat) {
    let defaults = CodecSettings::default();
    let number = |decimal: Option<char>| NumberFormat {
        decimal_separator: decimal.unwrap_or(defaults.number.decimal_separator),
        ..defaults.number.clone()
    };
    match doc {
        MatrixDocument::Raw { values, origin_separator, destination_separator, decimal_separator } => (
            MatrixEncoding::Raw {
                text:                  values.clone(),
                origin_separator:      origin_separator.clone().unwrap_or_else(|| defaults.origin_separator.clone()),
                destination_separator: destination_separator
                    .clone()
                    .unwrap_or_else(|| defaults.destination_separator.clone()),
            },
            number(*decimal_separator),
        ),
        MatrixDocument::Row { separator, decimal_separator, rows } => (
            MatrixEncoding::Row {
                separator: separator.clone().unwrap_or_else(|| defaults.destination_separator.clone()),
                rows: rows
                    .iter()
                    .map(|r| RowEntry { origin: r.origin_ref.clone(), values: r.values.clone() })
                    .collect(),
            },
            number(*decimal_separator),
        ),
        MatrixDocument::CellByCell { cells } => (
            MatrixEncoding::CellByCell(
                cells
                    .iter()
                    .map(|c| Cell {
                        origin:      c.origin_ref.clone(),
                        destination: c.destination_ref.clone(),
                        value:       c.value,
                    })
                    .collect(),
            ),
            number(None),
        ),
    }
}
