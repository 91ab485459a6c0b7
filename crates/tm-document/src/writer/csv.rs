//! Tabular OD export.
//!
//! One row per non-zero cell of every stored matrix, in vehicles/hour:
//!
//! ```csv
//! origin,destination,time_period,mode,vehicles_per_hour
//! z1,z2,AM,car,5
//! z1,z3,AM,car,7.5
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use tm_demand::{Demands, NumberFormat};
use tm_network::MacroscopicNetwork;
use tm_zoning::Zoning;

use crate::{DocumentResult, IdMapping};

/// Write every OD cell of `demands` to a CSV file at `path`.
///
/// Returns the number of data rows written.
pub fn write_od_csv(
    path: &Path,
    network: &MacroscopicNetwork,
    zoning: &Zoning,
    demands: &Demands,
    id_mapping: IdMapping,
) -> DocumentResult<usize> {
    write_od_csv_to(File::create(path)?, network, zoning, demands, id_mapping)
}

/// Like [`write_od_csv`] but accepts any `Write` sink.
pub fn write_od_csv_to<W: Write>(
    sink: W,
    network: &MacroscopicNetwork,
    zoning: &Zoning,
    demands: &Demands,
    id_mapping: IdMapping,
) -> DocumentResult<usize> {
    let mut writer = Writer::from_writer(sink);
    writer.write_record(["origin", "destination", "time_period", "mode", "vehicles_per_hour"])?;

    let number = NumberFormat::default();
    let mut rows = 0;
    for (mode_id, time_period, matrix) in demands.od.iter() {
        let mode = network.mode(mode_id);
        let mode_ref = id_mapping.map(mode);
        let period_ref = id_mapping.map(demands.time_period(time_period));
        for (o, d, pcu_h) in matrix.non_zero() {
            writer.write_record(&[
                id_mapping.map(zoning.zone(o)),
                id_mapping.map(zoning.zone(d)),
                period_ref.clone(),
                mode_ref.clone(),
                number.format(pcu_h / mode.pcu),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}
