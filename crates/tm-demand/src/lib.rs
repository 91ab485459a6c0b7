//! `tm-demand` — traveller types, user classes, time periods and OD demand.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`demand`]  | `TravellerType`, `UserClass`, `Demands`                        |
//! | [`time`]    | `TimePeriod`, `DurationUnit`, `parse_clock_time`               |
//! | [`matrix`]  | `OdMatrix` (dense, pcu/h), `OdDemands`                         |
//! | [`codec`]   | `MatrixEncoding` (raw / row / cell-by-cell), `decode`, `encode` |
//! | [`error`]   | `DemandError`, `MatrixShapeError`, `DemandResult<T>`           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `MatrixEncodingKind`. |
//!
//! # Units
//!
//! Documents carry vehicles/hour.  `OdMatrix` stores pcu/hour: decoding
//! multiplies by the mode's PCU factor and encoding divides by it.

pub mod codec;
pub mod demand;
pub mod error;
pub mod matrix;
pub mod time;

#[cfg(test)]
mod tests;

pub use codec::{
    Cell, CodecSettings, MatrixEncoding, MatrixEncodingKind, NumberFormat, RowEntry, decode, encode,
};
pub use demand::{Demands, TravellerType, UserClass};
pub use error::{DemandError, DemandResult, MatrixShapeError};
pub use matrix::{OdDemands, OdMatrix};
pub use time::{DurationUnit, TimePeriod, format_clock_time, parse_clock_time};
