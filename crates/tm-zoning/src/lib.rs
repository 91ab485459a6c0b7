//! `tm-zoning` — zones and the connectoids that attach them to the network.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`zone`]       | `Zone`, `TransferZone`, `TransferZoneType`, `TransferGroup`   |
//! | [`connectoid`] | `Connectoid`, `ConnectoidAccess`, `AccessZone`               |
//! | [`zoning`]     | `Zoning`, `ZoningBuilder`                                    |
//! | [`error`]      | `ZoningError`, `ZoningResult<T>`                             |
//!
//! OD zones are the rows/columns of demand matrices.  Transfer zones model
//! stops and platforms and are reached through link-segment-based
//! connectoids.

pub mod connectoid;
pub mod error;
pub mod zone;
pub mod zoning;

#[cfg(test)]
mod tests;

pub use connectoid::{AccessZone, Connectoid, ConnectoidAccess};
pub use error::{ZoningError, ZoningResult};
pub use zone::{TransferGroup, TransferZone, TransferZoneType, Zone};
pub use zoning::{Zoning, ZoningBuilder};
