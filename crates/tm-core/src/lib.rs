//! `tm-core` — foundational types for the `tm` transport-model io framework.
//!
//! This crate is a dependency of every other `tm-*` crate.  It has no `tm-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ids`]       | `ModeId`, `NodeId`, `LinkId`, `ZoneId`, … typed indices     |
//! | [`entity`]    | `Entity` trait, `EntityKind`, `impl_entity!`               |
//! | [`registry`]  | `IdRegistry`: document id → internal id resolution         |
//! | [`defaults`]  | default injection and single-candidate selection           |
//! | [`sync`]      | `sync_doc_ids`, `SyncDocIds`                               |
//! | [`geo`]       | `GeoPoint`, `Crs`                                          |
//! | [`transport`] | `Mode`, `PredefinedModeType`                               |
//! | [`error`]     | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, points, mode types. |

pub mod defaults;
pub mod entity;
pub mod error;
pub mod geo;
pub mod ids;
pub mod registry;
pub mod sync;
pub mod transport;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use defaults::{inject_default_if_empty, single_candidate};
pub use entity::{Entity, EntityKind};
pub use error::{CoreError, CoreResult};
pub use geo::{Crs, GeoPoint};
pub use ids::{
    ConnectoidId, LinkId, LinkSegmentId, LinkSegmentTypeId, ModeId, NodeId, TimePeriodId,
    TransferGroupId, TransferZoneId, TravellerTypeId, UserClassId, ZoneId,
};
pub use registry::IdRegistry;
pub use sync::{SyncDocIds, sync_doc_ids};
pub use transport::{Mode, PredefinedModeType};
