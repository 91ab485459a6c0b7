//! `tm-network` — the macroscopic network layer.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`network`]      | `MacroscopicNetwork`, `NetworkBuilder`, `Node`, `Link`, `LinkSegment` |
//! | [`segment_type`] | `LinkSegmentType`, `ModeAccess`, `merge_mode_access`       |
//! | [`error`]        | `NetworkError`, `NetworkResult<T>`                         |
//!
//! The network is the first layer to be read; zoning and demand documents
//! refer to its nodes, link segments and modes by document id.

pub mod error;
pub mod network;
pub mod segment_type;


pub use error::{NetworkError, NetworkResult};
pub use network::{Direction, Link, LinkSegment, MacroscopicNetwork, NetworkBuilder, Node};
pub use segment_type::{LinkSegmentType, ModeAccess, merge_mode_access};
