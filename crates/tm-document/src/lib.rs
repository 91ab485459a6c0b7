//! `tm-document` — reading and writing the layer documents of the tm
//! framework.
//!
//! Documents come in three layers, read strictly in dependency order:
//!
//! | Layer   | Document           | References                                   |
//! |---------|--------------------|----------------------------------------------|
//! | network | [`NetworkDocument`] | nothing outside itself                      |
//! | zoning  | [`ZoningDocument`]  | network nodes, link segments, modes         |
//! | demand  | [`DemandDocument`]  | network modes, zoning zones, its own config |
//!
//! Cross-references are document-id strings.  Each reader resolves them
//! through its own `IdRegistry` set, seeded from the layers before it; a
//! dangling or duplicate id aborts the read.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tm_document::{DocumentWriter, ProjectReader, ReaderSettings, WriterSettings};
//!
//! let project = ProjectReader::new(ReaderSettings { sync_ids_on_read: true })
//!     .read_files(net_path, Some(zoning_path), Some(demand_path))?;
//! let writer = DocumentWriter::new(WriterSettings::default())?;
//! let net_doc = writer.write_network(&project.network);
//! ```

pub mod document;
pub mod error;
pub mod json;
pub mod reader;
pub mod settings;
pub mod writer;


pub use document::{DemandDocument, NetworkDocument, ZoningDocument};
pub use error::{DocumentError, DocumentResult};
pub use json::{read_json, write_json};
pub use reader::{DemandReader, NetworkReader, Project, ProjectReader, ZoningReader};
pub use settings::{IdMapping, ReaderSettings, WriterSettings};
pub use writer::{DocumentWriter, write_od_csv, write_od_csv_to};
