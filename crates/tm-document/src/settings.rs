//! Reader and writer settings.
//!
//! Both structs deserialize with every field optional, so a settings file
//! only needs the keys it changes:
//!
//! ```json
//! { "matrix_encoding": "row", "decimal_places": 2 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use tm_core::Entity;
use tm_demand::{CodecSettings, MatrixEncodingKind, NumberFormat};

use crate::{DocumentError, DocumentResult};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Overwrite every document id with its internal id once a layer has
    /// been read and the next layer has been seeded from it.
    pub sync_ids_on_read: bool,
}

/// Which identifier a writer emits for each entity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdMapping {
    /// The entity's document id, verbatim.
    #[default]
    DocumentId,
    /// The decimal form of the entity's internal id.
    InternalId,
}

impl IdMapping {
    pub fn map<E: Entity>(self, entity: &E) -> String {
        match self {
            IdMapping::DocumentId => entity.doc_id().to_owned(),
            IdMapping::InternalId => entity.internal_id().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterSettings {
    pub id_mapping:            IdMapping,
    pub matrix_encoding:       MatrixEncodingKind,
    pub origin_separator:      String,
    pub destination_separator: String,
    pub decimal_separator:     char,
    pub decimal_places:        usize,
}

impl Default for WriterSettings {
    fn default() -> Self {
        let codec = CodecSettings::default();
        Self {
            id_mapping:            IdMapping::default(),
            matrix_encoding:       MatrixEncodingKind::default(),
            origin_separator:      codec.origin_separator,
            destination_separator: codec.destination_separator,
            decimal_separator:     codec.number.decimal_separator,
            decimal_places:        codec.number.decimal_places,
        }
    }
}

impl WriterSettings {
    pub fn from_json_str(text: &str) -> DocumentResult<Self> {
        let settings: Self = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_path(path: &Path) -> DocumentResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Reject settings that would produce an undecodable matrix.
    pub fn validate(&self) -> DocumentResult<()> {
        if self.origin_separator.is_empty() || self.destination_separator.is_empty() {
            return Err(DocumentError::InvalidSettings("matrix separators must not be empty".into()));
        }
        let clashes = |sep: &str| sep.contains(self.decimal_separator);
        if clashes(&self.origin_separator) || clashes(&self.destination_separator) {
            return Err(DocumentError::InvalidSettings(format!(
                "decimal separator {:?} also appears in a matrix separator",
                self.decimal_separator
            )));
        }
        Ok(())
    }

    pub fn codec(&self) -> CodecSettings {
        CodecSettings {
            origin_separator:      self.origin_separator.clone(),
            destination_separator: self.destination_separator.clone(),
            number: NumberFormat {
                decimal_separator: self.decimal_separator,
                decimal_places:    self.decimal_places,
            },
        }
    }
}
