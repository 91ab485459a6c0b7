//! JSON file helpers for documents and settings.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::DocumentResult;

/// Read any document type from a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> DocumentResult<T> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Write `document` to `path` as pretty-printed JSON, replacing any existing
/// file.
pub fn write_json<T: Serialize>(path: &Path, document: &T) -> DocumentResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
