//! Reading the three layers in dependency order.

use std::path::Path;

use tracing::debug;

use tm_core::SyncDocIds;
use tm_demand::Demands;
use tm_network::MacroscopicNetwork;
use tm_zoning::Zoning;

use crate::document::{DemandDocument, NetworkDocument, ZoningDocument};
use crate::json::read_json;
use crate::{DemandReader, DocumentError, DocumentResult, NetworkReader, ReaderSettings, ZoningReader};

/// The model built from one set of layer documents.
#[derive(Clone, Debug)]
pub struct Project {
    pub network: MacroscopicNetwork,
    pub zoning:  Option<Zoning>,
    pub demands: Option<Demands>,
}

/// Drives the network, zoning and demand readers.
///
/// Each layer seeds the registries of the layers after it before its own
/// document ids are (optionally) synchronised, so later documents keep
/// resolving the ids they were written with.
#[derive(Clone, Debug, Default)]
pub struct ProjectReader {
    settings: ReaderSettings,
}

impl ProjectReader {
    pub fn new(settings: ReaderSettings) -> Self {
        Self { settings }
    }

    /// # Errors
    ///
    /// [`DocumentError::MissingParentLayer`] for a demand document without a
    /// zoning document, plus anything the layer readers raise.
    pub fn read(
        &self,
        network_doc: &NetworkDocument,
        zoning_doc: Option<&ZoningDocument>,
        demand_doc: Option<&DemandDocument>,
    ) -> DocumentResult<Project> {
        if demand_doc.is_some() && zoning_doc.is_none() {
            return Err(DocumentError::MissingParentLayer { layer: "demand", parent: "zoning" });
        }

        let mut network = NetworkReader::new().read(network_doc)?;
        let Some(zoning_doc) = zoning_doc else {
            self.sync(&mut network);
            return Ok(Project { network, zoning: None, demands: None });
        };

        let zoning_reader = ZoningReader::seeded(&network)?;
        let mut demand_reader = DemandReader::new();
        demand_reader.seed_network(&network)?;
        self.sync(&mut network);

        let mut zoning = zoning_reader.read(&network, zoning_doc)?;
        demand_reader.seed_zoning(&zoning)?;
        self.sync(&mut zoning);

        let demands = match demand_doc {
            Some(doc) => {
                let mut demands = demand_reader.read(&network, &zoning, doc)?;
                self.sync(&mut demands);
                Some(demands)
            }
            None => None,
        };
        Ok(Project { network, zoning: Some(zoning), demands })
    }

    /// Like [`read`](Self::read), loading each document from a JSON file.
    pub fn read_files(
        &self,
        network: &Path,
        zoning: Option<&Path>,
        demand: Option<&Path>,
    ) -> DocumentResult<Project> {
        if demand.is_some() && zoning.is_none() {
            return Err(DocumentError::MissingParentLayer { layer: "demand", parent: "zoning" });
        }
        let network_doc: NetworkDocument = read_json(network)?;
        let zoning_doc: Option<ZoningDocument> = zoning.map(read_json::<ZoningDocument>).transpose()?;
        let demand_doc: Option<DemandDocument> = demand.map(read_json::<DemandDocument>).transpose()?;
        self.read(&network_doc, zoning_doc.as_ref(), demand_doc.as_ref())
    }

    fn sync<M: SyncDocIds>(&self, model: &mut M) {
        if self.settings.sync_ids_on_read {
            let changed = model.sync_doc_ids();
            debug!(changed, "synchronised document ids");
        }
    }
}
