//! Error types for tm-document.

use thiserror::Error;

use tm_core::CoreError;
use tm_demand::DemandError;
use tm_network::NetworkError;
use tm_zoning::ZoningError;

/// Errors raised while reading or writing layer documents.
///
/// Every variant aborts the current read or write; there is no partial
/// result.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Zoning(#[from] ZoningError),

    #[error(transparent)]
    Demand(#[from] DemandError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// A layer was supplied without the layer it is derived from.
    #[error("{layer} layer requires a {parent} layer to be read first")]
    MissingParentLayer { layer: &'static str, parent: &'static str },

    #[error("invalid writer settings: {0}")]
    InvalidSettings(String),
}

/// Alias for `Result<T, DocumentError>`.
pub type DocumentResult<T> = Result<T, DocumentError>;
