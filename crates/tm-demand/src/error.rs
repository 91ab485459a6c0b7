use thiserror::Error;

use tm_core::CoreError;

/// Dimension problems found while decoding a matrix.
#[derive(Debug, Error, PartialEq)]
pub enum MatrixShapeError {
    #[error("raw matrix has {count} values, which is not a square number")]
    NotSquare { count: usize },

    /// `row` is 1-based, in document order.
    #[error("row {row} has {columns} columns, expected {expected}")]
    RowLength { row: usize, columns: usize, expected: usize },

    #[error("matrix spans {found} zones but the zoning has {expected}")]
    ZoneCountMismatch { expected: usize, found: usize },

    #[error("{found} values do not fill a {size}×{size} matrix")]
    ValueCount { size: usize, found: usize },

    /// `row` is 1-based, in document order.
    #[error("row {row} repeats origin {origin:?}")]
    DuplicateOrigin { origin: String, row: usize },

    #[error("rows cover {found} of {expected} origins")]
    MissingOrigins { expected: usize, found: usize },

    #[error("cell ({origin:?}, {destination:?}) is given more than once")]
    DuplicateCell { origin: String, destination: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum DemandError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("malformed OD matrix: {0}")]
    MalformedMatrix(#[from] MatrixShapeError),

    #[error("invalid OD matrix value {0:?}")]
    InvalidValue(String),

    #[error("matrix separators must not be empty")]
    EmptySeparator,

    #[error("mode pcu factor must be positive, got {0}")]
    InvalidPcu(f64),

    #[error("multiple OD matrices for mode {mode:?} and time period {time_period:?}")]
    MultipleMatrices { mode: String, time_period: String },

    #[error("cannot attribute demand of mode {mode:?} to one user class: {candidates} candidates")]
    AmbiguousUserClass { mode: String, candidates: usize },

    #[error("invalid time {0:?}: expected HH:MM or HH:MM:SS")]
    TimeFormat(String),

    #[error("unknown duration unit {0:?}")]
    UnknownDurationUnit(String),
}

pub type DemandResult<T> = Result<T, DemandError>;
