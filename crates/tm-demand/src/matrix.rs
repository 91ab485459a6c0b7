//! Dense origin-destination matrices.
//!
//! # Layout
//!
//! An `OdMatrix` of size `n` is a row-major `Vec<f64>` of `n × n` cells.  The
//! origin is the row and the destination the column; both are indexed by
//! `ZoneId`, so the matrix size must equal the zoning's OD zone count.
//!
//! Values are demand rates in pcu/hour and are never negative.

use std::collections::BTreeMap;

use tm_core::{ModeId, TimePeriodId, ZoneId};

use crate::{DemandResult, MatrixShapeError};

#[derive(Clone, Debug, PartialEq)]
pub struct OdMatrix {
    size:   usize,
    values: Vec<f64>,
}

impl OdMatrix {
    /// An all-zero `size × size` matrix.
    pub fn zeros(size: usize) -> Self {
        Self { size, values: vec![0.0; size * size] }
    }

    /// Build from row-major `values`.
    ///
    /// # Errors
    ///
    /// [`MatrixShapeError::ValueCount`] if `values.len() != size * size`.
    pub fn from_row_major(size: usize, values: Vec<f64>) -> DemandResult<Self> {
        if values.len() != size * size {
            return Err(MatrixShapeError::ValueCount { size, found: values.len() }.into());
        }
        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, origin: ZoneId, destination: ZoneId) -> f64 {
        self.values[origin.index() * self.size + destination.index()]
    }

    #[inline]
    pub fn set(&mut self, origin: ZoneId, destination: ZoneId, value: f64) {
        self.values[origin.index() * self.size + destination.index()] = value;
    }

    /// One origin's row.
    pub fn row(&self, origin: ZoneId) -> &[f64] {
        let start = origin.index() * self.size;
        &self.values[start..start + self.size]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        // chunks_exact(0) panics; an empty matrix has no rows anyway.
        self.values.chunks_exact(self.size.max(1))
    }

    /// `(origin, destination, value)` for every non-zero cell, row-major.
    pub fn non_zero(&self) -> impl Iterator<Item = (ZoneId, ZoneId, f64)> + '_ {
        let n = self.size;
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .map(move |(i, &v)| (ZoneId((i / n) as u32), ZoneId((i % n) as u32), v))
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Multiply every cell by `factor` in place.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.values {
            *v *= factor;
        }
    }
}

/// All OD matrices of a demand layer, at most one per `(mode, time period)`.
#[derive(Clone, Debug, Default)]
pub struct OdDemands {
    matrices: BTreeMap<(ModeId, TimePeriodId), OdMatrix>,
}

impl OdDemands {
    pub fn get(&self, mode: ModeId, time_period: TimePeriodId) -> Option<&OdMatrix> {
        self.matrices.get(&(mode, time_period))
    }

    pub fn contains(&self, mode: ModeId, time_period: TimePeriodId) -> bool {
        self.matrices.contains_key(&(mode, time_period))
    }

    /// Insert a matrix for a pair that has none yet.  Returns the matrix back
    /// unchanged if the pair is already populated.
    pub fn try_insert(
        &mut self,
        mode: ModeId,
        time_period: TimePeriodId,
        matrix: OdMatrix,
    ) -> Result<(), OdMatrix> {
        use std::collections::btree_map::Entry;
        match self.matrices.entry((mode, time_period)) {
            Entry::Occupied(_) => Err(matrix),
            Entry::Vacant(slot) => {
                slot.insert(matrix);
                Ok(())
            }
        }
    }

    /// Matrices in `(mode, time period)` order.
    pub fn iter(&self) -> impl Iterator<Item = (ModeId, TimePeriodId, &OdMatrix)> + '_ {
        self.matrices.iter().map(|(&(m, t), od)| (m, t, od))
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}
