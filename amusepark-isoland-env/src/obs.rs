//! Observation for [IsolandEnv](crate::IsolandEnv)
use crate::{error::IsolandError, grid::Grid};
use amusepark_core::Obs;
use std::convert::TryFrom;

/// Both grid layers as meta values, see [`crate::meta`].
///
/// The shape is `[H, W, 2]` in row-major order: `[i, j, 0]` is the landmark
/// and `[i, j, 1]` the arrow of cell `(i, j)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolandObs {
    shape: [usize; 3],
    metas: Vec<u32>,
}

impl IsolandObs {
    /// `[H, W, 2]`.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Flat meta values.
    pub fn metas(&self) -> &[u32] {
        &self.metas
    }

    /// The meta value at `(row, col)` of `layer` (0: landmarks, 1: arrows).
    pub fn get(&self, row: usize, col: usize, layer: usize) -> u32 {
        let [_, w, d] = self.shape;
        self.metas[(row * w + col) * d + layer]
    }

    /// Parses the observation back into a grid, validating every value.
    pub fn to_grid(&self) -> Result<Grid, IsolandError> {
        Grid::from_metas(self.shape[0], self.shape[1], &self.metas)
    }
}

impl TryFrom<&Grid> for IsolandObs {
    type Error = IsolandError;

    fn try_from(grid: &Grid) -> Result<Self, Self::Error> {
        Ok(Self {
            shape: [grid.height(), grid.width(), 2],
            metas: grid.metas()?,
        })
    }
}

impl Obs for IsolandObs {
    fn len(&self) -> usize {
        1
    }
}
