//! Two-layer grid of the arrow puzzle.
use crate::{
    error::IsolandError,
    meta::{self, ArrowId, Direction, Feature, EMPTY},
};
use std::convert::TryFrom;

/// `(row, col)` of a cell.
pub type Position = (usize, usize);

/// Static feature of a cell (layer 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landmark {
    /// Nothing.
    Empty,
    /// Direction sign redirecting arrows moving onto it.
    Sign(Direction),
    /// Goal marker of an arrow.
    Goal(ArrowId),
}

impl Landmark {
    /// Meta value of the landmark.
    pub fn to_meta(self) -> Result<u32, IsolandError> {
        match self {
            Landmark::Empty => Ok(EMPTY),
            Landmark::Sign(d) => Ok(d.value()),
            Landmark::Goal(id) => meta::encode_feature(id, Feature::Goal),
        }
    }

    /// Parses a layer-1 meta value.
    pub fn from_meta(value: u32) -> Result<Self, IsolandError> {
        let decoded = meta::decode(value);
        match (decoded.is_arrow, decoded.arrow_id) {
            (true, _) => Err(IsolandError::CorruptState(format!(
                "arrow value {} in the landmark layer",
                value
            ))),
            (false, Some(id)) => Ok(Landmark::Goal(id)),
            (false, None) if value == EMPTY => Ok(Landmark::Empty),
            (false, None) => Ok(Landmark::Sign(Direction::try_from(value)?)),
        }
    }
}

/// An arrow occupying a cell (layer 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrowCell {
    /// Id of the arrow.
    pub id: ArrowId,
    /// Current heading.
    pub heading: Direction,
}

impl ArrowCell {
    /// Meta value of the arrow.
    pub fn to_meta(self) -> Result<u32, IsolandError> {
        meta::encode_feature(self.id, Feature::Heading(self.heading))
    }

    /// Parses a layer-2 meta value, `EMPTY` being an unoccupied cell.
    pub fn from_meta(value: u32) -> Result<Option<Self>, IsolandError> {
        if value == EMPTY {
            return Ok(None);
        }
        let decoded = meta::decode(value);
        match (decoded.is_arrow, decoded.arrow_id) {
            (true, Some(id)) => Ok(Some(ArrowCell {
                id,
                heading: Direction::try_from(decoded.feature)?,
            })),
            _ => Err(IsolandError::CorruptState(format!(
                "non-arrow value {} in the arrow layer",
                value
            ))),
        }
    }
}

/// What a cell shows, with arrows drawn over landmarks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellView {
    /// An arrow, whatever landmark lies beneath it.
    Arrow {
        /// Id of the arrow.
        id: ArrowId,
        /// Current heading.
        heading: Direction,
    },
    /// A direction sign.
    Sign(Direction),
    /// A free goal marker.
    Goal(ArrowId),
    /// Nothing.
    Empty,
}

/// H×W grid with a landmark layer and an arrow layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    landmarks: Vec<Landmark>,
    arrows: Vec<Option<ArrowCell>>,
}

impl Grid {
    /// An empty grid.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            landmarks: vec![Landmark::Empty; height * width],
            arrows: vec![None; height * width],
        }
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// `true` if `pos` lies on the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.0 < self.height && pos.1 < self.width
    }

    /// The cell next to `pos` in `direction`, or `None` beyond the border.
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (di, dj) = direction.offset();
        let i = pos.0 as isize + di;
        let j = pos.1 as isize + dj;
        if i < 0 || j < 0 {
            return None;
        }
        let next = (i as usize, j as usize);
        if self.contains(next) {
            Some(next)
        } else {
            None
        }
    }

    fn index(&self, pos: Position) -> usize {
        debug_assert!(self.contains(pos));
        pos.0 * self.width + pos.1
    }

    /// The landmark at `pos`.
    pub fn landmark(&self, pos: Position) -> Landmark {
        self.landmarks[self.index(pos)]
    }

    /// The arrow at `pos`, if any.
    pub fn arrow(&self, pos: Position) -> Option<ArrowCell> {
        self.arrows[self.index(pos)]
    }

    pub(crate) fn set_landmark(&mut self, pos: Position, landmark: Landmark) {
        let ix = self.index(pos);
        self.landmarks[ix] = landmark;
    }

    pub(crate) fn set_arrow(&mut self, pos: Position, arrow: ArrowCell) {
        let ix = self.index(pos);
        self.arrows[ix] = Some(arrow);
    }

    pub(crate) fn clear_arrows(&mut self) {
        self.arrows.iter_mut().for_each(|a| *a = None);
    }

    /// Resolved content of the cell at `pos`.
    pub fn cell(&self, pos: Position) -> CellView {
        if let Some(a) = self.arrow(pos) {
            return CellView::Arrow {
                id: a.id,
                heading: a.heading,
            };
        }
        match self.landmark(pos) {
            Landmark::Empty => CellView::Empty,
            Landmark::Sign(d) => CellView::Sign(d),
            Landmark::Goal(id) => CellView::Goal(id),
        }
    }

    /// Occupied cells of the arrow layer in row-major order.
    pub fn arrow_cells(&self) -> impl Iterator<Item = (Position, ArrowCell)> + '_ {
        let width = self.width;
        self.arrows
            .iter()
            .enumerate()
            .filter_map(move |(ix, a)| a.map(|a| ((ix / width, ix % width), a)))
    }

    /// Meta values of both layers, shape `[height, width, 2]` in row-major order.
    ///
    /// # Errors
    ///
    /// Fails with [`IsolandError::InvalidArrowId`] if an id has no meta value.
    pub fn metas(&self) -> Result<Vec<u32>, IsolandError> {
        let mut metas = Vec::with_capacity(self.landmarks.len() * 2);
        for (l, a) in self.landmarks.iter().zip(self.arrows.iter()) {
            metas.push(l.to_meta()?);
            metas.push(a.map_or(Ok(EMPTY), |a| a.to_meta())?);
        }
        Ok(metas)
    }

    /// Parses meta values produced by [`Grid::metas`].
    ///
    /// # Errors
    ///
    /// Fails with [`IsolandError::CorruptState`] if the length does not match the
    /// shape, a landmark cell holds an arrow, or an arrow cell holds anything else.
    pub fn from_metas(height: usize, width: usize, metas: &[u32]) -> Result<Self, IsolandError> {
        if metas.len() != height * width * 2 {
            return Err(IsolandError::CorruptState(format!(
                "{} values for a {}x{}x2 grid",
                metas.len(),
                height,
                width
            )));
        }
        let mut grid = Self::new(height, width);
        for (ix, cell) in metas.chunks(2).enumerate() {
            grid.landmarks[ix] = Landmark::from_meta(cell[0])?;
            grid.arrows[ix] = ArrowCell::from_meta(cell[1])?;
        }
        Ok(grid)
    }
}
