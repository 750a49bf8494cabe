//! Static map layouts of the arrow puzzle.
use crate::{error::IsolandError, meta::Direction};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// A direction sign, `(row, col, heading)`.
pub type SignSpec = (usize, usize, Direction);

/// An arrow, `((goal_row, goal_col), (start_row, start_col, start_heading))`.
/// The id of the arrow is its index in [`Scenario::arrows`].
pub type ArrowSpec = ((usize, usize), (usize, usize, Direction));

/// Optimal actions of [`Scenario::config_0`].
pub const OPT_ACTIONS_0: [usize; 16] = [0, 0, 2, 2, 2, 2, 2, 0, 0, 2, 2, 0, 2, 1, 1, 1];

/// Optimal actions of [`Scenario::config_1`].
pub const OPT_ACTIONS_1: [usize; 28] = [
    0, 0, 0, 0, 0, 2, 2, 0, 2, 2, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 1, 2, 1, 1, 1, 1,
];

/// Map layout: grid shape, direction signs, and the goal and start state of
/// every arrow.
///
/// ```
/// use amusepark_isoland_env::{Direction, Scenario};
///
/// let scenario = Scenario::new(3, 3)
///     .sign(0, 2, Direction::Down)
///     .arrow((2, 2), (0, 0, Direction::Right));
/// assert!(scenario.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// `(H, W)`.
    pub shape: (usize, usize),

    /// Direction signs.
    #[serde(default)]
    pub signs: Vec<SignSpec>,

    /// Arrows, in id order.
    pub arrows: Vec<ArrowSpec>,
}

impl Scenario {
    /// An empty `height`×`width` map.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            shape: (height, width),
            signs: vec![],
            arrows: vec![],
        }
    }

    /// Adds a direction sign.
    pub fn sign(mut self, row: usize, col: usize, heading: Direction) -> Self {
        self.signs.push((row, col, heading));
        self
    }

    /// Adds an arrow; its id is the number of arrows added before it.
    pub fn arrow(mut self, goal: (usize, usize), start: (usize, usize, Direction)) -> Self {
        self.arrows.push((goal, start));
        self
    }

    /// Number of arrows.
    pub fn n_arrows(&self) -> usize {
        self.arrows.len()
    }

    /// The 7×8 map with four signs and three arrows, solved by [`OPT_ACTIONS_0`].
    pub fn config_0() -> Self {
        use Direction::*;
        Self::new(7, 8)
            .sign(2, 4, Down)
            .sign(3, 2, Right)
            .sign(4, 1, Right)
            .sign(5, 2, Up)
            .arrow((3, 4), (4, 4, Left))
            .arrow((4, 3), (5, 3, Left))
            .arrow((4, 5), (5, 5, Left))
    }

    /// The 7×8 map with five signs and three arrows, solved by [`OPT_ACTIONS_1`].
    pub fn config_1() -> Self {
        use Direction::*;
        Self::new(7, 8)
            .sign(1, 3, Right)
            .sign(1, 5, Down)
            .sign(2, 4, Down)
            .sign(4, 4, Up)
            .sign(4, 5, Left)
            .arrow((4, 3), (1, 6, Left))
            .arrow((3, 4), (2, 3, Down))
            .arrow((5, 4), (4, 2, Right))
    }

    /// Built-in scenario `ix` (0 or 1) with its optimal actions.
    pub fn builtin(ix: usize) -> Result<(Self, Vec<usize>), IsolandError> {
        match ix {
            0 => Ok((Self::config_0(), OPT_ACTIONS_0.to_vec())),
            1 => Ok((Self::config_1(), OPT_ACTIONS_1.to_vec())),
            _ => Err(IsolandError::InvalidScenario(format!(
                "no built-in scenario {}",
                ix
            ))),
        }
    }

    /// Checks that the scenario can be stamped onto a grid.
    ///
    /// Every cell must lie on the grid, start cells must be distinct, and a cell
    /// holds at most one landmark (sign or goal).
    pub fn validate(&self) -> Result<(), IsolandError> {
        let (h, w) = self.shape;
        let invalid =
            |msg: String| -> Result<(), IsolandError> { Err(IsolandError::InvalidScenario(msg)) };
        if h == 0 || w == 0 {
            return invalid(format!("empty shape {:?}", self.shape));
        }
        if self.arrows.is_empty() {
            return invalid("no arrows".to_string());
        }
        let inside = |i: usize, j: usize| i < h && j < w;

        let mut landmarks = HashSet::new();
        for &(i, j, _) in self.signs.iter() {
            if !inside(i, j) {
                return invalid(format!("sign at ({}, {}) is off the grid", i, j));
            }
            if !landmarks.insert((i, j)) {
                return invalid(format!("two landmarks at ({}, {})", i, j));
            }
        }

        let mut starts = HashSet::new();
        for (id, &((gi, gj), (si, sj, _))) in self.arrows.iter().enumerate() {
            if !inside(gi, gj) {
                return invalid(format!("goal of arrow {} is off the grid", id));
            }
            if !inside(si, sj) {
                return invalid(format!("start of arrow {} is off the grid", id));
            }
            if !landmarks.insert((gi, gj)) {
                return invalid(format!("two landmarks at ({}, {})", gi, gj));
            }
            if !starts.insert((si, sj)) {
                return invalid(format!("two arrows start at ({}, {})", si, sj));
            }
        }
        Ok(())
    }

    /// Constructs [`Scenario`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let rdr = BufReader::new(File::open(path)?);
        let scenario = serde_yaml::from_reader(rdr)?;
        Ok(scenario)
    }

    /// Saves [`Scenario`] as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
