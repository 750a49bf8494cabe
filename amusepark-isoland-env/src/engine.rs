//! State transitions of the arrow puzzle.
use crate::{
    error::IsolandError,
    grid::{ArrowCell, Grid, Landmark, Position},
    meta::{self, ArrowId, Direction},
    scenario::Scenario,
};
use log::{debug, trace};
use std::convert::TryFrom;

/// Registry entry of an arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arrow {
    /// Current heading.
    pub heading: Direction,
    /// Current cell.
    pub position: Position,
}

/// Result of [`ArrowPuzzle::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    /// `1.0` if the puzzle is solved, `0.0` otherwise.
    pub reward: f32,
    /// All arrows rest on their own goals.
    pub done: bool,
}

/// Grid, arrow registry and the move rules of the puzzle.
///
/// An action picks an arrow, which moves one cell along its own heading.
/// An arrow in the way is pushed first, recursively, so a chain of arrows
/// advances together unless its far end is blocked by the border. Moving onto
/// a direction sign turns the arrow to the sign's direction.
#[derive(Clone, Debug)]
pub struct ArrowPuzzle {
    scenario: Scenario,
    grid: Grid,
    // Indexed by arrow id.
    arrows: Vec<Arrow>,
    step_counter: usize,
}

impl ArrowPuzzle {
    /// Builds the puzzle in the initial state of `scenario`.
    pub fn new(scenario: Scenario) -> Result<Self, IsolandError> {
        let grid = Self::load(&scenario)?;
        let arrows = registry_from_metas(grid.height(), grid.width(), &grid.metas()?)?;
        Ok(Self {
            scenario,
            grid,
            arrows,
            step_counter: 0,
        })
    }

    /// Stamps signs, goal markers and arrows of `scenario` onto a new grid.
    pub fn load(scenario: &Scenario) -> Result<Grid, IsolandError> {
        scenario.validate()?;
        let (h, w) = scenario.shape;
        let mut grid = Grid::new(h, w);
        for &(i, j, heading) in scenario.signs.iter() {
            grid.set_landmark((i, j), Landmark::Sign(heading));
        }
        for (id, &(goal, (i, j, heading))) in scenario.arrows.iter().enumerate() {
            grid.set_landmark(goal, Landmark::Goal(id));
            grid.set_arrow((i, j), ArrowCell { id, heading });
        }
        Ok(grid)
    }

    /// Restores the initial state and zeroes the step counter.
    pub fn reset(&mut self) -> Result<&Grid, IsolandError> {
        self.grid = Self::load(&self.scenario)?;
        self.rebuild_registry()?;
        self.step_counter = 0;
        debug!("Reset the puzzle ({} arrows)", self.arrows.len());
        Ok(&self.grid)
    }

    /// Rebuilds the arrow registry from the arrow layer of the grid.
    pub fn rebuild_registry(&mut self) -> Result<&[Arrow], IsolandError> {
        let (h, w) = (self.grid.height(), self.grid.width());
        self.arrows = registry_from_metas(h, w, &self.grid.metas()?)?;
        Ok(&self.arrows)
    }

    /// Moves arrow `action` along its heading.
    ///
    /// # Errors
    ///
    /// [`IsolandError::InvalidAction`] if there is no such arrow; the state is
    /// left unchanged.
    pub fn step(&mut self, action: ArrowId) -> Result<Outcome, IsolandError> {
        let heading = self
            .arrows
            .get(action)
            .ok_or(IsolandError::InvalidAction(action))?
            .heading;
        self.move_arrow(action, heading, 0)?;

        let done = self.is_done();
        self.step_counter += 1;
        Ok(Outcome {
            reward: if done { 1.0 } else { 0.0 },
            done,
        })
    }

    /// `true` if every arrow rests on its own goal marker.
    pub fn is_done(&self) -> bool {
        self.arrows
            .iter()
            .enumerate()
            .all(|(id, a)| self.grid.landmark(a.position) == Landmark::Goal(id))
    }

    fn move_arrow(
        &mut self,
        id: ArrowId,
        direction: Direction,
        depth: usize,
    ) -> Result<(), IsolandError> {
        // A chain can push each of the other arrows at most once.
        if depth >= self.arrows.len() {
            return Err(IsolandError::CorruptState(format!(
                "push chain longer than {} arrows",
                self.arrows.len()
            )));
        }

        let position = self.arrows[id].position;
        let next = match self.grid.neighbor(position, direction) {
            Some(next) => next,
            None => {
                trace!("Arrow {} at {:?} hits the border", id, position);
                return Ok(());
            }
        };

        if let Some(occupant) = self.grid.arrow(next) {
            trace!("Arrow {} pushes arrow {} {:?}", id, occupant.id, direction);
            self.move_arrow(occupant.id, direction, depth + 1)?;
            if self.grid.arrow(next).is_some() {
                trace!("Arrow {} is blocked at {:?}", id, position);
                return Ok(());
            }
        }

        let landmark = self.grid.landmark(next);
        let arrow = &mut self.arrows[id];
        if let Landmark::Sign(sign) = landmark {
            arrow.heading = sign;
        }
        arrow.position = next;
        trace!("Arrow {} moves to {:?}, heading {:?}", id, next, arrow.heading);

        self.sync_arrow_layer();
        Ok(())
    }

    // Rewrites the whole arrow layer from the registry.
    fn sync_arrow_layer(&mut self) {
        self.grid.clear_arrows();
        for (id, a) in self.arrows.iter().enumerate() {
            self.grid.set_arrow(
                a.position,
                ArrowCell {
                    id,
                    heading: a.heading,
                },
            );
        }
    }

    /// The current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The arrow registry, indexed by id.
    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Number of arrows.
    pub fn n_arrows(&self) -> usize {
        self.arrows.len()
    }

    /// Number of steps since the last reset.
    pub fn step_counter(&self) -> usize {
        self.step_counter
    }

    /// The scenario the puzzle was built from.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }
}

/// Decodes the arrow layer of raw meta values (see [`Grid::metas`]) into a
/// registry indexed by arrow id.
///
/// # Errors
///
/// [`IsolandError::CorruptState`] if a non-empty value of the arrow layer is
/// not a live arrow, if an id appears twice, or if the ids are not exactly
/// `0..N`.
pub fn registry_from_metas(
    height: usize,
    width: usize,
    metas: &[u32],
) -> Result<Vec<Arrow>, IsolandError> {
    if metas.len() != height * width * 2 {
        return Err(IsolandError::CorruptState(format!(
            "{} values for a {}x{}x2 grid",
            metas.len(),
            height,
            width
        )));
    }

    let mut slots: Vec<Option<Arrow>> = vec![];
    for (ix, &value) in metas.iter().skip(1).step_by(2).enumerate() {
        if value == meta::EMPTY {
            continue;
        }
        let decoded = meta::decode(value);
        let id = match (decoded.is_arrow, decoded.arrow_id) {
            (true, Some(id)) => id,
            _ => {
                return Err(IsolandError::CorruptState(format!(
                    "invalid value in the arrow layer: {}",
                    value
                )))
            }
        };
        // A grid holds at most one arrow per cell.
        if id >= height * width {
            return Err(IsolandError::CorruptState(format!(
                "arrow id {} exceeds the {} cells of the grid",
                id,
                height * width
            )));
        }
        let arrow = Arrow {
            heading: Direction::try_from(decoded.feature)?,
            position: (ix / width, ix % width),
        };
        if slots.len() <= id {
            slots.resize(id + 1, None);
        }
        if slots[id].replace(arrow).is_some() {
            return Err(IsolandError::CorruptState(format!(
                "arrow {} appears twice",
                id
            )));
        }
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(id, a)| {
            a.ok_or_else(|| IsolandError::CorruptState(format!("arrow {} is missing", id)))
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{meta::Direction::*, scenario::OPT_ACTIONS_1};

    fn positions(puzzle: &ArrowPuzzle) -> Vec<Position> {
        puzzle.arrows().iter().map(|a| a.position).collect()
    }

    fn assert_consistent(puzzle: &ArrowPuzzle) {
        let cells = puzzle.grid().arrow_cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), puzzle.n_arrows());
        for (pos, cell) in cells {
            let a = puzzle.arrows()[cell.id];
            assert_eq!(a.position, pos);
            assert_eq!(a.heading, cell.heading);
        }
    }

    #[test]
    fn test_load_stamps_layers() {
        let grid = ArrowPuzzle::load(&Scenario::config_0()).unwrap();
        assert_eq!((grid.height(), grid.width()), (7, 8));
        assert_eq!(grid.landmark((2, 4)), Landmark::Sign(Down));
        assert_eq!(grid.landmark((3, 4)), Landmark::Goal(0));
        assert_eq!(grid.landmark((4, 5)), Landmark::Goal(2));
        assert_eq!(
            grid.arrow((5, 3)),
            Some(ArrowCell {
                id: 1,
                heading: Left
            })
        );
        let metas = grid.metas().unwrap();
        // Layer 2 at (4, 4): arrow 0 heading LEFT.
        assert_eq!(metas[(4 * 8 + 4) * 2 + 1], 9);
    }

    #[test]
    fn test_goal_detection() {
        // Arrow 0 is one cell left of its goal, arrow 1 already on its goal.
        let scenario = Scenario::new(3, 4)
            .arrow((0, 2), (0, 1, Right))
            .arrow((2, 0), (2, 0, Up));
        let mut puzzle = ArrowPuzzle::new(scenario).unwrap();
        assert!(!puzzle.is_done());

        let outcome = puzzle.step(0).unwrap();
        assert!(outcome.done);
        assert_eq!(outcome.reward, 1.0);
        assert_eq!(puzzle.step_counter(), 1);
    }

    #[test]
    fn test_wrong_goal_is_not_done() {
        // Each arrow sits on the other's goal.
        let scenario = Scenario::new(1, 2)
            .arrow((0, 1), (0, 0, Up))
            .arrow((0, 0), (0, 1, Up));
        let puzzle = ArrowPuzzle::new(scenario).unwrap();
        assert!(!puzzle.is_done());
    }

    #[test]
    fn test_push_moves_both() {
        let scenario = Scenario::new(1, 4)
            .arrow((0, 3), (0, 0, Right))
            .arrow((0, 2), (0, 1, Left));
        let mut puzzle = ArrowPuzzle::new(scenario).unwrap();

        puzzle.step(0).unwrap();
        assert_eq!(positions(&puzzle), vec![(0, 1), (0, 2)]);
        // The pushed arrow keeps its own heading.
        assert_eq!(puzzle.arrows()[1].heading, Left);
        assert_consistent(&puzzle);
    }

    #[test]
    fn test_blocked_push_at_border() {
        let scenario = Scenario::new(1, 3)
            .arrow((0, 0), (0, 1, Right))
            .arrow((0, 1), (0, 2, Up));
        let mut puzzle = ArrowPuzzle::new(scenario).unwrap();
        let before = puzzle.grid().clone();

        let outcome = puzzle.step(0).unwrap();
        assert!(!outcome.done);
        assert_eq!(positions(&puzzle), vec![(0, 1), (0, 2)]);
        assert_eq!(puzzle.grid(), &before);
        assert_eq!(puzzle.step_counter(), 1);
    }

    #[test]
    fn test_chain_of_three_free() {
        let scenario = Scenario::new(5, 1)
            .arrow((0, 0), (3, 0, Up))
            .arrow((1, 0), (2, 0, Down))
            .arrow((4, 0), (1, 0, Right));
        let mut puzzle = ArrowPuzzle::new(scenario).unwrap();

        puzzle.step(0).unwrap();
        assert_eq!(positions(&puzzle), vec![(2, 0), (1, 0), (0, 0)]);
        assert_consistent(&puzzle);
    }

    #[test]
    fn test_chain_of_three_blocked() {
        let scenario = Scenario::new(4, 1)
            .arrow((3, 0), (2, 0, Up))
            .arrow((2, 0), (1, 0, Down))
            .arrow((1, 0), (0, 0, Left));
        let mut puzzle = ArrowPuzzle::new(scenario).unwrap();

        puzzle.step(0).unwrap();
        assert_eq!(positions(&puzzle), vec![(2, 0), (1, 0), (0, 0)]);
        assert_consistent(&puzzle);
    }

    #[test]
    fn test_pushed_arrow_is_redirected_by_sign() {
        let scenario = Scenario::new(1, 4)
            .sign(0, 2, Down)
            .arrow((0, 0), (0, 0, Right))
            .arrow((0, 3), (0, 1, Left));
        let mut puzzle = ArrowPuzzle::new(scenario).unwrap();

        puzzle.step(0).unwrap();
        assert_eq!(positions(&puzzle), vec![(0, 1), (0, 2)]);
        assert_eq!(puzzle.arrows()[0].heading, Right);
        assert_eq!(puzzle.arrows()[1].heading, Down);
    }

    #[test]
    fn test_redirect_then_follow_new_heading() {
        let scenario = Scenario::new(3, 3)
            .sign(0, 1, Down)
            .arrow((2, 1), (0, 0, Right));
        let mut puzzle = ArrowPuzzle::new(scenario).unwrap();

        puzzle.step(0).unwrap();
        assert_eq!(
            puzzle.arrows()[0],
            Arrow {
                heading: Down,
                position: (0, 1)
            }
        );
        puzzle.step(0).unwrap();
        assert_eq!(puzzle.arrows()[0].position, (1, 1));
        let outcome = puzzle.step(0).unwrap();
        assert!(outcome.done);
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        for &(start, heading) in [
            ((0, 1), Up),
            ((2, 1), Down),
            ((1, 0), Left),
            ((1, 2), Right),
        ]
        .iter()
        {
            let scenario = Scenario::new(3, 3).arrow((1, 1), (start.0, start.1, heading));
            let mut puzzle = ArrowPuzzle::new(scenario).unwrap();
            let before = puzzle.grid().clone();

            puzzle.step(0).unwrap();
            assert_eq!(puzzle.grid(), &before);
            assert_eq!(
                puzzle.arrows()[0],
                Arrow {
                    heading,
                    position: start
                }
            );
        }
    }

    #[test]
    fn test_invalid_action_keeps_state() {
        let mut puzzle = ArrowPuzzle::new(Scenario::config_0()).unwrap();
        let before = puzzle.grid().clone();

        assert_eq!(puzzle.step(3), Err(IsolandError::InvalidAction(3)));
        assert_eq!(puzzle.grid(), &before);
        assert_eq!(puzzle.step_counter(), 0);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut puzzle = ArrowPuzzle::new(Scenario::config_0()).unwrap();
        let initial = puzzle.grid().clone();
        for &a in [0, 0, 2].iter() {
            puzzle.step(a).unwrap();
        }
        assert_ne!(puzzle.grid(), &initial);

        assert_eq!(puzzle.reset().unwrap(), &initial);
        assert_eq!(puzzle.step_counter(), 0);
        assert_eq!(puzzle.arrows()[0].position, (4, 4));
    }

    #[test]
    fn test_registry_from_metas() {
        let grid = ArrowPuzzle::load(&Scenario::config_1()).unwrap();
        let registry = registry_from_metas(7, 8, &grid.metas().unwrap()).unwrap();
        assert_eq!(
            registry,
            vec![
                Arrow {
                    heading: Left,
                    position: (1, 6)
                },
                Arrow {
                    heading: Down,
                    position: (2, 3)
                },
                Arrow {
                    heading: Right,
                    position: (4, 2)
                },
            ]
        );
    }

    #[test]
    fn test_registry_rejects_corruption() {
        let corrupt = |metas: &[u32]| {
            matches!(
                registry_from_metas(1, 3, metas),
                Err(IsolandError::CorruptState(_))
            )
        };
        // Goal marker in the arrow layer.
        assert!(corrupt(&[0, 6, 0, 5, 0, 0]));
        // Arrow 0 twice.
        assert!(corrupt(&[0, 6, 0, 7, 0, 0]));
        // Arrow 1 without arrow 0.
        assert!(corrupt(&[0, 11, 0, 0, 0, 0]));
        // Sign value in the arrow layer.
        assert!(corrupt(&[0, 6, 0, 3, 0, 0]));
        // Wrong length.
        assert!(corrupt(&[0, 6]));
        assert!(registry_from_metas(1, 3, &[0, 6, 0, 12, 0, 0]).is_ok());
    }

    #[test]
    fn test_registry_rejects_ids_beyond_grid() {
        for &value in [5 + 5 * 40_000_000 + 1, u32::MAX - 1].iter() {
            assert!(matches!(
                registry_from_metas(1, 1, &[0, value]),
                Err(IsolandError::CorruptState(_))
            ));
        }
        // Id 3 cannot exist on a 1x3 grid.
        assert!(matches!(
            registry_from_metas(1, 3, &[0, 6, 0, 11, 0, 21]),
            Err(IsolandError::CorruptState(_))
        ));
    }

    #[test]
    fn test_rebuild_registry_after_steps() {
        let mut puzzle = ArrowPuzzle::new(Scenario::config_1()).unwrap();
        for &a in OPT_ACTIONS_1[..10].iter() {
            puzzle.step(a).unwrap();
        }
        let expected = puzzle.arrows().to_vec();

        assert_eq!(puzzle.rebuild_registry().unwrap(), &expected[..]);
        assert_consistent(&puzzle);
    }

    #[test]
    fn test_push_cycle_is_corrupt_state() {
        let scenario = Scenario::new(1, 3)
            .arrow((0, 2), (0, 0, Right))
            .arrow((0, 0), (0, 2, Left));
        let mut puzzle = ArrowPuzzle::new(scenario).unwrap();
        // The arrow layer claims arrow 0 also sits in front of itself.
        puzzle.grid.set_arrow((0, 1), ArrowCell { id: 0, heading: Right });

        assert!(matches!(
            puzzle.step(0),
            Err(IsolandError::CorruptState(_))
        ));
        assert_eq!(puzzle.step_counter(), 0);
    }
}
