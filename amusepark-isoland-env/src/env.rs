mod config;
use super::{IsolandAct, IsolandObs};
use crate::{engine::ArrowPuzzle, render::render};
use amusepark_core::{
    record::{Record, RecordValue},
    Env, Info, Step,
};
use anyhow::Result;
pub use config::IsolandEnvConfig;
use log::{debug, info};
use std::{
    convert::TryFrom,
    io::{self, IsTerminal, Write},
};

/// Empty struct.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NullInfo;

impl Info for NullInfo {}

/// The arrow-repositioning puzzle as an environment.
///
/// The action is the id of the arrow to move, the observation the
/// two-layer meta grid. Reward is 1 on the step that solves the puzzle, 0
/// otherwise.
pub struct IsolandEnv {
    engine: ArrowPuzzle,

    // Truncate episodes after this number of steps
    max_steps: Option<usize>,

    // Render after every step
    render: bool,

    colored: bool,
}

impl IsolandEnv {
    /// Number of actions, i.e., arrows.
    pub fn n_actions(&self) -> usize {
        self.engine.n_arrows()
    }

    /// Shape of the observation, `[H, W, 2]`.
    pub fn obs_shape(&self) -> [usize; 3] {
        let grid = self.engine.grid();
        [grid.height(), grid.width(), 2]
    }

    /// The largest meta value an observation can hold.
    pub fn obs_high(&self) -> u32 {
        crate::meta::META_OFFSET + crate::meta::ARROW_FEATURE_NUM * self.n_actions() as u32 - 1
    }

    /// The underlying puzzle.
    pub fn engine(&self) -> &ArrowPuzzle {
        &self.engine
    }

    /// Writes the rendered grid to `w`.
    pub fn render_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        self.render_with(w, self.colored)
    }

    /// Writes the rendered grid to stdout. Colors are dropped when stdout is
    /// not a terminal.
    pub fn render(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let colored = self.colored && stdout.is_terminal();
        self.render_with(&mut stdout.lock(), colored)
    }

    fn render_with<W: Write>(&self, w: &mut W, colored: bool) -> io::Result<()> {
        let text = render(self.engine.grid(), self.engine.step_counter(), colored);
        w.write_all(text.as_bytes())
    }

    /// Releases resources. Nothing to release.
    pub fn close(&mut self) {}

    fn maybe_render(&self) -> Result<()> {
        if self.render {
            self.render()?;
        }
        Ok(())
    }
}

impl Env for IsolandEnv {
    type Config = IsolandEnvConfig;
    type Obs = IsolandObs;
    type Act = IsolandAct;
    type Info = NullInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized,
    {
        let engine = ArrowPuzzle::new(config.scenario.clone())?;
        let (h, w) = config.scenario.shape;
        debug!(
            "Built isoland environment: {}x{}, {} arrows, seed = {}",
            h,
            w,
            engine.n_arrows(),
            seed
        );
        Ok(Self {
            engine,
            max_steps: config.max_steps,
            render: config.render,
            colored: config.colored,
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        let obs = IsolandObs::try_from(self.engine.reset()?)?;
        self.maybe_render()?;
        Ok(obs)
    }

    fn step(&mut self, act: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        let outcome = self.engine.step(act.arrow)?;
        let n_steps = self.engine.step_counter();
        let is_truncated =
            !outcome.done && self.max_steps.map_or(false, |max_steps| n_steps >= max_steps);
        if outcome.done {
            info!("Solved in {} steps", n_steps);
        }
        self.maybe_render()?;

        let step = Step::new(
            IsolandObs::try_from(self.engine.grid())?,
            *act,
            outcome.reward,
            outcome.done,
            is_truncated,
            NullInfo,
            None,
        );
        let record = Record::from_slice(&[
            ("n_steps", RecordValue::Scalar(n_steps as f32)),
            ("arrow", RecordValue::Scalar(act.arrow as f32)),
            (
                "board",
                RecordValue::String(render(self.engine.grid(), n_steps, false)),
            ),
        ]);

        Ok((step, record))
    }

    fn step_with_reset(&mut self, act: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        let (mut step, record) = self.step(act)?;
        if step.is_done() {
            step.init_obs = Some(self.reset()?);
        }
        Ok((step, record))
    }

    fn reset_with_index(&mut self, _ix: usize) -> Result<Self::Obs> {
        self.reset()
    }
}
