//! Policies for [IsolandEnv](crate::IsolandEnv).
use crate::{meta::ArrowId, IsolandAct, IsolandEnv, IsolandObs};
use amusepark_core::{Configurable, Policy};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Configuration of [`ScriptedPolicy`].
pub struct ScriptedPolicyConfig {
    /// Arrow ids, in the order they are played.
    pub actions: Vec<ArrowId>,
}

/// Plays a fixed sequence of actions, e.g., a known solution.
///
/// Once the sequence is exhausted, the last action is repeated.
pub struct ScriptedPolicy {
    actions: Vec<ArrowId>,
    cursor: usize,
}

impl ScriptedPolicy {
    /// Number of actions played since the last reset.
    pub fn n_played(&self) -> usize {
        self.cursor
    }
}

impl Policy<IsolandEnv> for ScriptedPolicy {
    fn sample(&mut self, _obs: &IsolandObs) -> IsolandAct {
        let ix = self.cursor.min(self.actions.len().saturating_sub(1));
        self.cursor += 1;
        self.actions.get(ix).copied().unwrap_or(0).into()
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl Configurable<IsolandEnv> for ScriptedPolicy {
    type Config = ScriptedPolicyConfig;

    fn build(config: Self::Config) -> Self {
        Self {
            actions: config.actions,
            cursor: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Configuration of [`RandomPolicy`].
pub struct RandomPolicyConfig {
    /// Number of arrows.
    pub n_acts: usize,

    /// Random seed.
    pub seed: u64,
}

/// Picks an arrow uniformly at random.
pub struct RandomPolicy {
    n_acts: usize,
    rng: fastrand::Rng,
}

impl Policy<IsolandEnv> for RandomPolicy {
    fn sample(&mut self, _obs: &IsolandObs) -> IsolandAct {
        self.rng.usize(..self.n_acts.max(1)).into()
    }
}

impl Configurable<IsolandEnv> for RandomPolicy {
    type Config = RandomPolicyConfig;

    fn build(config: Self::Config) -> Self {
        let rng = fastrand::Rng::new();
        rng.seed(config.seed);
        Self {
            n_acts: config.n_acts,
            rng,
        }
    }
}
