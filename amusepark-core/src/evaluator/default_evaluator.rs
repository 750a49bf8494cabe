//! Default implementation of the [`Evaluator`] trait.
//!
//! Runs a fixed number of episodes and reports the average return.
use super::Evaluator;
use crate::{record::Record, Env, Policy};
use anyhow::Result;
use log::info;

/// Runs a specified number of episodes and calculates the average return
/// (cumulative reward) across them.
///
/// Episodes end when the environment reports termination or truncation, so
/// an environment evaluated with a policy that may never solve it should be
/// configured with a step limit.
pub struct DefaultEvaluator<E: Env> {
    n_episodes: usize,
    env: E,
}

impl<E: Env> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        let mut r_total = 0f32;

        for ix in 0..self.n_episodes {
            let mut prev_obs = self.env.reset_with_index(ix)?;
            policy.reset();
            let mut r_episode = 0f32;

            loop {
                let act = policy.sample(&prev_obs);
                let (step, _) = self.env.step(&act)?;
                r_episode += step.reward;
                if step.is_done() {
                    break;
                }
                prev_obs = step.obs;
            }

            info!("Episode {}, return = {}", ix, r_episode);
            r_total += r_episode;
        }

        Ok(Record::from_scalar(
            "Episode return",
            r_total / self.n_episodes.max(1) as f32,
        ))
    }
}

impl<E: Env> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`] building its own environment.
    pub fn new(config: &E::Config, seed: i64, n_episodes: usize) -> Result<Self> {
        Ok(Self {
            n_episodes,
            env: E::build(config, seed)?,
        })
    }

    /// Returns the environment used for evaluation.
    pub fn env(&self) -> &E {
        &self.env
    }
}
