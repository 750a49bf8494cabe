//! Policy.
use super::Env;
use anyhow::Result;
use serde::de::DeserializeOwned;
use std::{fs::File, io::BufReader, path::Path};

/// A policy on an environment.
///
/// A policy picks the next action from the current observation. Puzzle
/// solutions are often a fixed sequence of moves, so a policy may be stateful;
/// [`Policy::reset`] is called at the beginning of every episode.
pub trait Policy<E: Env> {
    /// Sample an action given an observation.
    fn sample(&mut self, obs: &E::Obs) -> E::Act;

    /// Prepares the policy for a new episode. Does nothing by default.
    fn reset(&mut self) {}
}

/// An object built from a serializable configuration.
pub trait Configurable<E: Env> {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    fn build(config: Self::Config) -> Self;

    /// Builds the object from the YAML file at `path`.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let rdr = BufReader::new(File::open(path)?);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(Self::build(config))
    }
}
