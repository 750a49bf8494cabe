//! Configuration of [IsolandEnv](super::IsolandEnv).
use crate::scenario::Scenario;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// Configurations of [`IsolandEnv`](super::IsolandEnv).
pub struct IsolandEnvConfig {
    pub(super) scenario: Scenario,
    #[serde(default)]
    pub(super) max_steps: Option<usize>,
    #[serde(default)]
    pub(super) render: bool,
    #[serde(default = "default_colored")]
    pub(super) colored: bool,
}

fn default_colored() -> bool {
    true
}

impl Default for IsolandEnvConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::config_0(),
            max_steps: None,
            render: false,
            colored: true,
        }
    }
}

impl IsolandEnvConfig {
    /// Sets the scenario.
    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = scenario;
        self
    }

    /// Truncates episodes after `max_steps` steps.
    pub fn max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Renders the grid to stdout after every reset and step.
    pub fn render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Enables ANSI colors in rendering.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Constructs [`IsolandEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let rdr = BufReader::new(File::open(path)?);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(config)
    }

    /// Saves [`IsolandEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
