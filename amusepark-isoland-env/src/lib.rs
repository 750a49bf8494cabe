//! The arrow-repositioning puzzle ("isoland") for amusepark.
//!
//! The map is a small grid with direction signs and one goal marker per arrow.
//! An action picks an arrow, which moves one cell along its heading, pushing
//! any arrows in the way. Moving onto a sign turns the arrow to the sign's
//! direction. The episode ends with reward 1 once every arrow rests on its
//! own goal.
//!
//! Here is an example of solving the built-in scenario with its known solution.
//!
//! ```
//! use anyhow::Result;
//! use amusepark_core::{Configurable, Env as _, Policy};
//! use amusepark_isoland_env::{
//!     IsolandEnv, IsolandEnvConfig, Scenario, ScriptedPolicy, ScriptedPolicyConfig,
//!     OPT_ACTIONS_0,
//! };
//!
//! fn main() -> Result<()> {
//!     let config = IsolandEnvConfig::default().scenario(Scenario::config_0());
//!     let mut env = IsolandEnv::build(&config, 0)?;
//!     let mut policy = ScriptedPolicy::build(ScriptedPolicyConfig {
//!         actions: OPT_ACTIONS_0.to_vec(),
//!     });
//!
//!     let mut obs = env.reset()?;
//!     let mut total = 0.0;
//!     for _ in 0..OPT_ACTIONS_0.len() {
//!         let act = policy.sample(&obs);
//!         let (step, _) = env.step(&act)?;
//!         total += step.reward;
//!         obs = step.obs;
//!     }
//!     assert_eq!(total, 1.0);
//!     Ok(())
//! }
//! ```
mod act;
pub mod engine;
mod env;
pub mod error;
pub mod grid;
pub mod meta;
mod obs;
pub mod policy;
pub mod render;
pub mod scenario;
pub use act::IsolandAct;
pub use engine::{Arrow, ArrowPuzzle, Outcome};
pub use env::{IsolandEnv, IsolandEnvConfig, NullInfo};
pub use error::IsolandError;
pub use grid::{ArrowCell, CellView, Grid, Landmark, Position};
pub use meta::{ArrowId, Direction, Feature};
pub use obs::IsolandObs;
pub use policy::{RandomPolicy, RandomPolicyConfig, ScriptedPolicy, ScriptedPolicyConfig};
pub use scenario::{Scenario, OPT_ACTIONS_0, OPT_ACTIONS_1};
