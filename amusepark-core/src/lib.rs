#![warn(missing_docs)]
//! Base components of amusepark puzzle environments.
//!
//! An environment ([`Env`]) emits observations ([`Obs`]) and receives actions ([`Act`]).
//! Every interaction step produces a [`Step`] object, carrying reward, termination
//! flags and additional information ([`Info`]), together with a [`Record`](record::Record)
//! of values worth logging. A [`Policy`] maps observations to actions, and an
//! [`Evaluator`] runs episodes of a policy on an environment.
pub mod error;
pub mod record;
pub mod util;

mod base;
pub use base::{Act, Configurable, Env, Info, Obs, Policy, Step};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator};
