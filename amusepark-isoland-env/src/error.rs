//! Errors of the arrow puzzle.
use thiserror::Error;

/// Errors of the arrow puzzle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IsolandError {
    /// The action refers to an arrow that does not exist.
    #[error("Invalid action: no arrow with id {0}")]
    InvalidAction(usize),

    /// A per-arrow feature slot outside `0..5`.
    #[error("Invalid feature value: {0}")]
    InvalidFeature(u32),

    /// An arrow id too large to be encoded as a meta value.
    #[error("Invalid arrow id: {0}")]
    InvalidArrowId(usize),

    /// A heading value outside `1..=4`.
    #[error("Invalid direction value: {0}")]
    InvalidDirection(u32),

    /// The grid or the arrow registry broke an invariant.
    #[error("Corrupt state: {0}")]
    CorruptState(String),

    /// The scenario cannot be loaded onto a grid.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}
