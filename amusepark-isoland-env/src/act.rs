//! Action for [IsolandEnv](crate::IsolandEnv)
use crate::meta::ArrowId;
use amusepark_core::Act;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Action for [IsolandEnv](crate::IsolandEnv): the id of the arrow to move.
pub struct IsolandAct {
    /// Id of the arrow.
    pub arrow: ArrowId,
}

impl IsolandAct {
    /// Selects arrow `arrow`.
    pub fn new(arrow: ArrowId) -> Self {
        Self { arrow }
    }
}

impl Act for IsolandAct {
    fn len(&self) -> usize {
        1
    }
}

impl From<usize> for IsolandAct {
    fn from(arrow: usize) -> Self {
        Self { arrow }
    }
}
