//! Integer codes ("meta" values) of grid cells.
//!
//! Values below [`META_OFFSET`] are landmark signs: `0` is an empty cell and
//! `1..=4` are the headings UP, RIGHT, DOWN and LEFT. Values at or above the
//! offset describe arrow `i` with feature slot `f`:
//!
//! ```text
//! meta = META_OFFSET + ARROW_FEATURE_NUM * i + f
//! f = 0: goal marker of arrow i (landmark)
//! f = 1..=4: arrow i itself, heading UP..LEFT
//! ```
//!
//! The grid keeps typed cells internally; this encoding is the format of
//! observations.
use crate::error::IsolandError;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Identifier of an arrow, `0..N` for a scenario with `N` arrows.
pub type ArrowId = usize;

/// The first meta value describing an arrow.
pub const META_OFFSET: u32 = 5;

/// Number of feature slots per arrow.
pub const ARROW_FEATURE_NUM: u32 = 5;

/// Meta value of an empty cell.
pub const EMPTY: u32 = 0;

/// Feature slot of a goal marker.
pub const GOAL: u32 = 0;

/// Heading of an arrow or a direction sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    /// Towards row 0.
    Up = 1,
    /// Towards the last column.
    Right = 2,
    /// Towards the last row.
    Down = 3,
    /// Towards column 0.
    Left = 4,
}

impl Direction {
    /// All headings in the order of their values.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The integer value of the heading, `1..=4`.
    pub fn value(self) -> u32 {
        self as u32
    }

    /// Unit offset `(d_row, d_col)`.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Glyph used by the text renderer.
    pub fn symbol(self) -> char {
        match self {
            Direction::Up => '\u{2191}',
            Direction::Right => '\u{2192}',
            Direction::Down => '\u{2193}',
            Direction::Left => '\u{2190}',
        }
    }
}

impl TryFrom<u32> for Direction {
    type Error = IsolandError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Direction::Up),
            2 => Ok(Direction::Right),
            3 => Ok(Direction::Down),
            4 => Ok(Direction::Left),
            v => Err(IsolandError::InvalidDirection(v)),
        }
    }
}

/// Per-arrow feature: the goal marker or the arrow heading a direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Goal marker, slot 0.
    Goal,
    /// The arrow itself, slots 1..=4.
    Heading(Direction),
}

impl Feature {
    /// Feature slot `f` of the encoding.
    pub fn slot(self) -> u32 {
        match self {
            Feature::Goal => GOAL,
            Feature::Heading(d) => d.value(),
        }
    }

    /// Inverse of [`Feature::slot`].
    pub fn from_slot(slot: u32) -> Result<Self, IsolandError> {
        match slot {
            GOAL => Ok(Feature::Goal),
            s if s < ARROW_FEATURE_NUM => Ok(Feature::Heading(Direction::try_from(s)?)),
            s => Err(IsolandError::InvalidFeature(s)),
        }
    }
}

/// A meta value decoded into role, arrow id and feature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// `true` for a live arrow, `false` for a landmark (empty cell, sign or goal).
    pub is_arrow: bool,

    /// The arrow the value refers to; `None` for empty cells and signs.
    pub arrow_id: Option<ArrowId>,

    /// The feature slot, or the sign value for metas below [`META_OFFSET`].
    pub feature: u32,
}

/// Encodes arrow `arrow_id` with feature slot `feature`.
///
/// # Errors
///
/// Fails with [`IsolandError::InvalidFeature`] if `feature >= ARROW_FEATURE_NUM`,
/// and with [`IsolandError::InvalidArrowId`] if the value does not fit in `u32`.
pub fn encode(arrow_id: ArrowId, feature: u32) -> Result<u32, IsolandError> {
    if feature >= ARROW_FEATURE_NUM {
        return Err(IsolandError::InvalidFeature(feature));
    }
    u32::try_from(arrow_id)
        .ok()
        .and_then(|id| id.checked_mul(ARROW_FEATURE_NUM))
        .and_then(|v| v.checked_add(META_OFFSET + feature))
        .ok_or(IsolandError::InvalidArrowId(arrow_id))
}

/// Encodes a typed feature of an arrow.
pub fn encode_feature(arrow_id: ArrowId, feature: Feature) -> Result<u32, IsolandError> {
    encode(arrow_id, feature.slot())
}

/// Decodes a meta value.
pub fn decode(meta: u32) -> Decoded {
    if meta < META_OFFSET {
        return Decoded {
            is_arrow: false,
            arrow_id: None,
            feature: meta,
        };
    }
    let feature = (meta - META_OFFSET) % ARROW_FEATURE_NUM;
    Decoded {
        is_arrow: feature != GOAL,
        arrow_id: Some(((meta - META_OFFSET) / ARROW_FEATURE_NUM) as ArrowId),
        feature,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encode_decode_all_features() {
        for id in 0..4 {
            for f in 0..ARROW_FEATURE_NUM {
                let meta = encode(id, f).unwrap();
                assert!(meta >= META_OFFSET);
                let d = decode(meta);
                assert_eq!(d.arrow_id, Some(id));
                assert_eq!(d.feature, f);
                assert_eq!(d.is_arrow, f != GOAL);
            }
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(encode(0, GOAL).unwrap(), 5);
        assert_eq!(encode(0, Direction::Left.value()).unwrap(), 9);
        assert_eq!(encode(2, Direction::Up.value()).unwrap(), 16);
        assert_eq!(
            encode_feature(1, Feature::Heading(Direction::Down)),
            Ok(13)
        );
    }

    #[test]
    fn test_signs_decode_as_landmarks() {
        for d in Direction::ALL.iter() {
            let decoded = decode(d.value());
            assert!(!decoded.is_arrow);
            assert_eq!(decoded.arrow_id, None);
            assert_eq!(decoded.feature, d.value());
        }
        assert_eq!(decode(EMPTY).feature, EMPTY);
    }

    #[test]
    fn test_invalid_feature() {
        assert_eq!(encode(0, 5), Err(IsolandError::InvalidFeature(5)));
        // The largest id whose heading slots still fit in u32.
        let max_id = ((u32::MAX - META_OFFSET) / ARROW_FEATURE_NUM - 1) as ArrowId;
        assert!(encode(max_id, Direction::Left.value()).is_ok());
        assert_eq!(
            encode(max_id + 2, GOAL),
            Err(IsolandError::InvalidArrowId(max_id + 2))
        );
        assert_eq!(
            encode_feature(usize::MAX, Feature::Goal),
            Err(IsolandError::InvalidArrowId(usize::MAX))
        );
        assert_eq!(Feature::from_slot(7), Err(IsolandError::InvalidFeature(7)));
        assert_eq!(Feature::from_slot(0), Ok(Feature::Goal));
        assert_eq!(
            Feature::from_slot(2),
            Ok(Feature::Heading(Direction::Right))
        );
    }

    #[test]
    fn test_direction_from_value() {
        assert_eq!(Direction::try_from(3), Ok(Direction::Down));
        assert_eq!(
            Direction::try_from(0),
            Err(IsolandError::InvalidDirection(0))
        );
    }
}
