//! Load-time failures. Rejected moves are outcomes, not errors.

use thiserror::Error;

use crate::geometry::Position;

/// A level description broke one of the invariants the engine relies on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidLevel {
    #[error("{field} must be between 1 and {max}, got {value}")]
    Dimension {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("{field} at {position} lies outside the {width}x{height} grid")]
    OutOfBounds {
        field: String,
        position: Position,
        width: u32,
        height: u32,
    },

    #[error("{field} has an empty color tag")]
    EmptyColor { field: String },

    /// Goal colors and colored crate colors are not the same multiset.
    #[error("color {color} appears on {crates} crate(s) but {goals} goal(s)")]
    ColorMismatch {
        color: String,
        crates: usize,
        goals: usize,
    },

    #[error("{first} and {second} both occupy {position}")]
    Overlap {
        first: String,
        second: String,
        position: Position,
    },
}

/// Anything that can go wrong turning JSON into a playable level.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("level JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid level: {0}")]
    Invalid(#[from] InvalidLevel),
}
