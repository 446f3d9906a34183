//! Level descriptions as they arrive over the wire, and the validated,
//! immutable [`Level`] the rules engine plays on.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidLevel, LoadError};
use crate::geometry::Position;
use crate::validate;

/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 32;

/// Color tag such as `#FF0000`. Normalised to upper case so authoring case
/// never decides whether a crate matches a goal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Color(String);

impl Color {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(tag.trim().to_ascii_uppercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Color {
    fn from(tag: String) -> Self {
        Self::new(&tag)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A movable block. `color == None` is a neutral crate.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Crate {
    pub position: Position,
    #[serde(default)]
    pub color: Option<Color>,
}

impl Crate {
    #[must_use]
    pub fn new(position: Position, color: Option<Color>) -> Self {
        Self { position, color }
    }
}

/// A target cell that wants a crate of `color`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Goal {
    pub position: Position,
    pub color: Color,
}

/// Level as authored: `{ number, width, height, walls, crates,
/// playerStartPosition, endPositions }`. Unvalidated.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescription {
    #[serde(default)]
    pub number: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub walls: Vec<Position>,
    #[serde(default)]
    pub crates: Vec<Crate>,
    pub player_start_position: Position,
    #[serde(default)]
    pub end_positions: Vec<Goal>,
}

impl LevelDescription {
    /// Parse a single level from JSON without validating it.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not a level description.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Validated level. Immutable for the whole play session.
#[derive(Clone, Debug)]
pub struct Level {
    number: u32,
    width: u32,
    height: u32,
    walls: HashSet<Position>,
    crates: Vec<Crate>,
    start: Position,
    goals: Vec<Goal>,
}

impl Level {
    /// Validate `description` and build the playable level from it.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidLevel`] the validator finds.
    pub fn from_description(description: &LevelDescription) -> Result<Self, InvalidLevel> {
        if let Err(err) = validate::validate(description) {
            log::warn!("rejecting level {}: {err}", description.number);
            return Err(err);
        }

        let level = Self {
            number: description.number,
            width: description.width,
            height: description.height,
            walls: description.walls.iter().copied().collect(),
            crates: description.crates.clone(),
            start: description.player_start_position,
            goals: description.end_positions.clone(),
        };
        log::info!(
            "loaded level {} ({}x{}, {} crates, {} goals)",
            level.number,
            level.width,
            level.height,
            level.crates.len(),
            level.goals.len()
        );
        Ok(level)
    }

    /// Parse and validate in one go.
    ///
    /// # Errors
    ///
    /// [`LoadError::Parse`] for malformed JSON, [`LoadError::Invalid`] for a
    /// well-formed description that breaks a level invariant.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let description = LevelDescription::from_json(json)?;
        Ok(Self::from_description(&description)?)
    }

    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Crates in their starting positions, in identity order.
    #[must_use]
    pub fn crates(&self) -> &[Crate] {
        &self.crates
    }

    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Wall cells in row-major order.
    #[must_use]
    pub fn walls(&self) -> Vec<Position> {
        let mut walls: Vec<Position> = self.walls.iter().copied().collect();
        walls.sort_by_key(|p| (p.y, p.x));
        walls
    }

    #[must_use]
    pub fn start(&self) -> Position {
        self.start
    }

    #[must_use]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && (pos.x as u32) < self.width && pos.y >= 0 && (pos.y as u32) < self.height
    }

    #[must_use]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }
}

/// Index of the crate standing on `pos`, if any.
#[must_use]
pub fn crate_at(crates: &[Crate], pos: Position) -> Option<usize> {
    crates.iter().position(|c| c.position == pos)
}
