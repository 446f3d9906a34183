//! Mutable per-session state: the bulldozer and the crates it has pushed.

use crate::completion;
use crate::geometry::{Direction, Position};
use crate::level::{Crate, Level};

/// The bulldozer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Actor {
    pub position: Position,
    pub facing: Direction,
}

/// Snapshot handed to the renderer after every accepted transition.
///
/// Crate order is fixed at load time and is the crate's identity.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    pub actor: Actor,
    pub crates: Vec<Crate>,
    pub completed: bool,
    pub move_count: u32,
}

impl GameState {
    /// Fresh state at the level's start: actor facing down, no moves made.
    /// A level authored already solved starts out completed.
    #[must_use]
    pub fn initial(level: &Level) -> Self {
        let mut state = Self {
            actor: Actor {
                position: level.start(),
                facing: Direction::Down,
            },
            crates: level.crates().to_vec(),
            completed: false,
            move_count: 0,
        };
        state.completed = completion::is_complete(&state, level);
        state
    }
}
