//! Move resolution: one directional command against one state.
//!
//! The actor turns to face the requested direction, then steps into the next
//! cell if it is free, or pushes the crate standing there one cell further if
//! the cell behind that crate is free. Nothing else ever moves: no chains, no
//! swaps, no stacking. Any failure leaves positions untouched.

use crate::geometry::{Direction, Position};
use crate::level::{crate_at, Level};
use crate::state::GameState;
use crate::undo::{CrateMove, UndoRecord};

/// Why a move did not happen. Informational only: callers treat every
/// reason the same way.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BlockReason {
    /// The actor, or the crate it pushes, would leave the grid.
    OutOfBounds,
    /// The actor, or the crate it pushes, would enter a wall cell.
    Wall,
    /// The pushed crate would run into another crate.
    CrateCollision,
    /// A raw direction code that names no direction. Never produced by
    /// [`resolve_move`]; the session reports it for malformed input.
    UnknownDirection,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    /// Only the actor's facing changed.
    Blocked(BlockReason),
    /// Positions changed; the record reverses exactly this move.
    Moved(UndoRecord),
}

impl MoveOutcome {
    #[must_use]
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }

    /// Whether a crate moved along with the actor.
    #[must_use]
    pub fn pushed_crate(&self) -> Option<usize> {
        match self {
            Self::Moved(record) => record.crate_move.map(|m| m.index),
            Self::Blocked(_) => None,
        }
    }
}

/// Resolve a move in `direction`, mutating `state` in place.
///
/// Facing always becomes `direction`. On success the actor (and at most one
/// crate) advances one cell and the move counter is bumped.
pub fn resolve_move(state: &mut GameState, level: &Level, direction: Direction) -> MoveOutcome {
    let before = state.actor;
    state.actor.facing = direction;

    let target = before.position.step(direction);
    if let Some(reason) = obstacle(level, target) {
        return MoveOutcome::Blocked(reason);
    }

    let crate_move = match crate_at(&state.crates, target) {
        None => None,
        Some(index) => {
            let crate_target = target.step(direction);
            if let Some(reason) = obstacle(level, crate_target) {
                return MoveOutcome::Blocked(reason);
            }
            if crate_at(&state.crates, crate_target).is_some() {
                return MoveOutcome::Blocked(BlockReason::CrateCollision);
            }
            state.crates[index].position = crate_target;
            Some(CrateMove {
                index,
                from: target,
            })
        }
    };

    state.actor.position = target;
    state.move_count = state.move_count.saturating_add(1);

    log::debug!(
        "actor {} -> {} facing {direction}{}",
        before.position,
        target,
        crate_move.map_or(String::new(), |m| format!(", pushed crate {}", m.index))
    );

    MoveOutcome::Moved(UndoRecord {
        actor: before,
        crate_move,
    })
}

/// Static obstacle at `pos`: the grid edge or a wall.
fn obstacle(level: &Level, pos: Position) -> Option<BlockReason> {
    if !level.in_bounds(pos) {
        Some(BlockReason::OutOfBounds)
    } else if level.is_wall(pos) {
        Some(BlockReason::Wall)
    } else {
        None
    }
}
