//! Single-slot undo.
//!
//! Only the most recent move can be taken back, and taking it back empties
//! the slot, so an undo is never itself undoable.

use crate::geometry::Position;
use crate::state::{Actor, GameState};

/// The crate a move pushed and where it stood before.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CrateMove {
    pub index: usize,
    pub from: Position,
}

/// Everything needed to reverse one successful move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct UndoRecord {
    /// Actor position and facing before the move.
    pub actor: Actor,
    pub crate_move: Option<CrateMove>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct UndoLog {
    last: Option<UndoRecord>,
}

impl UndoLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever was retained with `record`.
    pub fn record_move(&mut self, record: UndoRecord) {
        self.last = Some(record);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.last.is_some()
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Reverse the retained move on `state`. Returns `false` and leaves
    /// `state` alone when there is nothing to undo.
    pub fn undo(&mut self, state: &mut GameState) -> bool {
        let Some(record) = self.last.take() else {
            return false;
        };

        state.actor = record.actor;
        if let Some(CrateMove { index, from }) = record.crate_move {
            if let Some(c) = state.crates.get_mut(index) {
                c.position = from;
            }
        }
        state.move_count = state.move_count.saturating_sub(1);
        state.completed = false;

        log::debug!("undid move, actor back at {}", record.actor.position);
        true
    }
}
