//! Driving session: one level, its state, the undo slot and the animation gate.
//!
//! The rules engine answers instantly, but the renderer animates every
//! accepted transition. The session refuses new commands until the renderer
//! reports the previous transition has settled, and refuses moves once the
//! level is solved.

use crate::completion;
use crate::error::{InvalidLevel, LoadError};
use crate::geometry::Direction;
use crate::level::{Level, LevelDescription};
use crate::rules::{self, BlockReason, MoveOutcome};
use crate::state::GameState;
use crate::undo::UndoLog;

/// Why the session turned a command away before it reached the engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rejection {
    /// The previous transition is still animating.
    Settling,
    /// The level is solved; play is frozen until reload.
    Solved,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Attempt {
    Rejected(Rejection),
    Resolved(MoveOutcome),
}

#[derive(Debug)]
pub struct Session {
    level: Level,
    state: GameState,
    undo: UndoLog,
    settling: bool,
}

impl Session {
    /// Validate `description` and start play at its initial state.
    ///
    /// # Errors
    ///
    /// Any [`InvalidLevel`] found by the validator; no session is created.
    pub fn new(description: &LevelDescription) -> Result<Self, InvalidLevel> {
        Ok(Self::from_level(Level::from_description(description)?))
    }

    /// Parse, validate and start play.
    ///
    /// # Errors
    ///
    /// See [`Level::from_json`].
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(Self::from_level(Level::from_json(json)?))
    }

    #[must_use]
    pub fn from_level(level: Level) -> Self {
        let state = GameState::initial(&level);
        if state.completed {
            log::info!("level {} is solved at load", level.number());
        }
        Self {
            level,
            state,
            undo: UndoLog::new(),
            settling: false,
        }
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.settling
    }

    fn gate(&self) -> Option<Rejection> {
        if self.settling {
            Some(Rejection::Settling)
        } else if self.state.completed {
            Some(Rejection::Solved)
        } else {
            None
        }
    }

    /// Try to move the actor. A rejected attempt changes nothing, not even
    /// the facing or the undo slot.
    pub fn attempt_move(&mut self, direction: Direction) -> Attempt {
        if let Some(rejection) = self.gate() {
            log::debug!("move {direction} rejected: {rejection:?}");
            return Attempt::Rejected(rejection);
        }

        let outcome = rules::resolve_move(&mut self.state, &self.level, direction);
        if let MoveOutcome::Moved(record) = outcome {
            self.undo.record_move(record);
            self.settling = true;
            if completion::is_complete(&self.state, &self.level) {
                self.state.completed = true;
                log::info!(
                    "level {} solved in {} moves",
                    self.level.number(),
                    self.state.move_count
                );
            }
        }
        Attempt::Resolved(outcome)
    }

    /// Same as [`Session::attempt_move`] for a raw wire code. Codes that are
    /// not a direction resolve to a no-op block without turning the actor.
    pub fn attempt_move_code(&mut self, code: u8) -> Attempt {
        if let Some(rejection) = self.gate() {
            log::debug!("direction code {code} rejected: {rejection:?}");
            return Attempt::Rejected(rejection);
        }
        match Direction::from_code(code) {
            Some(direction) => self.attempt_move(direction),
            None => {
                log::debug!("ignoring unknown direction code {code}");
                Attempt::Resolved(MoveOutcome::Blocked(BlockReason::UnknownDirection))
            }
        }
    }

    /// Take back the last move. Returns whether anything was undone.
    pub fn undo(&mut self) -> bool {
        if self.gate().is_some() {
            return false;
        }
        let undone = self.undo.undo(&mut self.state);
        if undone {
            self.settling = true;
        }
        undone
    }

    /// Whether every goal is covered. Does not touch the session.
    #[must_use]
    pub fn check_completion(&self) -> bool {
        completion::is_complete(&self.state, &self.level)
    }

    #[must_use]
    pub fn satisfied_goals(&self) -> usize {
        completion::satisfied_goals(&self.state, &self.level)
    }

    /// Renderer signal: the last transition finished animating.
    pub fn animation_settled(&mut self) {
        self.settling = false;
    }

    /// Restart the current level from scratch.
    pub fn reload(&mut self) {
        self.state = GameState::initial(&self.level);
        self.undo.clear();
        self.settling = false;
        log::info!("reloaded level {}", self.level.number());
    }
}
