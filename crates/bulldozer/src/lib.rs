//! Crate-pushing puzzle rules engine.
//!
//! A bulldozer pushes colored crates onto matching goals. The engine is pure:
//! it resolves one directional command at a time against a validated level and
//! never touches rendering, timers or storage. [`Game`] is the thin
//! `wasm-bindgen` surface the browser renderer drives.

pub mod completion;
pub mod error;
pub mod geometry;
pub mod level;
pub mod rules;
pub mod session;
pub mod state;
pub mod store;
pub mod undo;
mod validate;

mod scenario_test;

pub use error::{InvalidLevel, LoadError};
pub use geometry::{Direction, Position};
pub use level::{Color, Crate, Goal, Level, LevelDescription};
pub use rules::{BlockReason, MoveOutcome};
pub use session::{Attempt, Rejection, Session};
pub use state::{Actor, GameState};
pub use store::{LevelPack, LevelStore};
pub use undo::{UndoLog, UndoRecord};

use wasm_bindgen::prelude::*;

/// What happened to a move command, as seen from JS.
#[wasm_bindgen]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveResult {
    /// Turned away by the session: still animating, or already solved.
    Rejected = 0,
    /// Reached the engine but nothing moved; the actor may have turned.
    Blocked = 1,
    Walked = 2,
    Pushed = 3,
}

impl From<Attempt> for MoveResult {
    fn from(attempt: Attempt) -> Self {
        match attempt {
            Attempt::Rejected(_) => Self::Rejected,
            Attempt::Resolved(MoveOutcome::Blocked(_)) => Self::Blocked,
            Attempt::Resolved(outcome) if outcome.pushed_crate().is_some() => Self::Pushed,
            Attempt::Resolved(MoveOutcome::Moved(_)) => Self::Walked,
        }
    }
}

fn flatten(positions: impl IntoIterator<Item = Position>) -> Vec<i32> {
    positions.into_iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Browser-facing game: a level pack plus the session on the current level.
/// Coordinate lists are flat `[x0, y0, x1, y1, ...]` arrays.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Game {
    pack: LevelPack,
    session: Session,
}

#[wasm_bindgen]
impl Game {
    /// Start a single level from its JSON description.
    #[wasm_bindgen(constructor)]
    pub fn new(level_json: &str) -> Result<Game, JsError> {
        let description = LevelDescription::from_json(level_json)?;
        let session = Session::new(&description)?;
        Ok(Self {
            pack: LevelPack::new(vec![description]),
            session,
        })
    }

    /// Start a JSON array of levels at `number`, or at the first level when
    /// `number` is not in the pack.
    pub fn from_pack(pack_json: &str, number: u32) -> Result<Game, JsError> {
        let pack = LevelPack::from_json(pack_json)?;
        let description = pack
            .level(number)
            .or_else(|| pack.first())
            .ok_or_else(|| JsError::new("level pack is empty"))?;
        let session = Session::new(description)?;
        Ok(Self { pack, session })
    }

    /// Advance to the next level in the pack. `Ok(false)` after the last one.
    pub fn next_level(&mut self) -> Result<bool, JsError> {
        let Some(description) = self.pack.next_after(self.session.level().number()) else {
            return Ok(false);
        };
        self.session = Session::new(description)?;
        Ok(true)
    }

    /// Direction codes: 0 up, 1 right, 2 down, 3 left.
    pub fn attempt_move(&mut self, direction: u8) -> MoveResult {
        self.session.attempt_move_code(direction).into()
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn check_completion(&self) -> bool {
        self.session.check_completion()
    }

    pub fn animation_settled(&mut self) {
        self.session.animation_settled();
    }

    pub fn reload(&mut self) {
        self.session.reload();
    }

    pub fn level_number(&self) -> u32 {
        self.session.level().number()
    }

    pub fn width(&self) -> u32 {
        self.session.level().width()
    }

    pub fn height(&self) -> u32 {
        self.session.level().height()
    }

    pub fn actor_x(&self) -> i32 {
        self.session.state().actor.position.x
    }

    pub fn actor_y(&self) -> i32 {
        self.session.state().actor.position.y
    }

    pub fn facing(&self) -> u8 {
        self.session.state().actor.facing as u8
    }

    pub fn move_count(&self) -> u32 {
        self.session.state().move_count
    }

    pub fn completed(&self) -> bool {
        self.session.state().completed
    }

    pub fn can_undo(&self) -> bool {
        self.session.can_undo()
    }

    pub fn satisfied_goals(&self) -> u32 {
        self.session.satisfied_goals() as u32
    }

    pub fn walls(&self) -> Vec<i32> {
        flatten(self.session.level().walls())
    }

    /// Crate positions in crate identity order.
    pub fn crate_positions(&self) -> Vec<i32> {
        flatten(self.session.state().crates.iter().map(|c| c.position))
    }

    /// `None` for a neutral crate or an index past the end.
    pub fn crate_color(&self, index: usize) -> Option<String> {
        self.session
            .state()
            .crates
            .get(index)
            .and_then(|c| c.color.as_ref())
            .map(ToString::to_string)
    }

    pub fn goal_positions(&self) -> Vec<i32> {
        flatten(self.session.level().goals().iter().map(|g| g.position))
    }

    pub fn goal_color(&self, index: usize) -> Option<String> {
        self.session
            .level()
            .goals()
            .get(index)
            .map(|g| g.color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Border walls on a 5x3 grid, one red crate two pushes from its goal.
    const LEVEL: &str = r##"{
        "number": 1,
        "width": 5,
        "height": 3,
        "walls": [
            {"x": 0, "y": 0}, {"x": 1, "y": 0}, {"x": 2, "y": 0}, {"x": 3, "y": 0}, {"x": 4, "y": 0},
            {"x": 0, "y": 2}, {"x": 1, "y": 2}, {"x": 2, "y": 2}, {"x": 3, "y": 2}, {"x": 4, "y": 2}
        ],
        "crates": [{"position": {"x": 1, "y": 1}, "color": "#FF0000"}],
        "playerStartPosition": {"x": 0, "y": 1},
        "endPositions": [{"position": {"x": 3, "y": 1}, "color": "#FF0000"}]
    }"##;

    fn game(json: &str) -> Game {
        match Game::new(json) {
            Ok(game) => game,
            Err(_) => panic!("level should load"),
        }
    }

    #[test]
    fn snapshot_accessors() {
        let game = game(LEVEL);
        assert_eq!(game.level_number(), 1);
        assert_eq!((game.width(), game.height()), (5, 3));
        assert_eq!((game.actor_x(), game.actor_y()), (0, 1));
        assert_eq!(game.facing(), Direction::Down as u8);
        assert_eq!(game.crate_positions(), vec![1, 1]);
        assert_eq!(game.crate_color(0).as_deref(), Some("#FF0000"));
        assert_eq!(game.crate_color(1), None);
        assert_eq!(game.goal_positions(), vec![3, 1]);
        assert_eq!(game.goal_color(0).as_deref(), Some("#FF0000"));
        assert_eq!(game.walls().len(), 20);
        assert_eq!(&game.walls()[..4], &[0, 0, 1, 0]);
    }

    #[test]
    fn play_through_to_completion() {
        let mut game = game(LEVEL);
        assert_eq!(game.attempt_move(Direction::Up as u8), MoveResult::Blocked);
        assert_eq!(game.facing(), Direction::Up as u8);

        assert_eq!(game.attempt_move(Direction::Right as u8), MoveResult::Pushed);
        assert_eq!(game.attempt_move(Direction::Right as u8), MoveResult::Rejected);
        game.animation_settled();

        assert_eq!(game.attempt_move(Direction::Right as u8), MoveResult::Pushed);
        game.animation_settled();
        assert!(game.completed());
        assert!(game.check_completion());
        assert_eq!(game.satisfied_goals(), 1);
        assert_eq!(game.move_count(), 2);
        assert_eq!(game.attempt_move(Direction::Left as u8), MoveResult::Rejected);

        game.reload();
        assert_eq!(game.crate_positions(), vec![1, 1]);
        assert!(!game.completed());
        assert!(!game.can_undo());
    }

    #[test]
    fn walking_and_undo() {
        let mut game = game(LEVEL);
        game.attempt_move(Direction::Right as u8);
        game.animation_settled();
        assert_eq!(game.attempt_move(Direction::Left as u8), MoveResult::Walked);
        game.animation_settled();
        assert!(game.undo());
        game.animation_settled();
        assert_eq!((game.actor_x(), game.actor_y()), (1, 1));
        assert_eq!(game.facing(), Direction::Right as u8);
        assert!(!game.undo());
        assert_eq!(game.attempt_move(7), MoveResult::Blocked);
    }

    #[test]
    fn pack_advances_through_levels() {
        let second = LEVEL.replace("\"number\": 1", "\"number\": 4");
        let pack = format!("[{second}, {LEVEL}]");
        let Ok(mut game) = Game::from_pack(&pack, 99) else {
            panic!("pack should load");
        };
        assert_eq!(game.level_number(), 1);
        assert!(matches!(game.next_level(), Ok(true)));
        assert_eq!(game.level_number(), 4);
        assert!(matches!(game.next_level(), Ok(false)));
        assert_eq!(game.level_number(), 4);
    }
}
