//! Win condition: every goal covered by a crate of its color.

use crate::level::{crate_at, Goal, Level};
use crate::state::GameState;

fn is_satisfied(state: &GameState, goal: &Goal) -> bool {
    crate_at(&state.crates, goal.position)
        .and_then(|i| state.crates[i].color.as_ref())
        .is_some_and(|color| *color == goal.color)
}

/// Number of goals currently covered by a matching crate.
#[must_use]
pub fn satisfied_goals(state: &GameState, level: &Level) -> usize {
    level
        .goals()
        .iter()
        .filter(|goal| is_satisfied(state, goal))
        .count()
}

/// True iff every goal holds a crate of the goal's color. Neutral crates
/// never count. Crates occupy distinct cells, so no crate can satisfy two
/// goals.
#[must_use]
pub fn is_complete(state: &GameState, level: &Level) -> bool {
    level.goals().iter().all(|goal| is_satisfied(state, goal))
}
