//! Regression scenarios played on small ASCII maps.

#[cfg(test)]
mod tests {
    use crate::geometry::{Direction, Position};
    use crate::level::{Color, Crate, Goal, LevelDescription};
    use crate::rules::{BlockReason, MoveOutcome};
    use crate::session::{Attempt, Rejection, Session};

    const RED: &str = "#FF0000";
    const BLUE: &str = "#0000FF";

    /// `#` wall, `@` actor, `r`/`b` red/blue crate, `R`/`B` red/blue goal,
    /// `o` neutral crate, `.` floor.
    fn parse(map: &[&str]) -> LevelDescription {
        let mut desc = LevelDescription {
            number: 1,
            width: map[0].len() as u32,
            height: map.len() as u32,
            walls: Vec::new(),
            crates: Vec::new(),
            player_start_position: Position::default(),
            end_positions: Vec::new(),
        };
        for (y, row) in map.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Position::new(x as i32, y as i32);
                let color = |tag: &str| Some(Color::new(tag));
                match ch {
                    '#' => desc.walls.push(pos),
                    '@' => desc.player_start_position = pos,
                    'r' => desc.crates.push(Crate::new(pos, color(RED))),
                    'b' => desc.crates.push(Crate::new(pos, color(BLUE))),
                    'o' => desc.crates.push(Crate::new(pos, None)),
                    'R' => desc.end_positions.push(Goal {
                        position: pos,
                        color: Color::new(RED),
                    }),
                    'B' => desc.end_positions.push(Goal {
                        position: pos,
                        color: Color::new(BLUE),
                    }),
                    _ => {}
                }
            }
        }
        desc
    }

    /// Helper: print the board for debugging.
    fn dump(session: &Session) {
        let state = session.state();
        let level = session.level();
        for y in 0..level.height() as i32 {
            let row: String = (0..level.width() as i32)
                .map(|x| {
                    let pos = Position::new(x, y);
                    if state.actor.position == pos {
                        '@'
                    } else if state.crates.iter().any(|c| c.position == pos) {
                        'x'
                    } else if level.is_wall(pos) {
                        '#'
                    } else if level.goals().iter().any(|g| g.position == pos) {
                        '_'
                    } else {
                        '.'
                    }
                })
                .collect();
            eprintln!("y={y:2}: {row}");
        }
    }

    fn play(session: &mut Session, moves: &[Direction]) {
        for &dir in moves {
            session.attempt_move(dir);
            session.animation_settled();
        }
    }

    #[test]
    fn push_onto_matching_goal_completes() {
        let mut desc = parse(&["####", "#@r#", "#..#", "####"]);
        desc.walls.retain(|p| *p != Position::new(3, 1));
        desc.end_positions.push(Goal {
            position: Position::new(3, 1),
            color: Color::new(RED),
        });
        let mut session = Session::new(&desc).unwrap();

        let attempt = session.attempt_move(Direction::Right);
        assert!(matches!(attempt, Attempt::Resolved(MoveOutcome::Moved(_))));
        assert_eq!(session.state().crates[0].position, Position::new(3, 1));
        assert_eq!(session.state().actor.position, Position::new(2, 1));
        assert!(session.check_completion());
        assert!(session.state().completed);
    }

    #[test]
    fn push_into_wall_is_blocked_but_turns_actor() {
        let map = ["#####", "#@o##", "#rR.#", "#####"];
        let mut session = Session::new(&parse(&map)).unwrap();

        let attempt = session.attempt_move(Direction::Right);
        assert_eq!(
            attempt,
            Attempt::Resolved(MoveOutcome::Blocked(BlockReason::Wall))
        );
        assert_eq!(session.state().crates[0].position, Position::new(2, 1));
        assert_eq!(session.state().actor.position, Position::new(1, 1));
        assert_eq!(session.state().actor.facing, Direction::Right);
    }

    #[test]
    fn push_into_second_crate_is_blocked() {
        let map = [".......", ".@oo...", "..r.R.."];
        let mut session = Session::new(&parse(&map)).unwrap();

        let attempt = session.attempt_move(Direction::Right);
        assert_eq!(
            attempt,
            Attempt::Resolved(MoveOutcome::Blocked(BlockReason::CrateCollision))
        );
        assert_eq!(session.state().crates[0].position, Position::new(2, 1));
        assert_eq!(session.state().crates[1].position, Position::new(3, 1));
        assert_eq!(session.state().actor.position, Position::new(1, 1));
    }

    #[test]
    fn crate_only_counts_on_its_own_color() {
        let map = ["#######", "#@bR.B#", "#r....#", "#######"];
        let mut session = Session::new(&parse(&map)).unwrap();

        play(&mut session, &[Direction::Right]);
        dump(&session);
        assert_eq!(session.state().crates[0].position, Position::new(3, 1));
        assert_eq!(session.satisfied_goals(), 0);

        play(&mut session, &[Direction::Right, Direction::Right]);
        dump(&session);
        assert_eq!(session.state().crates[0].position, Position::new(5, 1));
        assert_eq!(session.satisfied_goals(), 1);
        assert!(!session.check_completion());
    }

    #[test]
    fn solve_two_goals_then_freeze() {
        let map = ["#######", "#.B.R.#", "#.b.r.#", "#..@..#", "#######"];
        let mut session = Session::new(&parse(&map)).unwrap();

        play(&mut session, &[Direction::Left, Direction::Up]);
        assert_eq!(session.state().crates[0].position, Position::new(2, 1));
        assert_eq!(session.satisfied_goals(), 1);
        assert!(!session.state().completed);

        play(
            &mut session,
            &[Direction::Down, Direction::Right, Direction::Right, Direction::Up],
        );
        dump(&session);
        assert_eq!(session.state().crates[1].position, Position::new(4, 1));
        assert!(session.state().completed);
        assert_eq!(session.state().move_count, 6);

        assert_eq!(
            session.attempt_move(Direction::Down),
            Attempt::Rejected(Rejection::Solved)
        );
    }
}
