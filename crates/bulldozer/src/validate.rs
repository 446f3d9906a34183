//! Load-time checks on a [`LevelDescription`].
//!
//! Runs once per load. The rules engine assumes every invariant checked here
//! and never re-checks it.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::InvalidLevel;
use crate::geometry::Position;
use crate::level::{Color, LevelDescription, MAX_DIMENSION};

/// Check `desc`, returning the first broken invariant.
///
/// # Errors
///
/// See [`InvalidLevel`] for the individual failures.
pub fn validate(desc: &LevelDescription) -> Result<(), InvalidLevel> {
    check_dimension("width", desc.width)?;
    check_dimension("height", desc.height)?;
    check_bounds(desc)?;
    check_color_tags(desc)?;
    check_color_multisets(desc)?;
    check_overlaps(desc)
}

fn check_dimension(field: &'static str, value: u32) -> Result<(), InvalidLevel> {
    if (1..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(InvalidLevel::Dimension {
            field,
            value,
            max: MAX_DIMENSION,
        })
    }
}

/// Every referenced position, labelled with the field it came from.
fn labelled_positions(desc: &LevelDescription) -> impl Iterator<Item = (String, Position)> + '_ {
    let walls = desc
        .walls
        .iter()
        .enumerate()
        .map(|(i, p)| (format!("walls[{i}]"), *p));
    let crates = desc
        .crates
        .iter()
        .enumerate()
        .map(|(i, c)| (format!("crates[{i}]"), c.position));
    let goals = desc
        .end_positions
        .iter()
        .enumerate()
        .map(|(i, g)| (format!("endPositions[{i}]"), g.position));
    let start = std::iter::once((
        "playerStartPosition".to_owned(),
        desc.player_start_position,
    ));
    walls.chain(crates).chain(goals).chain(start)
}

fn check_bounds(desc: &LevelDescription) -> Result<(), InvalidLevel> {
    let (w, h) = (desc.width as i32, desc.height as i32);
    match labelled_positions(desc)
        .find(|(_, p)| p.x < 0 || p.x >= w || p.y < 0 || p.y >= h)
    {
        Some((field, position)) => Err(InvalidLevel::OutOfBounds {
            field,
            position,
            width: desc.width,
            height: desc.height,
        }),
        None => Ok(()),
    }
}

fn check_color_tags(desc: &LevelDescription) -> Result<(), InvalidLevel> {
    let crate_tags = desc
        .crates
        .iter()
        .enumerate()
        .filter_map(|(i, c)| c.color.as_ref().map(|color| (format!("crates[{i}]"), color)));
    let goal_tags = desc
        .end_positions
        .iter()
        .enumerate()
        .map(|(i, g)| (format!("endPositions[{i}]"), &g.color));

    match crate_tags
        .chain(goal_tags)
        .find(|(_, color)| color.as_str().is_empty())
    {
        Some((field, _)) => Err(InvalidLevel::EmptyColor { field }),
        None => Ok(()),
    }
}

fn check_color_multisets(desc: &LevelDescription) -> Result<(), InvalidLevel> {
    // color -> (crate count, goal count); ordered so the reported color is stable.
    let mut counts: BTreeMap<&Color, (usize, usize)> = BTreeMap::new();
    for color in desc.crates.iter().filter_map(|c| c.color.as_ref()) {
        counts.entry(color).or_default().0 += 1;
    }
    for goal in &desc.end_positions {
        counts.entry(&goal.color).or_default().1 += 1;
    }

    match counts.into_iter().find(|(_, (crates, goals))| crates != goals) {
        Some((color, (crates, goals))) => Err(InvalidLevel::ColorMismatch {
            color: color.to_string(),
            crates,
            goals,
        }),
        None => Ok(()),
    }
}

fn check_overlaps(desc: &LevelDescription) -> Result<(), InvalidLevel> {
    let walls: HashSet<Position> = desc.walls.iter().copied().collect();
    let mut taken: HashMap<Position, String> = HashMap::new();

    for (i, c) in desc.crates.iter().enumerate() {
        let field = format!("crates[{i}]");
        if walls.contains(&c.position) {
            return Err(overlap(field, "a wall", c.position));
        }
        if let Some(first) = taken.get(&c.position) {
            return Err(overlap(first.clone(), &field, c.position));
        }
        taken.insert(c.position, field);
    }

    let start = desc.player_start_position;
    if walls.contains(&start) {
        return Err(overlap("playerStartPosition".into(), "a wall", start));
    }
    if let Some(first) = taken.get(&start) {
        return Err(overlap(first.clone(), "playerStartPosition", start));
    }
    Ok(())
}

fn overlap(first: String, second: &str, position: Position) -> InvalidLevel {
    InvalidLevel::Overlap {
        first,
        second: second.to_owned(),
        position,
    }
}
