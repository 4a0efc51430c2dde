use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::error::ControllerError;
use crate::scaffold::map::ScaffoldMap;

/// One token of a movement routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Forward(u32),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Left => f.write_str("L"),
            Command::Right => f.write_str("R"),
            Command::Forward(n) => write!(f, "{n}"),
        }
    }
}

/// Comma-separated form accepted by the robot.
pub fn render(commands: &[Command]) -> String {
    commands.iter().map(Command::to_string).collect::<Vec<_>>().join(",")
}

/// Walks the scaffold from the robot: straight on while possible, otherwise
/// turn onto the scaffold to the right or left, until a dead end. Stops early
/// if a cell is reached again with the same facing.
pub fn trace(map: &ScaffoldMap) -> Result<Vec<Command>, ControllerError> {
    let (mut pos, mut facing) = map.robot().ok_or(ControllerError::NoRobot)?;
    let mut seen = HashSet::from([(pos, facing)]);
    let mut path = Vec::new();

    loop {
        let ahead = pos + facing.delta();
        if map.is_scaffold(ahead) {
            pos = ahead;
            match path.last_mut() {
                Some(Command::Forward(n)) => *n += 1,
                _ => path.push(Command::Forward(1)),
            }
            if !seen.insert((pos, facing)) {
                break;
            }
        } else if map.is_scaffold(pos + facing.turn_right().delta()) {
            facing = facing.turn_right();
            path.push(Command::Right);
        } else if map.is_scaffold(pos + facing.turn_left().delta()) {
            facing = facing.turn_left();
            path.push(Command::Left);
        } else {
            break;
        }
    }

    debug!(moves = path.len(), end = ?pos, "path traced");
    Ok(path)
}

#[cfg(test)]
pub(crate) const SAMPLE: &str = "\
#######...#####
#.....#...#...#
#.....#...#...#
......#...#...#
......#...###.#
......#.....#.#
^########...#.#
......#.#...#.#
......#########
........#...#..
....#########..
....#...#......
....#...#......
....#...#......
....#####......
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::map::ascii;

    #[test]
    fn sample_path() {
        let map = ScaffoldMap::parse(&ascii(SAMPLE)).unwrap();
        let path = trace(&map).unwrap();
        assert_eq!(
            render(&path),
            "R,8,R,8,R,4,R,4,R,8,L,6,L,2,R,4,R,4,R,8,R,8,R,8,L,6,L,2"
        );
    }

    #[test]
    fn leading_straight_run() {
        let map = ScaffoldMap::parse(&ascii(">##\n..#\n")).unwrap();
        assert_eq!(
            trace(&map).unwrap(),
            vec![Command::Forward(2), Command::Right, Command::Forward(1)]
        );
    }

    #[test]
    fn closed_loop_terminates() {
        let map = ScaffoldMap::parse(&ascii("^##\n#.#\n###\n")).unwrap();
        assert_eq!(render(&trace(&map).unwrap()), "R,2,R,2,R,2,R,2");
    }

    #[test]
    fn missing_robot() {
        let map = ScaffoldMap::parse(&ascii("###\n")).unwrap();
        assert!(matches!(trace(&map), Err(ControllerError::NoRobot)));
    }
}
