//! Hull painting robot.
//!
//! Request/response controller: every time the core is about to read, the
//! robot reports the colour under it and receives two answers, the colour to
//! paint and which way to turn.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::ControllerError;
use crate::grid::{Facing, Point};
use crate::intcode::{Machine, Port, Protocol};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    #[default]
    Black,
    White,
}

impl TryFrom<i64> for Color {
    type Error = ControllerError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Color::Black),
            1 => Ok(Color::White),
            value => Err(ControllerError::Unexpected { what: "colour", value }),
        }
    }
}

impl From<Color> for i64 {
    fn from(c: Color) -> i64 {
        c as i64
    }
}

#[derive(Debug, Default, Clone)]
pub struct Robot {
    pos: Point,
    facing: Facing,
    hull: HashMap<Point, Color>,
}

impl Robot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Robot whose starting panel is `color`. A white start counts as painted.
    pub fn starting_on(color: Color) -> Self {
        let mut robot = Self::default();
        if color == Color::White {
            robot.hull.insert(robot.pos, color);
        }
        robot
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Colour under the robot; unpainted panels are black.
    pub fn color(&self) -> Color {
        self.hull.get(&self.pos).copied().unwrap_or_default()
    }

    /// Paints the current panel, turns (0 = left, 1 = right) and steps forward.
    pub fn apply(&mut self, paint: i64, turn: i64) -> Result<(), ControllerError> {
        let color = Color::try_from(paint)?;
        let facing = match turn {
            0 => self.facing.turn_left(),
            1 => self.facing.turn_right(),
            value => return Err(ControllerError::Unexpected { what: "turn", value }),
        };
        self.hull.insert(self.pos, color);
        self.facing = facing;
        self.pos = self.pos + self.facing.delta();
        trace!(?color, pos = ?self.pos, facing = ?self.facing, "robot moved");
        Ok(())
    }

    /// Drives the robot until the core halts. Returns the number of moves.
    pub fn drive(&mut self, port: &Port) -> Result<usize, ControllerError> {
        let mut moves = 0;
        while port.wait_ready() {
            port.send(self.color().into()).map_err(|_| ControllerError::Closed("colour request"))?;
            let paint = port.recv().ok_or(ControllerError::Closed("paint colour"))?;
            let turn = port.recv().ok_or(ControllerError::Closed("turn"))?;
            self.apply(paint, turn)?;
            moves += 1;
        }
        debug!(moves, painted = self.painted(), "robot finished");
        Ok(moves)
    }

    /// Number of panels painted at least once.
    pub fn painted(&self) -> usize {
        self.hull.len()
    }

    /// Draws the visited area, `#` for white panels.
    pub fn render(&self) -> String {
        let Some((min, max)) = bounds(self.hull.keys().copied()) else {
            return String::new();
        };
        let mut out = String::new();
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                let white = self.hull.get(&Point::new(x, y)) == Some(&Color::White);
                out.push(if white { '#' } else { ' ' });
            }
            out.push('\n');
        }
        out
    }
}

fn bounds(points: impl Iterator<Item = Point>) -> Option<(Point, Point)> {
    points.fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((lo, hi)) => Some((
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )),
    })
}

/// Runs a painting program with the robot starting on `start`.
pub fn paint(machine: Machine, start: Color) -> Result<Robot, ControllerError> {
    let (handle, port) = machine.spawn(Protocol::Interactive)?;
    let mut robot = Robot::starting_on(start);
    let driven = robot.drive(&port);
    drop(port);
    let joined = handle.join();
    driven?;
    joined?;
    Ok(robot)
}
