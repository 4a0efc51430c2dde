use std::collections::HashSet;

use crate::error::ControllerError;
use crate::grid::{Facing, Point};
use crate::intcode::NEWLINE;

/// Scaffold layout reconstructed from one camera frame.
#[derive(Debug, Default, Clone)]
pub struct ScaffoldMap {
    scaffold: HashSet<Point>,
    robot: Option<(Point, Facing)>,
}

impl ScaffoldMap {
    /// Builds the map from ASCII codes; a newline ends a row.
    pub fn parse(codes: &[i64]) -> Result<Self, ControllerError> {
        let mut map = Self::default();
        let mut at = Point::default();
        for &code in codes {
            if code == NEWLINE {
                at = Point::new(0, at.y + 1);
                continue;
            }
            let pixel = u8::try_from(code)
                .map_err(|_| ControllerError::Unexpected { what: "camera pixel", value: code })?;
            match pixel {
                b'#' => {
                    map.scaffold.insert(at);
                }
                b'.' | b'X' => {}
                _ => {
                    let facing = Facing::from_ascii(pixel)
                        .ok_or(ControllerError::Unexpected { what: "camera pixel", value: code })?;
                    map.scaffold.insert(at);
                    map.robot = Some((at, facing));
                }
            }
            at.x += 1;
        }
        Ok(map)
    }

    pub fn is_scaffold(&self, p: Point) -> bool {
        self.scaffold.contains(&p)
    }

    pub fn robot(&self) -> Option<(Point, Facing)> {
        self.robot
    }

    pub fn len(&self) -> usize {
        self.scaffold.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scaffold.is_empty()
    }

    /// Scaffold cells whose four neighbours are all scaffold.
    pub fn intersections(&self) -> impl Iterator<Item = Point> + '_ {
        self.scaffold
            .iter()
            .copied()
            .filter(|p| p.neighbours().iter().all(|n| self.is_scaffold(*n)))
    }

    /// Sum of `x * y` over all intersections.
    pub fn alignment(&self) -> i64 {
        self.intersections().map(|p| p.x * p.y).sum()
    }
}

#[cfg(test)]
pub(crate) fn ascii(text: &str) -> Vec<i64> {
    text.bytes().map(i64::from).collect()
}
