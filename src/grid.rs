// grid.rs
use std::ops::Add;

/// Cell on a 2-D grid; `y` grows downwards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn neighbours(self) -> [Point; 4] {
        Facing::ALL.map(|f| self + f.delta())
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Compass facing, in clockwise order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Facing {
    pub const ALL: [Facing; 4] = [Facing::Up, Facing::Right, Facing::Down, Facing::Left];

    #[inline] pub fn turn_left(self) -> Facing { Self::ALL[(self as usize + 3) % 4] }
    #[inline] pub fn turn_right(self) -> Facing { Self::ALL[(self as usize + 1) % 4] }

    pub fn delta(self) -> Point {
        match self {
            Facing::Up => Point::new(0, -1),
            Facing::Right => Point::new(1, 0),
            Facing::Down => Point::new(0, 1),
            Facing::Left => Point::new(-1, 0),
        }
    }

    /// Facing drawn by the camera as `^ > v <`.
    pub fn from_ascii(c: u8) -> Option<Facing> {
        match c {
            b'^' => Some(Facing::Up),
            b'>' => Some(Facing::Right),
            b'v' => Some(Facing::Down),
            b'<' => Some(Facing::Left),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_rights_make_a_circle() {
        let mut f = Facing::Up;
        for expected in [Facing::Right, Facing::Down, Facing::Left, Facing::Up] {
            f = f.turn_right();
            assert_eq!(f, expected);
        }
        assert_eq!(Facing::Up.turn_left(), Facing::Left);
        assert_eq!(Facing::Left.turn_left(), Facing::Down);
    }

    #[test]
    fn steps_and_neighbours() {
        let p = Point::new(2, 3);
        assert_eq!(p + Facing::Up.delta(), Point::new(2, 2));
        assert_eq!(p + Facing::Left.delta(), Point::new(1, 3));
        assert_eq!(
            p.neighbours(),
            [Point::new(2, 2), Point::new(3, 3), Point::new(2, 4), Point::new(1, 3)]
        );
    }
}
