use std::ops::{Add, Sub};

/// Screen or grid coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(x: {}, y: {})", self.x, self.y)
    }
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

impl Add<Position> for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub<Position> for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from(value: (i32, i32)) -> Self {
        Position::new(value.0, value.1)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }
}

impl From<(i32, i32)> for Size {
    fn from(value: (i32, i32)) -> Self {
        Size::new(value.0, value.1)
    }
}

impl From<(usize, usize)> for Size {
    fn from(value: (usize, usize)) -> Self {
        Size::new(value.0 as i32, value.1 as i32)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rectangle {
    pub start: Position,
    pub size: Size,
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(x:{}, y:{}, width: {}, height: {})",
            self.start.x, self.start.y, self.size.width, self.size.height
        )
    }
}

impl Rectangle {
    pub fn new(start: Position, size: Size) -> Self {
        Self { start, size }
    }

    pub fn from(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(Position::new(x, y), Size::new(width, height))
    }

    pub fn left(&self) -> i32 {
        self.start.x
    }

    pub fn top(&self) -> i32 {
        self.start.y
    }

    /// Exclusive
    pub fn right(&self) -> i32 {
        self.start.x + self.size.width
    }

    /// Exclusive
    pub fn bottom(&self) -> i32 {
        self.start.y + self.size.height
    }

    pub fn is_inside(&self, pos: impl Into<Position>) -> bool {
        let pos = pos.into();
        self.left() <= pos.x && pos.x < self.right() && self.top() <= pos.y && pos.y < self.bottom()
    }

    pub fn is_empty(&self) -> bool {
        self.size.width <= 0 || self.size.height <= 0
    }

    /// Cuts `self` to the area shared with `other`.
    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rectangle::from(left, top, (right - left).max(0), (bottom - top).max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::{Position, Rectangle};

    #[test]
    fn test_is_inside_is_end_exclusive() {
        let r = Rectangle::from(10, 10, 4, 2);
        assert!(r.is_inside((10, 10)));
        assert!(r.is_inside((13, 11)));
        assert!(!r.is_inside((14, 11)));
        assert!(!r.is_inside(Position::new(13, 12)));
        assert!(!r.is_inside((9, 10)));
    }

    #[test]
    fn test_intersect() {
        let a = Rectangle::from(0, 0, 10, 10);
        let b = Rectangle::from(5, 8, 10, 10);
        assert_eq!(Rectangle::from(5, 8, 5, 2), a.intersect(&b));
        assert!(a.intersect(&Rectangle::from(20, 20, 1, 1)).is_empty());
    }
}
