//! Strongly-typed primitives shared by every engine.
//!
//! Stored geometry uses integer device units ([`Point`]). Intermediate math is
//! done on `glam::DVec2` and converted back only when a result is committed.

use std::fmt;
use std::ops::{Add, Sub};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is negative when non-negative required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a finite value.
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Validate a finite, non-negative value.
pub fn non_negative(val: f64) -> Result<f64, NumericError> {
    let val = finite(val)?;
    if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Orientation of the vertical axis.
///
/// Stored coordinates follow the screen convention (y grows downward).
/// Angles, directions and rotations are reasoned about in the math
/// convention (y grows upward); every conversion between the two goes
/// through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    Down,
    Up,
}

/// The convention stored coordinates use.
pub const SCREEN: YAxis = YAxis::Down;

impl YAxis {
    /// Convert a vertical delta in this convention to a y-up delta.
    #[inline]
    pub const fn up(self, dy: f64) -> f64 {
        match self {
            YAxis::Down => -dy,
            YAxis::Up => dy,
        }
    }

    /// Convert a y-up delta back to this convention. The flip is its own inverse.
    #[inline]
    pub const fn from_up(self, dy: f64) -> f64 {
        self.up(dy)
    }

    /// Map a stored-space vector into the math frame.
    #[inline]
    pub fn to_math(self, v: DVec2) -> DVec2 {
        DVec2::new(v.x, self.up(v.y))
    }

    /// Map a math-frame vector back into stored space.
    #[inline]
    pub fn from_math(self, v: DVec2) -> DVec2 {
        DVec2::new(v.x, self.from_up(v.y))
    }
}

/// Turning sense of an arc, as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Clockwise = 0,
    Counterclockwise = 1,
}

impl Direction {
    /// +1 for counterclockwise, -1 for clockwise
    #[inline]
    pub const fn sign(self) -> f64 {
        match self {
            Direction::Clockwise => -1.0,
            Direction::Counterclockwise => 1.0,
        }
    }

    pub const fn reversed(self) -> Direction {
        match self {
            Direction::Clockwise => Direction::Counterclockwise,
            Direction::Counterclockwise => Direction::Clockwise,
        }
    }
}

/// A stored point in integer device units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Convert to floating point for intermediate math.
    #[inline]
    pub fn to_vec(self) -> DVec2 {
        DVec2::new(self.x as f64, self.y as f64)
    }

    /// Round a floating point position to the nearest device unit.
    #[inline]
    pub fn from_vec(v: DVec2) -> Self {
        Point {
            x: v.x.round() as i32,
            y: v.y.round() as i32,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// Midpoint, rounded to device units
    pub fn midpoint(self, other: Point) -> Point {
        Point::from_vec((self.to_vec() + other.to_vec()) * 0.5)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned bounding box in device units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub const fn new() -> Self {
        BBox {
            min: Point::new(i32::MAX, i32::MAX),
            max: Point::new(i32::MIN, i32::MIN),
        }
    }

    /// Bounding box of a set of points
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut bb = BBox::new();
        for p in points {
            bb.expand_point(*p);
        }
        bb
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand to include another box
    pub fn union(&mut self, other: &BBox) {
        if other.is_empty() {
            return;
        }
        self.expand_point(other.min);
        self.expand_point(other.max);
    }

    /// Grow the box by `margin` on every side
    pub fn inflate(&self, margin: i32) -> BBox {
        if self.is_empty() {
            return *self;
        }
        BBox {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }
}

/// Pen or fill color.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Color {
    /// Whatever the canvas default is
    #[default]
    Default,
    /// Entry in the standard color table
    Indexed(u16),
    Rgb(u8, u8, u8),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Default => write!(f, "default"),
            Color::Indexed(n) => write!(f, "color{}", n),
            Color::Rgb(r, g, b) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}
