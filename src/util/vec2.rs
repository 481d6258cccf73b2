use serde::{Deserialize, Serialize};
use std::ops::Sub;

/// 2D vector for tank positions and velocities
///
/// Travels on the wire as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` (radians, counter-clockwise from +x)
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.length()
    }

    /// Returns angle in radians, range (-PI, PI]
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }
}

/// Reduce any angle to (-PI, PI].
///
/// Goes through a unit vector and back through `atan2`, not modulo
/// arithmetic; at exactly +/-PI the sign is whatever `atan2` yields.
pub fn normalize_angle(angle: f64) -> f64 {
    Vec2::from_angle(angle).angle()
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vec2> for [f64; 2] {
    fn from(v: Vec2) -> Self {
        [v.x, v.y]
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
