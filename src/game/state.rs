//! Per-tick battlefield snapshot
//!
//! Everything here lives for one tick only: the bot reads it, decides,
//! and drops it.

use serde::{Deserialize, Serialize};

use crate::game::constants::firing;
use crate::util::vec2::Vec2;

/// Tank as reported by the simulator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tank {
    /// Position in world space
    pub center: Vec2,
    /// Heading in radians, 0 = +x, counter-clockwise. Not necessarily normalized.
    pub direction: f64,
    /// Velocity vector
    pub velocity: Vec2,
    /// Health, `<= 0` means destroyed
    pub hp: f64,
    /// Ticks until the gun is ready
    #[serde(rename = "can-shoot-after")]
    pub can_shoot_after: i32,
    /// Display name, only used in diagnostics
    #[serde(default)]
    pub name: String,
}

impl Tank {
    pub fn new(name: impl Into<String>, center: Vec2, direction: f64) -> Self {
        Self {
            center,
            direction,
            velocity: Vec2::ZERO,
            hp: 100.0,
            can_shoot_after: 0,
            name: name.into(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    #[inline]
    pub fn can_shoot(&self) -> bool {
        self.can_shoot_after < firing::COOLDOWN_THRESHOLD
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

/// One tick of input: `[friends, enemies]` on the wire
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "(Vec<Tank>, Vec<Tank>)", into = "(Vec<Tank>, Vec<Tank>)")]
pub struct Snapshot {
    pub friends: Vec<Tank>,
    pub enemies: Vec<Tank>,
}

impl Snapshot {
    pub fn new(friends: Vec<Tank>, enemies: Vec<Tank>) -> Self {
        Self { friends, enemies }
    }

    pub fn alive_friends(&self) -> usize {
        self.friends.iter().filter(|t| t.is_alive()).count()
    }

    pub fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|t| t.is_alive()).count()
    }
}

impl From<(Vec<Tank>, Vec<Tank>)> for Snapshot {
    fn from((friends, enemies): (Vec<Tank>, Vec<Tank>)) -> Self {
        Self { friends, enemies }
    }
}

impl From<Snapshot> for (Vec<Tank>, Vec<Tank>) {
    fn from(snapshot: Snapshot) -> Self {
        (snapshot.friends, snapshot.enemies)
    }
}
