//! Decision constants for the tank bot

/// Firing constants
pub mod firing {
    use std::f64::consts::PI;

    /// A tank may fire while its cooldown counter is below this value
    pub const COOLDOWN_THRESHOLD: i32 = 2;
    /// Maximum raw heading error (radians) before the tank turns instead of firing
    pub const AIM_TOLERANCE: f64 = PI * 5.0 / 180.0;
    /// Power sent with every shot
    pub const SHOT_POWER: f64 = 10.0;
}

/// Movement constants
pub mod movement {
    /// Below this speed the tank performs random evasion, above it brakes
    pub const EVASION_SPEED_THRESHOLD: f64 = 5.0;
    /// Chance that an evasive move is a random turn instead of a throttle burst
    pub const EVASIVE_TURN_PROBABILITY: f64 = 0.2;
    /// Lowest throttle of an evasive burst
    pub const EVASIVE_THROTTLE_MIN: f64 = 0.5;
    /// Width of the evasive throttle range, giving [0.5, 1.0)
    pub const EVASIVE_THROTTLE_SPAN: f64 = 0.5;
    /// Heading error tolerated before braking thrust starts
    pub const BRAKE_ALIGN_EPS: f64 = 0.000_000_01;
    /// Throttle used while braking; the simulator clamps anything above 1.0
    pub const FULL_THROTTLE: f64 = 1.0;
}

/// Line protocol constants
pub mod net {
    /// Default upper bound on one input line (bytes)
    pub const MAX_LINE_BYTES: usize = 1024 * 1024;
}
