use rand::Rng;
use std::f64::consts::PI;
use tracing::info;

use crate::game::constants::movement::*;
use crate::game::state::Tank;
use crate::net::protocol::Action;
use crate::util::vec2::normalize_angle;

/// Movement for a tank that is not firing this tick
///
/// Slow tanks jink around randomly, fast tanks turn against their velocity
/// and thrust to bleed off speed.
pub fn plan_movement<R: Rng + ?Sized>(friend: &Tank, rng: &mut R) -> Action {
    let speed = friend.speed();
    info!("{}: speed = {:.2}", friend.name, speed);

    if speed < EVASION_SPEED_THRESHOLD {
        evade(rng)
    } else {
        brake(friend)
    }
}

/// Random evasive move.
///
/// Draws once to choose turn or throttle, then once more for the payload.
pub fn evade<R: Rng + ?Sized>(rng: &mut R) -> Action {
    if rng.gen::<f64>() < EVASIVE_TURN_PROBABILITY {
        return Action::TurnTo(rng.gen::<f64>() * PI * 2.0);
    }

    Action::Forward(rng.gen::<f64>() * EVASIVE_THROTTLE_SPAN + EVASIVE_THROTTLE_MIN)
}

/// Face away from the current velocity, then thrust.
pub fn brake(friend: &Tank) -> Action {
    let anti_velocity_angle = normalize_angle(friend.velocity.angle() + PI);

    if (anti_velocity_angle - friend.direction).abs() > BRAKE_ALIGN_EPS {
        return Action::TurnTo(anti_velocity_angle);
    }

    Action::Forward(FULL_THROTTLE)
}
