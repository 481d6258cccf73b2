use tracing::debug;

use crate::game::constants::firing::*;
use crate::game::state::Tank;
use crate::net::protocol::Action;

/// Aim at `target`, then fire once the heading is close enough.
///
/// The heading error is the raw difference between the bearing and the
/// current direction, without wrapping. Near +/-PI this overestimates the
/// error and the tank turns instead of firing.
pub fn aim_and_fire(friend: &Tank, target: &Tank) -> Action {
    let target_angle = (target.center - friend.center).angle();

    if (target_angle - friend.direction).abs() > AIM_TOLERANCE {
        debug!("{}: turning to {:.3} toward {}", friend.name, target_angle, target.name);
        return Action::TurnTo(target_angle);
    }

    debug!("{}: firing at {}", friend.name, target.name);
    Action::Shoot(SHOT_POWER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::vec2::Vec2;
    use std::f64::consts::PI;

    fn create_tank(center: Vec2, direction: f64) -> Tank {
        Tank::new("tank", center, direction)
    }

    #[test]
    fn test_fire_when_aligned() {
        let friend = create_tank(Vec2::ZERO, 0.0);
        let target = create_tank(Vec2::new(100.0, 0.0), 0.0);
        assert_eq!(aim_and_fire(&friend, &target), Action::Shoot(10.0));
    }

    #[test]
    fn test_turn_when_misaligned() {
        let friend = create_tank(Vec2::ZERO, 0.0);
        let target = create_tank(Vec2::new(0.0, 100.0), 0.0);
        match aim_and_fire(&friend, &target) {
            Action::TurnTo(angle) => assert!((angle - PI / 2.0).abs() < 1e-12),
            other => panic!("expected turn, got {:?}", other),
        }
    }

    #[test]
    fn test_tolerance_boundary_is_exclusive() {
        let target = create_tank(Vec2::new(100.0, 0.0), 0.0);

        // Bearing is exactly 0.0, error exactly AIM_TOLERANCE
        let friend = create_tank(Vec2::ZERO, -AIM_TOLERANCE);
        assert_eq!(aim_and_fire(&friend, &target), Action::Shoot(SHOT_POWER));

        let friend = create_tank(Vec2::ZERO, -(AIM_TOLERANCE + 1e-6));
        assert_eq!(aim_and_fire(&friend, &target), Action::TurnTo(0.0));
    }

    #[test]
    fn test_raw_difference_near_half_turn() {
        // Bearing just above -PI, heading just below +PI: ~0.02 rad apart,
        // but the raw difference is ~2*PI.
        let friend = create_tank(Vec2::ZERO, PI - 0.01);
        let target = create_tank(Vec2::new(-100.0, -1.0), 0.0);
        let bearing = Vec2::new(-100.0, -1.0).angle();
        assert!(bearing < -PI + 0.02);

        assert_eq!(aim_and_fire(&friend, &target), Action::TurnTo(bearing));
    }

    #[test]
    fn test_unnormalized_heading_compared_raw() {
        // 2*PI is the same heading as 0 but is not treated as aligned
        let friend = create_tank(Vec2::ZERO, 2.0 * PI);
        let target = create_tank(Vec2::new(100.0, 0.0), 0.0);
        assert_eq!(aim_and_fire(&friend, &target), Action::TurnTo(0.0));
    }
}
