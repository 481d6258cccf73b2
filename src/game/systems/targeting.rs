use crate::game::state::Tank;

/// Pick the live enemy with the lowest hp.
///
/// Scans left to right and only replaces the current pick on a strictly
/// lower hp, so the first of several equally weak enemies wins.
/// Returns `None` when no enemy is alive.
pub fn find_weakest_enemy(enemies: &[Tank]) -> Option<&Tank> {
    let mut weakest: Option<&Tank> = None;

    for enemy in enemies {
        if !enemy.is_alive() {
            continue;
        }

        let weaker = weakest.map_or(true, |current| enemy.hp < current.hp);
        if weaker {
            weakest = Some(enemy);
        }
    }

    weakest
}
