use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::game::state::{Snapshot, Tank};
use crate::game::systems::firing::aim_and_fire;
use crate::game::systems::movement::plan_movement;
use crate::game::systems::targeting::find_weakest_enemy;
use crate::net::protocol::Action;

/// Decision engine for all friendly tanks
///
/// Holds the only state that survives between ticks: the RNG used for
/// evasive movement. Friends are decided in input order so a fixed seed
/// reproduces the same output stream.
pub struct TankAi {
    rng: ChaCha8Rng,
}

impl TankAi {
    /// Engine with a fixed seed, or an entropy-seeded one when `None`
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_seed(seed),
            None => Self {
                rng: ChaCha8Rng::from_entropy(),
            },
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// One action per friend, same order, `None` for destroyed tanks
    pub fn think_actions(&mut self, snapshot: &Snapshot) -> Vec<Option<Action>> {
        snapshot
            .friends
            .iter()
            .map(|friend| self.think_action(friend, &snapshot.friends, &snapshot.enemies))
            .collect()
    }

    /// Decide for a single friendly tank.
    ///
    /// Priority: destroyed tanks do nothing, a loaded gun aims and fires at
    /// the weakest enemy, otherwise the tank moves. With no live enemy there
    /// is nothing to aim at and the tank moves.
    pub fn think_action(
        &mut self,
        friend: &Tank,
        _friends: &[Tank],
        enemies: &[Tank],
    ) -> Option<Action> {
        if !friend.is_alive() {
            return None;
        }

        let target = find_weakest_enemy(enemies);

        if friend.can_shoot() {
            match target {
                Some(target) => return Some(aim_and_fire(friend, target)),
                None => debug!("{}: no live enemy to target", friend.name),
            }
        }

        Some(plan_movement(friend, &mut self.rng))
    }
}

impl Default for TankAi {
    fn default() -> Self {
        Self::new(None)
    }
}
