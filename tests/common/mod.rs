#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::SeedableRng;

use turret_defense::compute::init_state;
use turret_defense::config::Tuning;
use turret_defense::entities::{Enemy, EnemyKind, GameState, Level};

const NEVER: u64 = 1_000_000;

/// Default tuning with every periodic spawner and the night cycle pushed far
/// out, so a test only sees the entities it places itself.
pub fn quiet_tuning() -> Tuning {
    let mut t = Tuning::default();
    let s = &mut t.spawn;
    s.jet_interval = NEVER;
    s.cloud_interval = NEVER;
    s.bomber_interval = NEVER;
    s.fleet_interval = NEVER;
    s.ally_interval = NEVER;
    s.giant_interval = NEVER;
    s.support_interval = NEVER;
    s.blackout_interval = NEVER;
    s.shield_interval = NEVER;
    s.dual_fire_interval = NEVER;
    t.night.interval = NEVER;
    t
}

/// Turret at (380, 540), 40×60, health 10, on an 800×600 canvas.
pub fn make_state() -> GameState {
    init_state(Level::Medium, quiet_tuning())
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn jet_at(x: f32, y: f32) -> Enemy {
    Enemy {
        x,
        y,
        width: 40.0,
        height: 40.0,
        speed: 2.0,
        kind: EnemyKind::Jet,
        bomb_cooldown: 0,
        hit_points: 1,
    }
}

pub fn enemy_at(kind: EnemyKind, x: f32, y: f32, width: f32, height: f32, speed: f32) -> Enemy {
    Enemy {
        x,
        y,
        width,
        height,
        speed,
        kind,
        bomb_cooldown: 0,
        hit_points: 1,
    }
}
