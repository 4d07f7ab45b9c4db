//! Entity constructors and the periodic spawner schedule.
//!
//! All randomness comes through the injected `rng` so a seeded RNG gives a
//! reproducible run.

use log::debug;
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{Bomb, Cloud, Enemy, EnemyKind, GameState, Level, PowerUp, PowerUpKind};

const JET_SIZE: f32 = 40.0;
const BOMBER_WIDTH: f32 = 80.0;
const BOMBER_HEIGHT: f32 = 40.0;
const BOMBER_ENTRY_X: f32 = -100.0;
const BOMBER_ALTITUDE: f32 = 100.0;
const FLEET_SIZE: usize = 3;
const FLEET_SPACING_X: f32 = 60.0;
const FLEET_SPACING_Y: f32 = 40.0;
const FLEET_TOP: f32 = 50.0;
const ALLY_WIDTH: f32 = 80.0;
const ALLY_HEIGHT: f32 = 60.0;
const ALLY_ALTITUDE: f32 = 150.0;
const GIANT_WIDTH: f32 = 160.0;
const GIANT_HEIGHT: f32 = 100.0;
const POWER_UP_SIZE: f32 = 20.0;
const CLOUD_MAX_Y: f32 = 100.0;

// ── Difficulty ───────────────────────────────────────────────────────────────

/// Frames between jet spawns for the given level.
pub fn jet_spawn_interval(level: Level, base: u64) -> u64 {
    let scaled = match level {
        Level::Easy => base.saturating_mul(3) / 2,
        Level::Medium => base,
        Level::Hard => base.saturating_mul(3) / 5,
    };
    scaled.max(1)
}

/// Random left edge for something `entity_width` wide that must start fully
/// inside the canvas.
fn random_x(rng: &mut impl Rng, canvas_width: f32, entity_width: f32) -> f32 {
    let span = canvas_width - entity_width;
    if span > 0.0 {
        rng.gen_range(0.0..span)
    } else {
        0.0
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn falling_jet(x: f32, speed: f32, kind: EnemyKind) -> Enemy {
    Enemy {
        x,
        y: -JET_SIZE,
        width: JET_SIZE,
        height: JET_SIZE,
        speed,
        kind,
        bomb_cooldown: 0,
        hit_points: 1,
    }
}

pub fn spawn_jet(tuning: &Tuning, rng: &mut impl Rng) -> Enemy {
    let x = random_x(rng, tuning.canvas.width, JET_SIZE);
    falling_jet(x, tuning.enemies.jet_speed, EnemyKind::Jet)
}

pub fn spawn_orange_jet(tuning: &Tuning, rng: &mut impl Rng) -> Enemy {
    let x = random_x(rng, tuning.canvas.width, JET_SIZE);
    falling_jet(x, tuning.enemies.orange_jet_speed, EnemyKind::OrangeJet)
}

/// Bombers enter from the left and drop their first bomb straight away.
pub fn spawn_bomber(tuning: &Tuning) -> Enemy {
    Enemy {
        x: BOMBER_ENTRY_X,
        y: BOMBER_ALTITUDE,
        width: BOMBER_WIDTH,
        height: BOMBER_HEIGHT,
        speed: tuning.enemies.bomber_speed,
        kind: EnemyKind::Bomber,
        bomb_cooldown: 0,
        hit_points: 1,
    }
}

/// Three black jets in echelon, entering from the right edge.
pub fn spawn_fleet(tuning: &Tuning) -> Vec<Enemy> {
    (0..FLEET_SIZE)
        .map(|i| Enemy {
            x: tuning.canvas.width + i as f32 * FLEET_SPACING_X,
            y: FLEET_TOP + i as f32 * FLEET_SPACING_Y,
            width: JET_SIZE,
            height: JET_SIZE,
            speed: tuning.enemies.fleet_speed,
            kind: EnemyKind::Fleet,
            bomb_cooldown: 0,
            hit_points: 1,
        })
        .collect()
}

pub fn spawn_ally(tuning: &Tuning) -> Enemy {
    Enemy {
        x: tuning.canvas.width,
        y: ALLY_ALTITUDE,
        width: ALLY_WIDTH,
        height: ALLY_HEIGHT,
        speed: tuning.enemies.ally_speed,
        kind: EnemyKind::Ally,
        bomb_cooldown: 0,
        hit_points: 1,
    }
}

pub fn spawn_giant_jet(tuning: &Tuning, rng: &mut impl Rng) -> Enemy {
    Enemy {
        x: random_x(rng, tuning.canvas.width, GIANT_WIDTH),
        y: -GIANT_HEIGHT,
        width: GIANT_WIDTH,
        height: GIANT_HEIGHT,
        speed: tuning.enemies.giant_speed,
        kind: EnemyKind::GiantJet,
        bomb_cooldown: tuning.enemies.giant_bomb_interval,
        hit_points: tuning.enemies.giant_hit_points.max(1),
    }
}

pub fn spawn_power_up(tuning: &Tuning, kind: PowerUpKind, rng: &mut impl Rng) -> PowerUp {
    PowerUp {
        x: random_x(rng, tuning.canvas.width, POWER_UP_SIZE),
        y: -POWER_UP_SIZE,
        width: POWER_UP_SIZE,
        height: POWER_UP_SIZE,
        speed: tuning.spawn.power_up_speed,
        kind,
    }
}

pub fn spawn_cloud(tuning: &Tuning, rng: &mut impl Rng) -> Cloud {
    Cloud {
        x: tuning.canvas.width,
        y: rng.gen_range(0.0..CLOUD_MAX_Y),
        speed: 1.0 + rng.gen::<f32>(),
    }
}

/// A bomb released from the belly of `carrier`.
pub fn spawn_bomb(tuning: &Tuning, carrier: &Enemy) -> Bomb {
    Bomb {
        x: carrier.rect().center_x(),
        y: carrier.rect().bottom(),
        speed: tuning.enemies.bomb_speed,
        radius: tuning.enemies.bomb_radius,
    }
}

// ── Schedule ─────────────────────────────────────────────────────────────────

fn due(frame: u64, interval: u64) -> bool {
    interval > 0 && frame % interval == 0
}

/// Fire every periodic spawner whose interval divides `state.frame`.
/// Clouds drift in at any time; everything else waits out the night.
pub fn run_spawners(state: &mut GameState, rng: &mut impl Rng) {
    let t = state.tuning;
    let s = &t.spawn;
    let frame = state.frame;

    if due(frame, s.cloud_interval) {
        state.clouds.push(spawn_cloud(&t, rng));
    }

    if state.is_night() {
        return;
    }

    if due(frame, jet_spawn_interval(state.level, s.jet_interval)) {
        state.enemies.push(spawn_jet(&t, rng));
        if rng.gen_bool(s.orange_jet_chance) {
            state.enemies.push(spawn_orange_jet(&t, rng));
        }
        debug!("frame {frame}: jets inbound ({} aircraft)", state.enemies.len());
    }
    if due(frame, s.bomber_interval) {
        state.enemies.push(spawn_bomber(&t));
        debug!("frame {frame}: bomber inbound");
    }
    if due(frame, s.fleet_interval) {
        state.enemies.extend(spawn_fleet(&t));
        debug!("frame {frame}: black fleet inbound");
    }
    if due(frame, s.giant_interval) {
        state.enemies.push(spawn_giant_jet(&t, rng));
        debug!("frame {frame}: giant jet inbound");
    }
    if due(frame, s.ally_interval) {
        state.enemies.push(spawn_ally(&t));
        debug!("frame {frame}: air support arriving");
    }

    let power_ups = [
        (s.support_interval, PowerUpKind::Support),
        (s.blackout_interval, PowerUpKind::Blackout),
        (s.shield_interval, PowerUpKind::Shield),
        (s.dual_fire_interval, PowerUpKind::DualFire),
    ];
    for (interval, kind) in power_ups {
        if due(frame, interval) {
            state.power_ups.push(spawn_power_up(&t, kind, rng));
            debug!("frame {frame}: {kind:?} power-up dropped");
        }
    }
}
