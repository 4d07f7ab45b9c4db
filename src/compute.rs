//! Pure game-logic functions.
//!
//! Every public transition takes an immutable reference to the current
//! `GameState` (and, where needed, an RNG handle) and returns a brand-new
//! `GameState`. Side effects are limited to the injected RNG and logging.

use log::{debug, info};
use rand::Rng;

use crate::config::Tuning;
use crate::entities::{
    Bullet, Controls, Effects, Enemy, EnemyKind, Explosion, GameState, GameStatus, Level,
    PowerUpKind, SupportTurret, Turret,
};
use crate::spawn::{run_spawners, spawn_bomb};
use crate::timer::Countdown;

const HIT_EXPLOSION_SIZE: f32 = 20.0;
const HIT_EXPLOSION_LIFE: u32 = 20;
const FINAL_EXPLOSION_SIZE: f32 = 40.0;
const FINAL_EXPLOSION_LIFE: u32 = 50;
const CLOUD_EXIT_X: f32 = -50.0;
/// How far past the right edge a left-to-right bomber may fly before leaving.
const BOMBER_EXIT_MARGIN: f32 = 100.0;

/// Score awarded per aircraft destroyed.
fn score_for(kind: EnemyKind, tuning: &Tuning) -> u32 {
    match kind {
        EnemyKind::GiantJet => tuning.enemies.giant_score,
        EnemyKind::Ally => 0,
        _ => 1,
    }
}

/// Health lost when an aircraft rams the turret.
fn ram_damage(kind: EnemyKind, tuning: &Tuning) -> i32 {
    match kind {
        EnemyKind::GiantJet => tuning.enemies.giant_ram_damage,
        _ => 1,
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: turret centred on the bottom edge, full
/// health, daylight, nothing in the sky.
pub fn init_state(level: Level, tuning: Tuning) -> GameState {
    let t = &tuning.turret;
    GameState {
        turret: Turret {
            x: tuning.canvas.width / 2.0 - t.width / 2.0,
            y: tuning.canvas.height - t.height,
            width: t.width,
            height: t.height,
            speed: t.speed,
            shoot_cooldown: 0,
        },
        support: None,
        enemies: Vec::new(),
        bullets: Vec::new(),
        bombs: Vec::new(),
        power_ups: Vec::new(),
        clouds: Vec::new(),
        explosions: Vec::new(),
        effects: Effects::default(),
        night: Countdown::idle(),
        score: 0,
        health: t.starting_health,
        level,
        status: GameStatus::Playing,
        frame: 0,
        tuning,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn with_turret_x(state: &GameState, x: f32) -> GameState {
    let mut next = state.clone();
    next.turret.x = x;
    if let Some(support) = next.support.as_mut() {
        support.turret.x = x + state.tuning.turret.support_offset;
    }
    next
}

pub fn move_turret_left(state: &GameState) -> GameState {
    let x = (state.turret.x - state.turret.speed).max(0.0);
    with_turret_x(state, x)
}

pub fn move_turret_right(state: &GameState) -> GameState {
    let max_x = state.tuning.canvas.width - state.turret.width;
    let x = (state.turret.x + state.turret.speed).min(max_x);
    with_turret_x(state, x)
}

/// Bullets leaving `turret`'s barrel: one centred shot, or two side by side
/// under DualFire.
fn muzzle_bullets(turret: &Turret, tuning: &Tuning, dual: bool) -> Vec<Bullet> {
    let b = &tuning.bullet;
    let centre = turret.rect().center_x();
    let centres = if dual {
        vec![centre - b.dual_spread, centre + b.dual_spread]
    } else {
        vec![centre]
    };
    centres
        .into_iter()
        .map(|cx| Bullet {
            x: cx - b.width / 2.0,
            y: turret.y,
            width: b.width,
            height: b.height,
            speed: b.speed,
        })
        .collect()
}

/// Fire every turret that is off cooldown. Turrets hold fire at night.
pub fn fire(state: &GameState) -> GameState {
    if state.status != GameStatus::Playing || state.is_night() {
        return state.clone();
    }
    let mut next = state.clone();
    let tuning = state.tuning;
    let dual = state.effects.dual_fire.is_active();

    if next.turret.shoot_cooldown == 0 {
        next.bullets
            .extend(muzzle_bullets(&next.turret, &tuning, dual));
        next.turret.shoot_cooldown = tuning.turret.shoot_cooldown;
    }
    if let Some(support) = next.support.as_mut() {
        if support.turret.shoot_cooldown == 0 {
            next.bullets
                .extend(muzzle_bullets(&support.turret, &tuning, dual));
            support.turret.shoot_cooldown = tuning.turret.shoot_cooldown;
        }
    }
    next
}

/// Apply one frame of held keys. Left and right together cancel out.
pub fn apply_controls(state: &GameState, controls: &Controls) -> GameState {
    let mut next = state.clone();
    if next.status != GameStatus::Playing {
        return next;
    }
    if controls.left {
        next = move_turret_left(&next);
    }
    if controls.right {
        next = move_turret_right(&next);
    }
    if controls.fire {
        next = fire(&next);
    }
    next
}

// ── Per-frame tick (nearly pure, RNG is injected) ──────────────────────────

/// True once an aircraft has left the play field for good.
pub fn is_off_screen(enemy: &Enemy, tuning: &Tuning) -> bool {
    let canvas = &tuning.canvas;
    match enemy.kind {
        EnemyKind::Jet | EnemyKind::OrangeJet | EnemyKind::GiantJet => enemy.y >= canvas.height,
        EnemyKind::Bomber => enemy.x > canvas.width + BOMBER_EXIT_MARGIN,
        EnemyKind::Fleet | EnemyKind::Ally => enemy.x + enemy.width < 0.0,
    }
}

/// Advance the simulation by one frame. All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    let mut next = state.clone();
    next.frame += 1;

    advance_timers(&mut next);
    if next.frame % next.tuning.night.interval.max(1) == 0 {
        start_night(&mut next);
    }
    run_spawners(&mut next, rng);

    move_bullets(&mut next);
    move_aircraft(&mut next);
    move_bombs(&mut next);
    move_scenery(&mut next);

    sweep_with_air_support(&mut next);
    resolve_bullet_hits(&mut next);
    resolve_bombs(&mut next);
    resolve_rams(&mut next);
    collect_power_ups(&mut next);

    let tuning = next.tuning;
    next.enemies.retain(|e| !is_off_screen(e, &tuning));

    if next.health <= 0 {
        next.explosions.push(Explosion {
            x: next.turret.x,
            y: next.turret.y,
            size: FINAL_EXPLOSION_SIZE,
            life: FINAL_EXPLOSION_LIFE,
        });
        next.status = GameStatus::GameOver;
        info!("game over at frame {} with score {}", next.frame, next.score);
    }
    next
}

// ── Tick stages ──────────────────────────────────────────────────────────────

/// Cooldowns, power-up countdowns, the support turret and the night cycle.
fn advance_timers(state: &mut GameState) {
    state.turret.shoot_cooldown = state.turret.shoot_cooldown.saturating_sub(1);

    let support_expired = match state.support.as_mut() {
        Some(support) => {
            support.turret.shoot_cooldown = support.turret.shoot_cooldown.saturating_sub(1);
            support.remaining.tick()
        }
        None => false,
    };
    if support_expired {
        state.support = None;
        info!("support turret withdrawn");
    }

    let effects = &mut state.effects;
    if effects.blackout.tick() {
        info!("blackout over");
    }
    if effects.shield.tick() {
        info!("shield down");
    }
    if effects.dual_fire.tick() {
        info!("dual fire over");
    }

    if state.night.is_active() {
        let night = state.tuning.night;
        if state.frame % u64::from(night.heal_interval.max(1)) == 0 {
            state.health = (state.health + night.heal_amount).min(state.tuning.turret.max_health);
        }
        if state.night.tick() {
            info!("dawn at frame {}", state.frame);
        }
    }
}

/// Night falls: the sky empties and stays empty until dawn.
fn start_night(state: &mut GameState) {
    state.night.start(state.tuning.night.duration);
    state.enemies.clear();
    state.bombs.clear();
    info!("night falls at frame {}", state.frame);
}

fn move_bullets(state: &mut GameState) {
    for b in &mut state.bullets {
        b.y -= b.speed;
    }
    state.bullets.retain(|b| b.y > 0.0);
}

/// Per-kind flight pattern, then bombing runs.
fn move_aircraft(state: &mut GameState) {
    let tuning = state.tuning;
    let mut dropped = Vec::new();
    for e in &mut state.enemies {
        match e.kind {
            EnemyKind::Bomber => e.x += e.speed,
            EnemyKind::Fleet | EnemyKind::Ally => e.x -= e.speed,
            EnemyKind::Jet | EnemyKind::OrangeJet | EnemyKind::GiantJet => e.y += e.speed,
        }
        if e.kind.drops_bombs() {
            e.bomb_cooldown = e.bomb_cooldown.saturating_sub(1);
            if e.bomb_cooldown == 0 {
                dropped.push(spawn_bomb(&tuning, e));
                e.bomb_cooldown = match e.kind {
                    EnemyKind::GiantJet => tuning.enemies.giant_bomb_interval,
                    _ => tuning.enemies.bomber_bomb_interval,
                };
            }
        }
    }
    state.bombs.extend(dropped);
}

fn move_bombs(state: &mut GameState) {
    for b in &mut state.bombs {
        b.y += b.speed;
    }
}

/// Power-ups, clouds and explosions. Clouds and spent explosions are dropped.
fn move_scenery(state: &mut GameState) {
    for p in &mut state.power_ups {
        p.y += p.speed;
    }
    for c in &mut state.clouds {
        c.x -= c.speed;
    }
    state.clouds.retain(|c| c.x > CLOUD_EXIT_X);

    for ex in &mut state.explosions {
        ex.life = ex.life.saturating_sub(1);
    }
    state.explosions.retain(|ex| ex.life > 0);
}

/// While an ally is in the sky, hostile aircraft are wiped out. No score.
fn sweep_with_air_support(state: &mut GameState) {
    if state.enemies.iter().any(|e| e.kind == EnemyKind::Ally) {
        let before = state.enemies.len();
        state.enemies.retain(|e| !e.kind.is_hostile());
        let swept = before - state.enemies.len();
        if swept > 0 {
            debug!("air support swept {swept} aircraft");
        }
    }
}

/// Each bullet damages at most one aircraft; each hit removes one hit point.
fn resolve_bullet_hits(state: &mut GameState) {
    let mut spent = vec![false; state.bullets.len()];

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let shell = bullet.rect();
        for enemy in state.enemies.iter_mut() {
            if !enemy.kind.is_hostile() || enemy.hit_points == 0 {
                continue;
            }
            if shell.overlaps(&enemy.rect()) {
                enemy.hit_points -= 1;
                spent[bi] = true;
                break;
            }
        }
    }

    let tuning = state.tuning;
    for enemy in state.enemies.iter().filter(|e| e.hit_points == 0) {
        state.score += score_for(enemy.kind, &tuning);
        state.explosions.push(Explosion {
            x: enemy.rect().center_x(),
            y: enemy.y + enemy.height / 2.0,
            size: HIT_EXPLOSION_SIZE,
            life: HIT_EXPLOSION_LIFE,
        });
        debug!("{:?} destroyed, score {}", enemy.kind, state.score);
    }
    state.enemies.retain(|e| e.hit_points > 0);

    let mut spent = spent.into_iter();
    state.bullets.retain(|_| !spent.next().unwrap_or(false));
}

/// Bombs explode on the turret or on the grass; either way they cost one
/// health unless the shield is up.
fn resolve_bombs(state: &mut GameState) {
    let ground_y = state.tuning.ground_y();
    let turret = state.turret.rect();
    let shielded = state.is_shielded();
    let mut damage = 0;
    let mut blasts = Vec::new();

    state.bombs.retain(|b| {
        let impact = b.circle().overlaps_rect(&turret) || b.y + b.radius >= ground_y;
        if impact {
            blasts.push(Explosion {
                x: b.x,
                y: b.y,
                size: HIT_EXPLOSION_SIZE,
                life: HIT_EXPLOSION_LIFE,
            });
            if !shielded {
                damage += 1;
            }
        }
        !impact
    });

    if damage > 0 {
        state.health -= damage;
        debug!("bomb damage {damage}, health {}", state.health);
    }
    state.explosions.extend(blasts);
}

/// Aircraft flying into the turret are destroyed and cost health.
fn resolve_rams(state: &mut GameState) {
    let tuning = state.tuning;
    let turret = state.turret.rect();
    let shielded = state.is_shielded();
    let mut damage = 0;
    let mut blasts = Vec::new();

    state.enemies.retain(|e| {
        let rammed = e.kind.is_hostile() && e.rect().overlaps(&turret);
        if rammed {
            blasts.push(Explosion {
                x: e.rect().center_x(),
                y: e.y + e.height / 2.0,
                size: HIT_EXPLOSION_SIZE,
                life: HIT_EXPLOSION_LIFE,
            });
            if !shielded {
                damage += ram_damage(e.kind, &tuning);
            }
        }
        !rammed
    });

    if damage > 0 {
        state.health -= damage;
        debug!("ram damage {damage}, health {}", state.health);
    }
    state.explosions.extend(blasts);
}

/// Power-ups touching the turret are collected; the rest sink into the
/// grass once they reach it.
fn collect_power_ups(state: &mut GameState) {
    let turret = state.turret.rect();
    let ground_y = state.tuning.ground_y();
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        let hit = p.rect().overlaps(&turret);
        if hit {
            collected.push(p.kind);
        }
        !hit
    });

    let tuning = state.tuning;
    for kind in collected {
        let effects = &tuning.effects;
        match kind {
            PowerUpKind::Support => match state.support.as_mut() {
                Some(support) => support.remaining.start(effects.support_duration),
                None => {
                    state.support = Some(SupportTurret {
                        turret: Turret {
                            x: state.turret.x + tuning.turret.support_offset,
                            shoot_cooldown: 0,
                            ..state.turret.clone()
                        },
                        remaining: Countdown::started(effects.support_duration),
                    });
                }
            },
            PowerUpKind::Blackout => state.effects.blackout.start(effects.blackout_duration),
            PowerUpKind::Shield => state.effects.shield.start(effects.shield_duration),
            PowerUpKind::DualFire => state.effects.dual_fire.start(effects.dual_fire_duration),
        }
        info!("{kind:?} power-up collected at frame {}", state.frame);
    }
    state.power_ups.retain(|p| p.y < ground_y);
}
