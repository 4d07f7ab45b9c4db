//! All game entity types: plain data plus geometry accessors, no game logic.

use crate::collision::{Circle, Rect};
use crate::config::Tuning;
use crate::timer::Countdown;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Turrets ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Turret {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Frames until the next shot is allowed.
    pub shoot_cooldown: u32,
}

impl Turret {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Second turret granted by the Support power-up. Stays at a fixed offset
/// from the main turret and fires with it.
#[derive(Clone, Debug, PartialEq)]
pub struct SupportTurret {
    pub turret: Turret,
    pub remaining: Countdown,
}

// ── Aircraft ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Falls straight down.
    Jet,
    /// Faster falling jet.
    OrangeJet,
    /// Crosses left to right dropping bombs.
    Bomber,
    /// Black jets crossing right to left in a group of three.
    Fleet,
    /// Slow boss with many hit points; also drops bombs.
    GiantJet,
    /// Friendly air support. Sweeps every hostile aircraft off the screen.
    Ally,
}

impl EnemyKind {
    pub fn is_hostile(&self) -> bool {
        !matches!(self, EnemyKind::Ally)
    }

    pub fn drops_bombs(&self) -> bool {
        matches!(self, EnemyKind::Bomber | EnemyKind::GiantJet)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: EnemyKind,
    /// Frames until the next bomb (bombers and giant jets only).
    pub bomb_cooldown: u32,
    pub hit_points: u32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

// ── Projectiles ──────────────────────────────────────────────────────────────

/// Turret shell, travels straight up.
#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Bomb dropped by a bomber or giant jet. `(x, y)` is the centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Bomb {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub radius: f32,
}

impl Bomb {
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }
}

// ── Pick-ups & scenery ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Adds a support turret for a while.
    Support,
    /// Darkens the sky.
    Blackout,
    /// Absorbs every hit while active.
    Shield,
    /// Each shot fires two bullets.
    DualFire,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
}

/// Purely visual; ages out after `life` frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub life: u32,
}

// ── Input ────────────────────────────────────────────────────────────────────

/// Movement / fire flags for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

// ── Master game state ────────────────────────────────────────────────────────

/// Timed power-up effects on the main turret.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Effects {
    pub blackout: Countdown,
    pub shield: Countdown,
    pub dual_fire: Countdown,
}

/// The entire game state. Cloneable so the pure update functions can return
/// a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub turret: Turret,
    pub support: Option<SupportTurret>,
    /// Hostile aircraft plus any ally currently sweeping the sky.
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub bombs: Vec<Bomb>,
    pub power_ups: Vec<PowerUp>,
    pub clouds: Vec<Cloud>,
    pub explosions: Vec<Explosion>,
    pub effects: Effects,
    /// Active while it is night: no spawning, no firing, slow healing.
    pub night: Countdown,
    pub score: u32,
    pub health: i32,
    pub level: Level,
    pub status: GameStatus,
    pub frame: u64,
    pub tuning: Tuning,
}

impl GameState {
    pub fn is_night(&self) -> bool {
        self.night.is_active()
    }

    /// Night and the Blackout power-up both darken the sky.
    pub fn is_dark(&self) -> bool {
        self.night.is_active() || self.effects.blackout.is_active()
    }

    pub fn is_shielded(&self) -> bool {
        self.effects.shield.is_active()
    }
}
