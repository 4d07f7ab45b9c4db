//! Gameplay tuning and its TOML representation.
//!
//! Every constant the simulation uses lives in [`Tuning`]. Defaults match the
//! classic frame timings at 60 FPS; a TOML file may override any subset of
//! fields because every section is `#[serde(default)]`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Simulation rate every frame count in [`Tuning`] assumes.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values that would break the simulation
    #[error("Invalid value: {0}")]
    Invalid(String),
}

// ── Sections ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    /// Height of the grass strip; bombs explode when they reach it.
    pub ground_height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            ground_height: 40.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurretConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Frames between shots.
    pub shoot_cooldown: u32,
    pub starting_health: i32,
    pub max_health: i32,
    /// Horizontal distance from the main turret to the support turret.
    pub support_offset: f32,
}

impl Default for TurretConfig {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 60.0,
            speed: 5.0,
            shoot_cooldown: 15,
            starting_health: 10,
            max_health: 10,
            support_offset: 60.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Horizontal distance of each dual-fire bullet from the barrel centre.
    pub dual_spread: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 12.0,
            speed: 6.0,
            dual_spread: 10.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub jet_speed: f32,
    pub orange_jet_speed: f32,
    pub bomber_speed: f32,
    pub fleet_speed: f32,
    pub ally_speed: f32,
    pub giant_speed: f32,
    pub giant_hit_points: u32,
    pub giant_score: u32,
    /// Health lost when the giant jet rams the turret.
    pub giant_ram_damage: i32,
    pub bomber_bomb_interval: u32,
    pub giant_bomb_interval: u32,
    pub bomb_speed: f32,
    pub bomb_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            jet_speed: 2.0,
            orange_jet_speed: 3.0,
            bomber_speed: 2.0,
            fleet_speed: 3.0,
            ally_speed: 5.0,
            giant_speed: 1.0,
            giant_hit_points: 20,
            giant_score: 10,
            giant_ram_damage: 3,
            bomber_bomb_interval: 60,
            giant_bomb_interval: 45,
            bomb_speed: 3.0,
            bomb_radius: 5.0,
        }
    }
}

/// Periodic spawner intervals, in frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Base interval, scaled by difficulty level.
    pub jet_interval: u64,
    pub orange_jet_chance: f64,
    pub cloud_interval: u64,
    pub bomber_interval: u64,
    pub fleet_interval: u64,
    pub ally_interval: u64,
    pub giant_interval: u64,
    pub support_interval: u64,
    pub blackout_interval: u64,
    pub shield_interval: u64,
    pub dual_fire_interval: u64,
    pub power_up_speed: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            jet_interval: 90,
            orange_jet_chance: 0.3,
            cloud_interval: 180,
            bomber_interval: 1200,
            fleet_interval: 1200,
            ally_interval: 3000,
            giant_interval: 5400,
            support_interval: 1200,
            blackout_interval: 1800,
            shield_interval: 2400,
            dual_fire_interval: 3000,
            power_up_speed: 2.0,
        }
    }
}

/// Power-up durations, in frames.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub support_duration: u32,
    pub blackout_duration: u32,
    pub shield_duration: u32,
    pub dual_fire_duration: u32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            support_duration: 600,
            blackout_duration: 600,
            shield_duration: 600,
            dual_fire_duration: 600,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightConfig {
    /// Frames between the starts of two nights.
    pub interval: u64,
    pub duration: u32,
    pub heal_interval: u32,
    pub heal_amount: i32,
}

impl Default for NightConfig {
    fn default() -> Self {
        Self {
            interval: 3600,
            duration: 600,
            heal_interval: 60,
            heal_amount: 1,
        }
    }
}

// ── Aggregate ────────────────────────────────────────────────────────────────

/// All gameplay constants. `Copy` so the pure update functions can carry it
/// inside every state snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas: CanvasConfig,
    pub turret: TurretConfig,
    pub bullet: BulletConfig,
    pub enemies: EnemyConfig,
    pub spawn: SpawnConfig,
    pub effects: EffectConfig,
    pub night: NightConfig,
}

impl Tuning {
    /// Y coordinate of the top of the grass strip.
    pub fn ground_y(&self) -> f32 {
        self.canvas.height - self.canvas.ground_height
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.canvas;
        let e = &self.enemies;
        let floats = [
            ("canvas.width", c.width),
            ("canvas.height", c.height),
            ("canvas.ground_height", c.ground_height),
            ("turret.width", self.turret.width),
            ("turret.height", self.turret.height),
            ("turret.speed", self.turret.speed),
            ("turret.support_offset", self.turret.support_offset),
            ("bullet.width", self.bullet.width),
            ("bullet.height", self.bullet.height),
            ("bullet.speed", self.bullet.speed),
            ("bullet.dual_spread", self.bullet.dual_spread),
            ("enemies.jet_speed", e.jet_speed),
            ("enemies.orange_jet_speed", e.orange_jet_speed),
            ("enemies.bomber_speed", e.bomber_speed),
            ("enemies.fleet_speed", e.fleet_speed),
            ("enemies.ally_speed", e.ally_speed),
            ("enemies.giant_speed", e.giant_speed),
            ("enemies.bomb_speed", e.bomb_speed),
            ("enemies.bomb_radius", e.bomb_radius),
            ("spawn.power_up_speed", self.spawn.power_up_speed),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!("{name} must be a finite number")));
        }

        // Collision code clamps between an edge and its opposite edge, so
        // every size must be strictly positive.
        let sizes = [
            ("canvas.width", c.width),
            ("canvas.height", c.height),
            ("turret.width", self.turret.width),
            ("turret.height", self.turret.height),
            ("bullet.width", self.bullet.width),
            ("bullet.height", self.bullet.height),
            ("enemies.bomb_radius", e.bomb_radius),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")));
        }
        if c.ground_height < 0.0 || c.ground_height >= c.height {
            return Err(ConfigError::Invalid(format!(
                "ground height {} does not fit a canvas of height {}",
                c.ground_height, c.height
            )));
        }
        if self.turret.width > c.width {
            return Err(ConfigError::Invalid("turret wider than canvas".into()));
        }
        if self.turret.max_health <= 0 || self.turret.starting_health <= 0 {
            return Err(ConfigError::Invalid("turret health must be positive".into()));
        }

        let speeds = [
            ("turret.speed", self.turret.speed),
            ("bullet.speed", self.bullet.speed),
            ("enemies.jet_speed", self.enemies.jet_speed),
            ("enemies.orange_jet_speed", self.enemies.orange_jet_speed),
            ("enemies.bomber_speed", self.enemies.bomber_speed),
            ("enemies.fleet_speed", self.enemies.fleet_speed),
            ("enemies.ally_speed", self.enemies.ally_speed),
            ("enemies.giant_speed", self.enemies.giant_speed),
            ("enemies.bomb_speed", self.enemies.bomb_speed),
            ("spawn.power_up_speed", self.spawn.power_up_speed),
        ];
        if let Some((name, _)) = speeds.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")));
        }

        let s = &self.spawn;
        let intervals = [
            ("spawn.jet_interval", s.jet_interval),
            ("spawn.cloud_interval", s.cloud_interval),
            ("spawn.bomber_interval", s.bomber_interval),
            ("spawn.fleet_interval", s.fleet_interval),
            ("spawn.ally_interval", s.ally_interval),
            ("spawn.giant_interval", s.giant_interval),
            ("spawn.support_interval", s.support_interval),
            ("spawn.blackout_interval", s.blackout_interval),
            ("spawn.shield_interval", s.shield_interval),
            ("spawn.dual_fire_interval", s.dual_fire_interval),
            ("night.interval", self.night.interval),
            ("night.heal_interval", u64::from(self.night.heal_interval)),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be at least 1 frame")));
        }
        if !(0.0..=1.0).contains(&s.orange_jet_chance) {
            return Err(ConfigError::Invalid(
                "spawn.orange_jet_chance must be within 0..=1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file; the terminal itself is taken by the game.
    pub file: PathBuf,
    /// Filter used when `RUST_LOG` is not set.
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("turret_defense.log"),
            level: "info".to_string(),
        }
    }
}

/// Everything a config file can hold.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub log: LogConfig,
    #[serde(flatten)]
    pub tuning: Tuning,
}

impl GameConfig {
    /// Load and validate a TOML config file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !is_toml(path) {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.tuning.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if !is_toml(path) {
            return Err(ConfigError::UnsupportedFormat(path.display().to_string()));
        }
        let contents =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = GameConfig::from_toml_str(
            r#"
            [night]
            duration = 300

            [log]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.tuning.night.duration, 300);
        assert_eq!(cfg.tuning.night.interval, 3600);
        assert_eq!(cfg.tuning.turret, TurretConfig::default());
        assert_eq!(cfg.log.level, "debug");
    }

    #[test]
    fn zero_interval_rejected() {
        let err = GameConfig::from_toml_str("[spawn]\njet_interval = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn ground_taller_than_canvas_rejected() {
        let mut t = Tuning::default();
        t.canvas.ground_height = 700.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn non_positive_sizes_rejected() {
        for toml in [
            "[turret]\nwidth = -40.0\n",
            "[bullet]\nheight = 0.0\n",
            "[enemies]\nbomb_radius = -5.0\n",
        ] {
            let err = GameConfig::from_toml_str(toml).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{toml}");
        }
    }

    #[test]
    fn non_finite_values_rejected() {
        for toml in [
            "[canvas]\nwidth = nan\n",
            "[turret]\nspeed = inf\n",
            "[bullet]\ndual_spread = nan\n",
        ] {
            let err = GameConfig::from_toml_str(toml).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)), "{toml}");
        }
    }

    #[test]
    fn garbage_is_parse_error() {
        let err = GameConfig::from_toml_str("night = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn written_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.toml");
        let mut cfg = GameConfig::default();
        cfg.tuning.night.heal_amount = 2;
        cfg.save_to_file(&path).unwrap();
        assert_eq!(GameConfig::load_from_file(&path).unwrap(), cfg);
    }

    #[test]
    fn non_toml_path_rejected() {
        let err = GameConfig::load_from_file(Path::new("tuning.json")).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn ground_y_is_above_grass() {
        assert_eq!(Tuning::default().ground_y(), 560.0);
    }
}
