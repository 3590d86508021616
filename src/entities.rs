/// All game entity types — pure data, no logic.

use crate::config::{TierStats, TierTable, Tuning};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Playing,
    Paused,
    GameOver,
}

/// Axis-aligned box in playfield pixels, origin at the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }
}

/// Anything that occupies a box on the playfield.
pub trait Bounds {
    fn rect(&self) -> Rect;
}

// ── Targets ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetTier {
    Regular,
    Fast,
    Tank,
}

impl TargetTier {
    pub fn stats(self, table: &TierTable) -> TierStats {
        match self {
            TargetTier::Regular => table.regular,
            TargetTier::Fast => table.fast,
            TargetTier::Tank => table.tank,
        }
    }
}

/// Lateral sway: `x = origin_x + sin(y * 0.02) * amplitude`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sway {
    pub origin_x: f32,
    pub amplitude: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Downward pixels per tick.
    pub speed: f32,
    pub health: u32,
    pub score_value: u32,
    pub tier: TargetTier,
    pub sway: Option<Sway>,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletStyle {
    Standard,
    /// Fired while the weapon power-up is active.
    Powered,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Upward pixels per tick.
    pub speed: f32,
    pub style: BulletStyle,
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerUpEffect {
    /// Restores one point of health, never above the maximum.
    Health,
    /// Powered-up triple shot for `weapon_duration_ticks`.
    Weapon,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub effect: PowerUpEffect,
}

// ── Cosmetics ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Spark,
    Fire,
    Debris,
    Flare,
}

/// One explosion particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub life: u32,
    pub kind: ParticleKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

// ── Player craft ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Craft {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub vx: f32,
    pub vy: f32,
    /// Inertial model only; grows with difficulty.
    pub acceleration: f32,
    pub max_speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub powered_up: bool,
    pub power_up_ticks: u32,
    pub fire_cooldown: u32,
    pub fire_cooldown_max: u32,
    /// Set once health reaches zero; the craft is hidden while it burns.
    pub exploding: bool,
    pub explosion_ticks: u32,
    /// Engine glow in `[0.3, 1.0]`.
    pub engine_glow: f32,
    pub glow_rising: bool,
}

impl Craft {
    pub fn new(tuning: &Tuning) -> Self {
        let (acceleration, max_speed) = match tuning.control {
            crate::config::ControlModel::Direct { speed } => (0.0, speed),
            crate::config::ControlModel::Inertial { acceleration, max_speed, .. } => {
                (acceleration, max_speed)
            }
        };
        Craft {
            x: tuning.craft_start_x,
            y: tuning.craft_start_y,
            width: tuning.craft_width,
            height: tuning.craft_height,
            vx: 0.0,
            vy: 0.0,
            acceleration,
            max_speed,
            health: tuning.craft_max_health,
            max_health: tuning.craft_max_health,
            powered_up: false,
            power_up_ticks: 0,
            fire_cooldown: 0,
            fire_cooldown_max: tuning.fire_cooldown_ticks,
            exploding: false,
            explosion_ticks: 0,
            engine_glow: GLOW_MIN,
            glow_rising: true,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

pub const GLOW_MIN: f32 = 0.3;
pub const GLOW_MAX: f32 = 1.0;
pub const GLOW_STEP: f32 = 0.05;

macro_rules! impl_bounds {
    ($($t:ty),*) => {
        $(impl Bounds for $t {
            fn rect(&self) -> Rect {
                Rect::new(self.x, self.y, self.width, self.height)
            }
        })*
    };
}

impl_bounds!(Craft, Bullet, Target, PowerUp);

// ── Events ────────────────────────────────────────────────────────────────────

/// Things that happened during the last tick, for HUD and sound hooks.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ScoreChanged(u32),
    LevelUp(u32),
    CraftHit { health: u32 },
    CraftDestroyed,
    PowerUpCollected(PowerUpEffect),
    ModeChanged(Mode),
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so the pure `tick` can return a new
/// copy, leaving the previous frame intact for the renderer.
#[derive(Clone, Debug)]
pub struct GameState {
    pub tuning: Tuning,
    pub craft: Craft,
    pub bullets: Vec<Bullet>,
    pub targets: Vec<Target>,
    pub power_ups: Vec<PowerUp>,
    pub explosions: Vec<Particle>,
    pub stars: Vec<Star>,
    pub score: u32,
    pub level: u32,
    pub elapsed_ticks: u64,
    pub target_spawn_rate: f32,
    pub target_base_speed: f32,
    pub mode: Mode,
    /// Cleared at the start of every tick.
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            craft: &self.craft,
            bullets: &self.bullets,
            targets: &self.targets,
            power_ups: &self.power_ups,
            explosions: &self.explosions,
            stars: &self.stars,
            score: self.score,
            level: self.level,
            mode: self.mode,
            width: self.tuning.playfield_width,
            height: self.tuning.playfield_height,
        }
    }
}

/// Read-only view of one completed tick, handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub craft: &'a Craft,
    pub bullets: &'a [Bullet],
    pub targets: &'a [Target],
    pub power_ups: &'a [PowerUp],
    pub explosions: &'a [Particle],
    pub stars: &'a [Star],
    pub score: u32,
    pub level: u32,
    pub mode: Mode,
    pub width: f32,
    pub height: f32,
}
