/// Tuning constants for the simulation.
///
/// Every number the simulation uses lives in `Tuning` so a single JSON file
/// can rebalance the game.  Fields missing from the file keep their default.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read tuning file: {}", e),
            ConfigError::Parse(e) => write!(f, "malformed tuning file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "invalid tuning: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

// ── Craft control model ───────────────────────────────────────────────────────

/// How held direction intents turn into craft motion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlModel {
    /// Position moves by `speed` along every pressed axis.
    Direct { speed: f32 },
    /// Velocity accelerates while a key is held and bleeds off otherwise.
    Inertial {
        acceleration: f32,
        deceleration: f32,
        max_speed: f32,
    },
}

// ── Target tiers ──────────────────────────────────────────────────────────────

/// Stat bundle attached to a target tier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierStats {
    /// Share of spawns; the three weights must sum to 1.
    pub weight: f32,
    pub health: u32,
    pub speed_multiplier: f32,
    pub score_value: u32,
    pub size_multiplier: f32,
    /// Lateral sway in pixels; zero means the target falls straight.
    pub oscillation_amplitude: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub regular: TierStats,
    pub fast: TierStats,
    pub tank: TierStats,
}

impl Default for TierTable {
    fn default() -> Self {
        TierTable {
            regular: TierStats {
                weight: 0.6,
                health: 1,
                speed_multiplier: 1.0,
                score_value: 10,
                size_multiplier: 1.0,
                oscillation_amplitude: 0.0,
            },
            fast: TierStats {
                weight: 0.25,
                health: 1,
                speed_multiplier: 1.6,
                score_value: 20,
                size_multiplier: 0.8,
                oscillation_amplitude: 40.0,
            },
            tank: TierStats {
                weight: 0.15,
                health: 3,
                speed_multiplier: 0.6,
                score_value: 50,
                size_multiplier: 1.4,
                oscillation_amplitude: 0.0,
            },
        }
    }
}

// ── Explosion bursts ──────────────────────────────────────────────────────────

/// Parameters for one batch of particles.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BurstSpec {
    pub count: u32,
    pub min_size: f32,
    pub max_size: f32,
    /// Each velocity component is drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    pub life_ticks: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BurstTable {
    pub target_destroyed: BurstSpec,
    pub craft_hit: BurstSpec,
    pub craft_fire: BurstSpec,
    pub craft_debris: BurstSpec,
    pub craft_flare: BurstSpec,
}

impl Default for BurstTable {
    fn default() -> Self {
        BurstTable {
            target_destroyed: BurstSpec { count: 15, min_size: 2.0, max_size: 6.0, max_speed: 3.0, life_ticks: 30 },
            craft_hit:        BurstSpec { count: 10, min_size: 2.0, max_size: 5.0, max_speed: 2.5, life_ticks: 20 },
            craft_fire:       BurstSpec { count: 15, min_size: 3.0, max_size: 8.0, max_speed: 4.0, life_ticks: 30 },
            craft_debris:     BurstSpec { count: 10, min_size: 1.0, max_size: 3.0, max_speed: 6.0, life_ticks: 25 },
            craft_flare:      BurstSpec { count: 8,  min_size: 4.0, max_size: 10.0, max_speed: 1.5, life_ticks: 15 },
        }
    }
}

// ── Master tuning ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,

    pub craft_width: f32,
    pub craft_height: f32,
    pub craft_start_x: f32,
    pub craft_start_y: f32,
    pub craft_max_health: u32,
    pub control: ControlModel,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub fire_cooldown_ticks: u32,
    /// Horizontal gap between the three bullets of a powered-up volley.
    pub spread_offset: f32,

    pub target_base_size: f32,
    pub target_base_speed: f32,
    pub target_spawn_rate: f32,
    pub tiers: TierTable,

    pub power_up_chance: f32,
    pub power_up_size: f32,
    pub power_up_speed: f32,
    pub weapon_duration_ticks: u32,

    pub difficulty_cadence_ticks: u64,
    pub spawn_rate_step: f32,
    pub spawn_rate_cap: f32,
    pub target_speed_step: f32,
    pub target_speed_cap: f32,
    pub craft_speed_step: f32,
    pub craft_acceleration_step: f32,

    /// Zero ends the run the moment health hits zero.
    pub game_over_delay_ticks: u32,
    pub exploding_burst_interval: u32,
    pub bursts: BurstTable,

    pub star_count: u32,
    pub star_min_speed: f32,
    pub star_max_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            playfield_width: 800.0,
            playfield_height: 600.0,

            craft_width: 60.0,
            craft_height: 40.0,
            craft_start_x: 370.0,
            craft_start_y: 500.0,
            craft_max_health: 3,
            control: ControlModel::Inertial {
                acceleration: 0.5,
                deceleration: 0.3,
                max_speed: 6.0,
            },

            bullet_width: 4.0,
            bullet_height: 10.0,
            bullet_speed: 7.0,
            fire_cooldown_ticks: 10,
            spread_offset: 15.0,

            target_base_size: 30.0,
            target_base_speed: 2.0,
            target_spawn_rate: 0.02,
            tiers: TierTable::default(),

            power_up_chance: 0.005,
            power_up_size: 20.0,
            power_up_speed: 2.0,
            weapon_duration_ticks: 300,

            difficulty_cadence_ticks: 1800,
            spawn_rate_step: 0.005,
            spawn_rate_cap: 0.05,
            target_speed_step: 0.5,
            target_speed_cap: 5.0,
            craft_speed_step: 0.25,
            craft_acceleration_step: 0.02,

            game_over_delay_ticks: 30,
            exploding_burst_interval: 6,
            bursts: BurstTable::default(),

            star_count: 100,
            star_min_speed: 0.5,
            star_max_speed: 2.0,
        }
    }
}

impl Tuning {
    /// The same canonical table but with the simple direct-motion craft.
    pub fn direct(speed: f32) -> Self {
        Tuning {
            control: ControlModel::Direct { speed },
            ..Tuning::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Tuning, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Tuning, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Tuning::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("craft_width", self.craft_width),
            ("craft_height", self.craft_height),
            ("target_base_size", self.target_base_size),
            ("power_up_size", self.power_up_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{} must be positive, got {}", name, value)));
            }
        }
        if self.craft_width > self.playfield_width || self.craft_height > self.playfield_height {
            return Err(ConfigError::Invalid("craft does not fit the playfield".into()));
        }

        let weights = self.tiers.regular.weight + self.tiers.fast.weight + self.tiers.tank.weight;
        if (weights - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Invalid(format!("tier weights sum to {}, expected 1", weights)));
        }

        for (name, chance) in [
            ("target_spawn_rate", self.target_spawn_rate),
            ("spawn_rate_cap", self.spawn_rate_cap),
            ("power_up_chance", self.power_up_chance),
        ] {
            if !(0.0..1.0).contains(&chance) {
                return Err(ConfigError::Invalid(format!("{} must lie in [0, 1), got {}", name, chance)));
            }
        }

        if self.difficulty_cadence_ticks == 0 {
            return Err(ConfigError::Invalid("difficulty_cadence_ticks must be non-zero".into()));
        }
        if self.craft_max_health == 0 {
            return Err(ConfigError::Invalid("craft_max_health must be non-zero".into()));
        }
        Ok(())
    }
}
