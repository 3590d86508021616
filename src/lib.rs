//! Sky Raider - a single-screen arcade shooter.
//!
//! The crate is the simulation core: entity pools, spawning, motion,
//! collision resolution, difficulty and the play/pause/game-over state
//! machine.  The terminal front end in `main.rs` only feeds `TickInput`s in
//! and paints `Snapshot`s out.

pub mod collision;
pub mod compute;
pub mod config;
pub mod difficulty;
pub mod entities;
pub mod kinematics;
pub mod rng;
pub mod spawner;

pub use compute::{Command, TickInput};
pub use config::{ConfigError, ControlModel, Tuning};
pub use entities::{GameEvent, GameState, Mode, Snapshot};
pub use kinematics::Intent;
pub use rng::{RngSource, ScriptedRolls};
