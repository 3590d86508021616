/// Game state machine and the per-tick update sequence.
///
/// `step` mutates a state in place; `tick` is the pure flavour that leaves
/// its argument untouched and returns the next frame.  All randomness comes
/// through the injected `RngSource`, so tests can script every draw.

use log::{debug, info};

use crate::collision::resolve_collisions;
use crate::config::Tuning;
use crate::difficulty::update_difficulty;
use crate::entities::{Bullet, BulletStyle, Craft, GameEvent, GameState, Mode, ParticleKind};
use crate::kinematics::{
    update_craft, update_craft_timers, update_glow, update_pools, update_stars, Intent,
};
use crate::rng::RngSource;
use crate::spawner::{burst, craft_destroyed_burst, maybe_spawn_power_up, maybe_spawn_target, spawn_stars};

pub const STARTING_LEVEL: u32 = 1;

/// Edge-triggered commands from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    TogglePause,
    Restart,
}

/// Everything the input layer hands the simulation for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub intent: Intent,
    pub command: Option<Command>,
}

impl TickInput {
    pub fn held(intent: Intent) -> Self {
        TickInput { intent, command: None }
    }

    pub fn command(command: Command) -> Self {
        TickInput { intent: Intent::default(), command: Some(command) }
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the opening state.  The RNG is only used to scatter the stars.
pub fn init_state(tuning: Tuning, rng: &mut impl RngSource) -> GameState {
    let stars = spawn_stars(&tuning, rng);
    GameState {
        craft: Craft::new(&tuning),
        bullets: Vec::new(),
        targets: Vec::new(),
        power_ups: Vec::new(),
        explosions: Vec::new(),
        stars,
        score: 0,
        level: STARTING_LEVEL,
        elapsed_ticks: 0,
        target_spawn_rate: tuning.target_spawn_rate,
        target_base_speed: tuning.target_base_speed,
        mode: Mode::Playing,
        events: Vec::new(),
        tuning,
    }
}

/// Back to the opening state.  The starfield is kept.
pub fn restart(state: &mut GameState) {
    let t = &state.tuning;
    state.craft = Craft::new(t);
    state.target_spawn_rate = t.target_spawn_rate;
    state.target_base_speed = t.target_base_speed;
    state.bullets.clear();
    state.targets.clear();
    state.power_ups.clear();
    state.explosions.clear();
    state.score = 0;
    state.level = STARTING_LEVEL;
    state.elapsed_ticks = 0;
    set_mode(state, Mode::Playing);
    state.events.push(GameEvent::ScoreChanged(0));
    info!("game restarted");
}

fn set_mode(state: &mut GameState, mode: Mode) {
    if state.mode != mode {
        state.mode = mode;
        state.events.push(GameEvent::ModeChanged(mode));
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

/// Apply a command if it is legal in the current mode.  Returns whether the
/// state changed.
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    let next = match (command, state.mode) {
        (Command::Pause | Command::TogglePause, Mode::Playing) => Mode::Paused,
        (Command::Resume | Command::TogglePause, Mode::Paused) => Mode::Playing,
        (Command::Restart, Mode::GameOver) => {
            restart(state);
            return true;
        }
        (command, mode) => {
            debug!("ignoring {:?} while {:?}", command, mode);
            return false;
        }
    };
    set_mode(state, next);
    true
}

// ── Shooting ──────────────────────────────────────────────────────────────────

/// Fire from the nose of the craft if the cooldown allows.  A powered-up
/// craft fires three bullets side by side.
pub fn shoot(state: &mut GameState) -> bool {
    let craft = &state.craft;
    if state.mode != Mode::Playing || craft.exploding || craft.fire_cooldown > 0 {
        return false;
    }
    let t = &state.tuning;
    let x = craft.center_x() - t.bullet_width / 2.0;
    let bullet = |dx: f32, style: BulletStyle| Bullet {
        x: x + dx,
        y: craft.y,
        width: t.bullet_width,
        height: t.bullet_height,
        speed: t.bullet_speed,
        style,
    };

    if craft.powered_up {
        let spread = t.spread_offset;
        state.bullets.extend([
            bullet(-spread, BulletStyle::Powered),
            bullet(0.0, BulletStyle::Powered),
            bullet(spread, BulletStyle::Powered),
        ]);
    } else {
        state.bullets.push(bullet(0.0, BulletStyle::Standard));
    }
    state.craft.fire_cooldown = state.craft.fire_cooldown_max;
    true
}

// ── Craft destruction ─────────────────────────────────────────────────────────

/// Health is gone: burst, stop the craft and start the countdown to game
/// over (or end the run at once when there is no delay).
pub(crate) fn begin_destruction(state: &mut GameState, rng: &mut impl RngSource) {
    craft_destroyed_burst(state, rng);
    state.events.push(GameEvent::CraftDestroyed);
    state.craft.vx = 0.0;
    state.craft.vy = 0.0;
    state.craft.powered_up = false;
    state.craft.power_up_ticks = 0;

    let delay = state.tuning.game_over_delay_ticks;
    if delay == 0 {
        end_run(state);
    } else {
        state.craft.exploding = true;
        state.craft.explosion_ticks = delay;
        debug!("craft destroyed, game over in {} ticks", delay);
    }
}

/// One tick of the burning craft: count down and keep the fire going.
fn advance_destruction(state: &mut GameState, rng: &mut impl RngSource) {
    let craft = &mut state.craft;
    craft.explosion_ticks = craft.explosion_ticks.saturating_sub(1);
    let interval = state.tuning.exploding_burst_interval.max(1);
    if craft.explosion_ticks > 0 && craft.explosion_ticks % interval == 0 {
        let (cx, cy) = (craft.center_x(), craft.center_y());
        let spec = state.tuning.bursts.craft_fire;
        burst(&mut state.explosions, cx, cy, &spec, ParticleKind::Fire, rng);
    }
}

fn end_run(state: &mut GameState) {
    state.craft.exploding = false;
    state.craft.explosion_ticks = 0;
    set_mode(state, Mode::GameOver);
    info!("game over, final score {} at level {}", state.score, state.level);
}

/// A finished destruction sequence ends the run.  Health that reached zero
/// outside a collision pass still starts one.
fn check_craft_status(state: &mut GameState, rng: &mut impl RngSource) {
    if state.craft.exploding {
        if state.craft.explosion_ticks == 0 {
            end_run(state);
        }
    } else if state.craft.health == 0 {
        begin_destruction(state, rng);
    }
}

// ── Per-tick update ───────────────────────────────────────────────────────────

/// Advance the simulation by one tick in place.
///
/// While playing the order is fixed: difficulty, stars, craft, bullets,
/// targets, power-ups, explosions, collisions, spawning.  Paused and
/// game-over ticks only move the stars, as does a tick whose command
/// changed the mode.
pub fn step(state: &mut GameState, input: &TickInput, rng: &mut impl RngSource) {
    state.events.clear();
    let switched = input.command.map_or(false, |c| apply_command(state, c));

    let (width, height) = (state.tuning.playfield_width, state.tuning.playfield_height);
    if switched || state.mode != Mode::Playing {
        update_stars(&mut state.stars, height);
        return;
    }

    state.elapsed_ticks += 1;
    update_difficulty(state);
    update_stars(&mut state.stars, height);

    if state.craft.exploding {
        advance_destruction(state, rng);
    } else {
        update_craft_timers(&mut state.craft);
        let control = state.tuning.control;
        update_craft(&mut state.craft, &input.intent, &control, width, height);
        update_glow(&mut state.craft);
        if input.intent.firing {
            shoot(state);
        }
    }

    update_pools(state);
    resolve_collisions(state, rng);
    if state.mode != Mode::Playing {
        return;
    }
    maybe_spawn_target(state, rng);
    maybe_spawn_power_up(state, rng);

    check_craft_status(state, rng);
}

/// Pure tick: returns the next state and leaves `state` untouched.
pub fn tick(state: &GameState, input: &TickInput, rng: &mut impl RngSource) -> GameState {
    let mut next = state.clone();
    step(&mut next, input, rng);
    next
}
