/// Per-tick motion for the craft and every pooled entity.
///
/// Each updater moves its pool and then drops exactly the entities that
/// crossed their exit boundary.

use crate::config::ControlModel;
use crate::entities::{
    Bullet, Craft, GameState, Particle, PowerUp, Star, Target, GLOW_MAX, GLOW_MIN, GLOW_STEP,
};

/// Held direction and fire intents for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub firing: bool,
}

/// Amplitude is multiplied by `sin(y * SWAY_FREQUENCY)`.
pub const SWAY_FREQUENCY: f32 = 0.02;

// ── Craft ─────────────────────────────────────────────────────────────────────

/// Move the craft per its control model and keep it inside the playfield.
pub fn update_craft(craft: &mut Craft, intent: &Intent, control: &ControlModel, width: f32, height: f32) {
    match *control {
        ControlModel::Direct { .. } => {
            let speed = craft.max_speed;
            if intent.left {
                craft.x -= speed;
            }
            if intent.right {
                craft.x += speed;
            }
            if intent.up {
                craft.y -= speed;
            }
            if intent.down {
                craft.y += speed;
            }
        }
        ControlModel::Inertial { deceleration, .. } => {
            craft.vx = steer(craft.vx, intent.left, intent.right, craft.acceleration, deceleration, craft.max_speed);
            craft.vy = steer(craft.vy, intent.up, intent.down, craft.acceleration, deceleration, craft.max_speed);
            craft.x += craft.vx;
            craft.y += craft.vy;
        }
    }
    clamp_craft(craft, width, height);
}

/// One axis of the inertial model.  `neg`/`pos` are the two opposing keys.
fn steer(v: f32, neg: bool, pos: bool, accel: f32, decel: f32, max_speed: f32) -> f32 {
    let v = if !v.is_finite() { 0.0 } else { v };
    let v = match (neg, pos) {
        (true, false) => v - accel,
        (false, true) => v + accel,
        _ if v > 0.0 => (v - decel).max(0.0),
        _ => (v + decel).min(0.0),
    };
    v.clamp(-max_speed, max_speed)
}

/// Clamp to `[0, size - craft]` on both axes, zeroing velocity on contact.
pub fn clamp_craft(craft: &mut Craft, width: f32, height: f32) {
    let max_x = width - craft.width;
    let max_y = height - craft.height;

    if !craft.x.is_finite() {
        craft.x = max_x / 2.0;
        craft.vx = 0.0;
    }
    if !craft.y.is_finite() {
        craft.y = max_y;
        craft.vy = 0.0;
    }

    if craft.x <= 0.0 {
        craft.x = 0.0;
        craft.vx = 0.0;
    } else if craft.x >= max_x {
        craft.x = max_x;
        craft.vx = 0.0;
    }
    if craft.y <= 0.0 {
        craft.y = 0.0;
        craft.vy = 0.0;
    } else if craft.y >= max_y {
        craft.y = max_y;
        craft.vy = 0.0;
    }
}

/// Step the engine glow by `GLOW_STEP`, flipping direction at either bound.
pub fn update_glow(craft: &mut Craft) {
    if craft.glow_rising {
        craft.engine_glow += GLOW_STEP;
        if craft.engine_glow >= GLOW_MAX {
            craft.engine_glow = GLOW_MAX;
            craft.glow_rising = false;
        }
    } else {
        craft.engine_glow -= GLOW_STEP;
        if craft.engine_glow <= GLOW_MIN {
            craft.engine_glow = GLOW_MIN;
            craft.glow_rising = true;
        }
    }
}

/// Count down the fire cooldown and the weapon power-up.
pub fn update_craft_timers(craft: &mut Craft) {
    craft.fire_cooldown = craft.fire_cooldown.saturating_sub(1);
    if craft.powered_up {
        craft.power_up_ticks = craft.power_up_ticks.saturating_sub(1);
        if craft.power_up_ticks == 0 {
            craft.powered_up = false;
        }
    }
}

// ── Pools ─────────────────────────────────────────────────────────────────────

/// Bullets rise; removed once `y < 0`.
pub fn update_bullets(bullets: &mut Vec<Bullet>) {
    for b in bullets.iter_mut() {
        b.y -= b.speed;
    }
    bullets.retain(|b| b.y >= 0.0);
}

/// Targets fall (swaying ones also slide sideways); removed once
/// `y > height`.
pub fn update_targets(targets: &mut Vec<Target>, height: f32) {
    for t in targets.iter_mut() {
        t.y += t.speed;
        if let Some(sway) = t.sway {
            t.x = sway.origin_x + (t.y * SWAY_FREQUENCY).sin() * sway.amplitude;
        }
    }
    targets.retain(|t| t.y <= height);
}

pub fn update_power_ups(power_ups: &mut Vec<PowerUp>, height: f32) {
    for p in power_ups.iter_mut() {
        p.y += p.speed;
    }
    power_ups.retain(|p| p.y <= height);
}

pub fn update_explosions(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

/// Stars drift down and wrap back to the top.
pub fn update_stars(stars: &mut [Star], height: f32) {
    for s in stars.iter_mut() {
        s.y += s.speed;
        if s.y > height {
            s.y -= height;
        }
    }
}

/// Advance every gameplay pool in the fixed order bullets, targets,
/// power-ups, explosions.
pub fn update_pools(state: &mut GameState) {
    let height = state.tuning.playfield_height;
    update_bullets(&mut state.bullets);
    update_targets(&mut state.targets, height);
    update_power_ups(&mut state.power_ups, height);
    update_explosions(&mut state.explosions);
}
