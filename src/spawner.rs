/// Probabilistic creation of targets, power-ups, explosion bursts and the
/// starfield.  Every random number comes through the injected `RngSource`.

use log::debug;

use crate::config::{BurstSpec, TierTable, Tuning};
use crate::entities::{
    GameState, Particle, ParticleKind, PowerUp, PowerUpEffect, Star, Sway, Target, TargetTier,
};
use crate::rng::{range, RngSource};

// ── Targets ───────────────────────────────────────────────────────────────────

/// Pick a tier from a roll against the cumulative weights.
pub fn choose_tier(r: f64, table: &TierTable) -> TargetTier {
    let regular = table.regular.weight as f64;
    let fast = regular + table.fast.weight as f64;
    if r < regular {
        TargetTier::Regular
    } else if r < fast {
        TargetTier::Fast
    } else {
        TargetTier::Tank
    }
}

/// Build a target of the given tier just above the top edge.
pub fn make_target(tier: TargetTier, x: f32, tuning: &Tuning, base_speed: f32) -> Target {
    let stats = tier.stats(&tuning.tiers);
    let size = tuning.target_base_size * stats.size_multiplier;
    Target {
        x,
        y: -size,
        width: size,
        height: size,
        speed: base_speed * stats.speed_multiplier,
        health: stats.health,
        score_value: stats.score_value,
        tier,
        sway: (stats.oscillation_amplitude > 0.0).then_some(Sway {
            origin_x: x,
            amplitude: stats.oscillation_amplitude,
        }),
    }
}

/// Spawn roll, then (only on success) tier roll and x roll.
pub fn maybe_spawn_target(state: &mut GameState, rng: &mut impl RngSource) -> bool {
    if rng.roll() >= state.target_spawn_rate as f64 {
        return false;
    }
    let tier = choose_tier(rng.roll(), &state.tuning.tiers);
    let size = state.tuning.target_base_size * tier.stats(&state.tuning.tiers).size_multiplier;
    let x = range(rng, 0.0, (state.tuning.playfield_width - size).max(0.0));
    let target = make_target(tier, x, &state.tuning, state.target_base_speed);
    debug!("spawned {:?} target at x={:.1}", tier, x);
    state.targets.push(target);
    true
}

// ── Power-ups ─────────────────────────────────────────────────────────────────

/// Spawn roll, then effect roll (50/50) and x roll.
pub fn maybe_spawn_power_up(state: &mut GameState, rng: &mut impl RngSource) -> bool {
    if rng.roll() >= state.tuning.power_up_chance as f64 {
        return false;
    }
    let effect = if rng.roll() < 0.5 {
        PowerUpEffect::Health
    } else {
        PowerUpEffect::Weapon
    };
    let size = state.tuning.power_up_size;
    let x = range(rng, 0.0, (state.tuning.playfield_width - size).max(0.0));
    debug!("spawned {:?} power-up at x={:.1}", effect, x);
    state.power_ups.push(PowerUp {
        x,
        y: -size,
        width: size,
        height: size,
        speed: state.tuning.power_up_speed,
        effect,
    });
    true
}

// ── Explosions ────────────────────────────────────────────────────────────────

/// Emit `spec.count` particles at `(x, y)`.  Three rolls per particle:
/// size, horizontal speed, vertical speed.
pub fn burst(
    particles: &mut Vec<Particle>,
    x: f32,
    y: f32,
    spec: &BurstSpec,
    kind: ParticleKind,
    rng: &mut impl RngSource,
) {
    particles.reserve(spec.count as usize);
    for _ in 0..spec.count {
        let size = range(rng, spec.min_size, spec.max_size);
        let vx = range(rng, -spec.max_speed, spec.max_speed);
        let vy = range(rng, -spec.max_speed, spec.max_speed);
        particles.push(Particle {
            x,
            y,
            vx,
            vy,
            size,
            life: spec.life_ticks,
            kind,
        });
    }
}

/// Fireball, debris and engine flare, all centred on the craft.
pub fn craft_destroyed_burst(state: &mut GameState, rng: &mut impl RngSource) {
    let (cx, cy) = (state.craft.center_x(), state.craft.center_y());
    let bursts = state.tuning.bursts;
    burst(&mut state.explosions, cx, cy, &bursts.craft_fire, ParticleKind::Fire, rng);
    burst(&mut state.explosions, cx, cy, &bursts.craft_debris, ParticleKind::Debris, rng);
    // Flare comes out of the engine at the tail of the craft.
    let tail_y = state.craft.y + state.craft.height;
    burst(&mut state.explosions, cx, tail_y, &bursts.craft_flare, ParticleKind::Flare, rng);
}

// ── Background ────────────────────────────────────────────────────────────────

pub fn spawn_stars(tuning: &Tuning, rng: &mut impl RngSource) -> Vec<Star> {
    (0..tuning.star_count)
        .map(|_| Star {
            x: range(rng, 0.0, tuning.playfield_width),
            y: range(rng, 0.0, tuning.playfield_height),
            size: range(rng, 0.5, 2.0),
            speed: range(rng, tuning.star_min_speed, tuning.star_max_speed),
        })
        .collect()
}
