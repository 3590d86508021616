/// Overlap tests and the score/damage effects they trigger.
///
/// Entities consumed during a pass are only marked; pools are compacted once
/// the pass is done so indices stay stable while iterating.

use log::debug;

use crate::compute::begin_destruction;
use crate::entities::{Bounds, GameEvent, GameState, ParticleKind, PowerUpEffect, Rect};
use crate::rng::RngSource;
use crate::spawner::burst;

/// Strict AABB overlap: boxes that only share an edge do not collide.
pub fn is_colliding(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

fn compact<T>(pool: &mut Vec<T>, alive: &[bool]) {
    let mut i = 0;
    pool.retain(|_| {
        let keep = alive[i];
        i += 1;
        keep
    });
}

/// Bullets against targets.  Both pools are walked from the back; each bullet
/// hits at most one target and is spent on that hit.
pub fn resolve_bullet_hits(state: &mut GameState, rng: &mut impl RngSource) -> u32 {
    let mut bullet_alive = vec![true; state.bullets.len()];
    let mut target_alive = vec![true; state.targets.len()];
    let mut gained = 0u32;
    let spec = state.tuning.bursts.target_destroyed;

    for bi in (0..state.bullets.len()).rev() {
        let bullet = state.bullets[bi].rect();
        for ti in (0..state.targets.len()).rev() {
            if !target_alive[ti] || !is_colliding(&bullet, &state.targets[ti].rect()) {
                continue;
            }
            bullet_alive[bi] = false;
            let target = &mut state.targets[ti];
            target.health = target.health.saturating_sub(1);
            if target.health == 0 {
                target_alive[ti] = false;
                gained = gained.saturating_add(target.score_value);
                let (cx, cy) = (target.x + target.width / 2.0, target.y + target.height / 2.0);
                debug!("{:?} target destroyed for {} points", target.tier, target.score_value);
                burst(&mut state.explosions, cx, cy, &spec, ParticleKind::Spark, rng);
            }
            break;
        }
    }

    compact(&mut state.bullets, &bullet_alive);
    compact(&mut state.targets, &target_alive);
    state.score = state.score.saturating_add(gained);
    gained
}

/// Targets that ram the craft are destroyed without score and cost one
/// point of health each.  The hit that takes the last point starts the
/// destruction sequence and ends the pass.  Ignored while the craft is
/// already exploding.
pub fn resolve_craft_hits(state: &mut GameState, rng: &mut impl RngSource) -> u32 {
    if state.craft.exploding || state.craft.health == 0 {
        return 0;
    }
    let craft = state.craft.rect();
    let mut target_alive = vec![true; state.targets.len()];
    let mut hits = 0u32;
    let spec = state.tuning.bursts.craft_hit;

    for ti in (0..state.targets.len()).rev() {
        let target = &state.targets[ti];
        if !is_colliding(&craft, &target.rect()) {
            continue;
        }
        target_alive[ti] = false;
        let (cx, cy) = (target.x + target.width / 2.0, target.y + target.height / 2.0);
        burst(&mut state.explosions, cx, cy, &spec, ParticleKind::Spark, rng);
        state.craft.health = state.craft.health.saturating_sub(1);
        state.events.push(GameEvent::CraftHit { health: state.craft.health });
        hits += 1;
        if state.craft.health == 0 {
            break;
        }
    }

    compact(&mut state.targets, &target_alive);
    if state.craft.health == 0 {
        begin_destruction(state, rng);
    }
    hits
}

/// Apply and consume every power-up touching the craft.  A destroyed craft
/// collects nothing.
pub fn resolve_power_up_pickups(state: &mut GameState) -> u32 {
    if state.craft.exploding || state.craft.health == 0 {
        return 0;
    }
    let craft_rect = state.craft.rect();
    let weapon_ticks = state.tuning.weapon_duration_ticks;
    let mut picked = 0u32;
    let mut alive = vec![true; state.power_ups.len()];

    for (i, p) in state.power_ups.iter().enumerate() {
        if !is_colliding(&craft_rect, &p.rect()) {
            continue;
        }
        alive[i] = false;
        let craft = &mut state.craft;
        match p.effect {
            PowerUpEffect::Health => {
                craft.health = (craft.health + 1).min(craft.max_health);
            }
            PowerUpEffect::Weapon => {
                craft.powered_up = true;
                craft.power_up_ticks = weapon_ticks;
            }
        }
        state.events.push(GameEvent::PowerUpCollected(p.effect));
        picked += 1;
    }

    compact(&mut state.power_ups, &alive);
    picked
}

/// Run all three resolvers in order and report any score change.
pub fn resolve_collisions(state: &mut GameState, rng: &mut impl RngSource) {
    let gained = resolve_bullet_hits(state, rng);
    resolve_craft_hits(state, rng);
    resolve_power_up_pickups(state);
    if gained > 0 {
        state.events.push(GameEvent::ScoreChanged(state.score));
    }
}
