/// Difficulty ramp: every `difficulty_cadence_ticks` of play the level goes
/// up, targets spawn more often and fall faster, and the craft gets a little
/// quicker.

use log::info;

use crate::config::ControlModel;
use crate::entities::{GameEvent, GameState};

/// Level up if `elapsed_ticks` sits on a cadence boundary.  Returns whether
/// the level changed.
pub fn update_difficulty(state: &mut GameState) -> bool {
    let t = &state.tuning;
    // A zero cadence never levels up.
    if state.elapsed_ticks == 0 || state.elapsed_ticks.checked_rem(t.difficulty_cadence_ticks) != Some(0) {
        return false;
    }

    state.level += 1;
    state.target_spawn_rate = (state.target_spawn_rate + t.spawn_rate_step).min(t.spawn_rate_cap);
    state.target_base_speed = (state.target_base_speed + t.target_speed_step).min(t.target_speed_cap);

    state.craft.max_speed += t.craft_speed_step;
    if let ControlModel::Inertial { .. } = t.control {
        state.craft.acceleration += t.craft_acceleration_step;
    }

    info!(
        "level {}: spawn rate {:.3}, target speed {:.1}",
        state.level, state.target_spawn_rate, state.target_base_speed
    );
    state.events.push(GameEvent::LevelUp(state.level));
    true
}
