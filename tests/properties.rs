use proptest::prelude::*;

use sky_raider::collision::is_colliding;
use sky_raider::compute::{init_state, step, TickInput};
use sky_raider::config::Tuning;
use sky_raider::entities::{Bullet, BulletStyle, Rect};
use sky_raider::kinematics::{update_bullets, Intent};
use sky_raider::rng::ScriptedRolls;

fn intent() -> impl Strategy<Value = Intent> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(up, down, left, right)| {
        Intent { up, down, left, right, firing: false }
    })
}

fn rect() -> impl Strategy<Value = Rect> {
    (-100.0f32..900.0, -100.0f32..700.0, 1.0f32..80.0, 1.0f32..80.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn inertial_craft_never_leaves_playfield(intents in prop::collection::vec(intent(), 1..300)) {
        let tuning = Tuning { star_count: 0, ..Tuning::default() };
        let mut s = init_state(tuning, &mut ScriptedRolls::quiet());
        let mut rng = ScriptedRolls::quiet();
        for i in intents {
            step(&mut s, &TickInput::held(i), &mut rng);
            prop_assert!(s.craft.x >= 0.0 && s.craft.x <= 740.0);
            prop_assert!(s.craft.y >= 0.0 && s.craft.y <= 560.0);
            prop_assert!(s.craft.vx.abs() <= s.craft.max_speed);
        }
    }

    #[test]
    fn direct_craft_never_leaves_playfield(intents in prop::collection::vec(intent(), 1..300)) {
        let tuning = Tuning { star_count: 0, ..Tuning::direct(5.0) };
        let mut s = init_state(tuning, &mut ScriptedRolls::quiet());
        let mut rng = ScriptedRolls::quiet();
        for i in intents {
            step(&mut s, &TickInput::held(i), &mut rng);
            prop_assert!(s.craft.x >= 0.0 && s.craft.x <= 740.0);
            prop_assert!(s.craft.y >= 0.0 && s.craft.y <= 560.0);
        }
    }

    #[test]
    fn overlap_is_symmetric(a in rect(), b in rect()) {
        prop_assert_eq!(is_colliding(&a, &b), is_colliding(&b, &a));
    }

    #[test]
    fn edge_neighbours_never_overlap(a in rect(), w in 1.0f32..80.0, h in 1.0f32..80.0) {
        let right = Rect::new(a.x + a.width, a.y, w, h);
        let below = Rect::new(a.x, a.y + a.height, w, h);
        prop_assert!(!is_colliding(&a, &right));
        prop_assert!(!is_colliding(&a, &below));
    }

    #[test]
    fn only_bullets_past_the_top_are_removed(ys in prop::collection::vec(0.0f32..600.0, 0..40)) {
        let mut bullets: Vec<Bullet> = ys
            .iter()
            .map(|&y| Bullet { x: 0.0, y, width: 4.0, height: 10.0, speed: 7.0, style: BulletStyle::Standard })
            .collect();
        update_bullets(&mut bullets);
        let survivors = ys.iter().filter(|&&y| y - 7.0 >= 0.0).count();
        prop_assert_eq!(bullets.len(), survivors);
    }
}
