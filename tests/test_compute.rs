use sky_raider::compute::*;
use sky_raider::config::Tuning;
use sky_raider::entities::*;
use sky_raider::kinematics::Intent;
use sky_raider::rng::ScriptedRolls;
use sky_raider::spawner::make_target;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    let tuning = Tuning { star_count: 0, ..Tuning::default() };
    init_state(tuning, &mut ScriptedRolls::quiet())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn idle() -> TickInput {
    TickInput::default()
}

fn firing() -> TickInput {
    TickInput::held(Intent { firing: true, ..Intent::default() })
}

/// A regular target sitting right on top of the craft.
fn rammer(s: &GameState) -> Target {
    let mut t = make_target(TargetTier::Regular, s.craft.x + 10.0, &s.tuning, 0.0);
    t.y = s.craft.y;
    t
}

// ── init_state ────────────────────────────────────────────────────────────────

#[test]
fn init_state_defaults() {
    let s = init_state(Tuning::default(), &mut seeded_rng());
    assert_eq!(s.mode, Mode::Playing);
    assert_eq!(s.score, 0);
    assert_eq!(s.level, 1);
    assert_eq!(s.elapsed_ticks, 0);
    assert_eq!(s.target_spawn_rate, 0.02);
    assert_eq!(s.target_base_speed, 2.0);
    assert_eq!(s.stars.len(), 100);
    assert!(s.bullets.is_empty());
    assert!(s.targets.is_empty());
    assert!(s.power_ups.is_empty());
    assert!(s.explosions.is_empty());
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_increments_elapsed_ticks() {
    let mut s = make_state();
    s.elapsed_ticks = 5;
    let s2 = tick(&s, &idle(), &mut ScriptedRolls::quiet());
    assert_eq!(s2.elapsed_ticks, 6);
}

#[test]
fn tick_does_not_mutate_original() {
    let mut s = make_state();
    s.targets.push(make_target(TargetTier::Regular, 100.0, &s.tuning, 2.0));
    let s2 = tick(&s, &firing(), &mut ScriptedRolls::quiet());
    assert_eq!(s.targets[0].y, -30.0);
    assert!(s.bullets.is_empty());
    assert_eq!(s2.targets[0].y, -28.0);
    assert_eq!(s2.bullets.len(), 1);
}

#[test]
fn tick_spawns_target_from_roll() {
    let s = make_state();
    // target spawn roll, tier roll, x roll; power-up roll falls back to 0.999
    let s2 = tick(&s, &idle(), &mut ScriptedRolls::new(vec![0.01, 0.0, 0.0]));
    assert_eq!(s2.targets.len(), 1);
    assert_eq!(s2.targets[0].y, -30.0); // spawned after motion, so unmoved
}

#[test]
fn destroying_target_in_tick_reports_score() {
    let mut s = make_state();
    let mut t = make_target(TargetTier::Regular, 100.0, &s.tuning, 2.0);
    t.y = 100.0;
    s.targets.push(t);
    s.bullets.push(Bullet { x: 110.0, y: 140.0, width: 4.0, height: 10.0, speed: 7.0, style: BulletStyle::Standard });
    // after motion: bullet y=133..143, target y=102..132 → no overlap yet
    let s = tick(&s, &idle(), &mut ScriptedRolls::quiet());
    assert_eq!(s.score, 0);
    // bullet y=126, target y=104..134 → hit
    let s = tick(&s, &idle(), &mut ScriptedRolls::quiet());
    assert_eq!(s.score, 10);
    assert!(s.events.contains(&GameEvent::ScoreChanged(10)));
    assert_eq!(s.explosions.len(), 15);
}

// ── shooting ──────────────────────────────────────────────────────────────────

#[test]
fn held_fire_respects_cooldown() {
    let mut s = make_state();
    let mut rng = ScriptedRolls::quiet();
    step(&mut s, &firing(), &mut rng);
    assert_eq!(s.bullets.len(), 1);
    let b = &s.bullets[0];
    assert_eq!(b.x, 398.0); // craft centre 400 minus half the bullet width
    assert_eq!(b.y, 493.0); // fired from y=500, then moved once
    for _ in 0..9 {
        step(&mut s, &firing(), &mut rng);
    }
    assert_eq!(s.bullets.len(), 1);
    step(&mut s, &firing(), &mut rng);
    assert_eq!(s.bullets.len(), 2);
}

#[test]
fn powered_craft_fires_three_bullets() {
    let mut s = make_state();
    s.craft.powered_up = true;
    s.craft.power_up_ticks = 100;
    assert!(shoot(&mut s));
    let xs: Vec<f32> = s.bullets.iter().map(|b| b.x).collect();
    assert_eq!(xs, vec![383.0, 398.0, 413.0]);
    assert!(s.bullets.iter().all(|b| b.style == BulletStyle::Powered));
    assert!(!shoot(&mut s)); // cooling down
}

#[test]
fn weapon_power_up_wears_off() {
    let mut s = make_state();
    s.craft.powered_up = true;
    s.craft.power_up_ticks = 300;
    let mut rng = ScriptedRolls::quiet();
    for _ in 0..299 {
        step(&mut s, &idle(), &mut rng);
    }
    assert!(s.craft.powered_up);
    step(&mut s, &idle(), &mut rng);
    assert!(!s.craft.powered_up);
}

// ── difficulty ────────────────────────────────────────────────────────────────

#[test]
fn level_rises_on_cadence() {
    let mut s = make_state();
    s.elapsed_ticks = 1798;
    let mut rng = ScriptedRolls::quiet();
    step(&mut s, &idle(), &mut rng);
    assert_eq!(s.level, 1);
    step(&mut s, &idle(), &mut rng);
    assert_eq!(s.elapsed_ticks, 1800);
    assert_eq!(s.level, 2);
    assert!((s.target_spawn_rate - 0.025).abs() < 1e-6);
    assert_eq!(s.target_base_speed, 2.5);
    assert_eq!(s.craft.max_speed, 6.25);
    assert!(s.events.contains(&GameEvent::LevelUp(2)));
}

#[test]
fn difficulty_is_capped() {
    let mut s = make_state();
    s.elapsed_ticks = 3599;
    s.target_spawn_rate = 0.049;
    s.target_base_speed = 4.8;
    step(&mut s, &idle(), &mut ScriptedRolls::quiet());
    assert_eq!(s.target_spawn_rate, 0.05);
    assert_eq!(s.target_base_speed, 5.0);
}

#[test]
fn zero_cadence_never_levels_up() {
    let tuning = Tuning { star_count: 0, difficulty_cadence_ticks: 0, ..Tuning::default() };
    let mut s = init_state(tuning, &mut ScriptedRolls::quiet());
    let mut rng = ScriptedRolls::quiet();
    for _ in 0..10 {
        step(&mut s, &idle(), &mut rng);
    }
    assert_eq!(s.elapsed_ticks, 10);
    assert_eq!(s.level, 1);
}

// ── state machine ─────────────────────────────────────────────────────────────

#[test]
fn pause_freezes_gameplay_but_not_stars() {
    let tuning = Tuning { star_count: 5, ..Tuning::default() };
    let mut s = init_state(tuning, &mut ScriptedRolls::quiet().with_fallback(0.1));
    s.targets.push(make_target(TargetTier::Regular, 100.0, &s.tuning, 2.0));
    let mut rng = ScriptedRolls::new(vec![0.0; 50]); // would spawn on every roll

    step(&mut s, &TickInput::command(Command::Pause), &mut rng);
    assert_eq!(s.mode, Mode::Paused);
    assert!(s.events.contains(&GameEvent::ModeChanged(Mode::Paused)));

    let star_y = s.stars[0].y;
    for _ in 0..5 {
        step(&mut s, &firing(), &mut rng);
    }
    assert_eq!(s.elapsed_ticks, 0);
    assert_eq!(s.targets.len(), 1);
    assert_eq!(s.targets[0].y, -30.0);
    assert!(s.bullets.is_empty());
    assert_eq!(rng.draws(), 0);
    assert!(s.stars[0].y > star_y);

    step(&mut s, &TickInput::command(Command::Resume), &mut rng);
    assert_eq!(s.mode, Mode::Playing);
    step(&mut s, &idle(), &mut rng);
    assert_eq!(s.elapsed_ticks, 1);
}

#[test]
fn toggle_pause_flips_both_ways() {
    let mut s = make_state();
    assert!(apply_command(&mut s, Command::TogglePause));
    assert_eq!(s.mode, Mode::Paused);
    assert!(apply_command(&mut s, Command::TogglePause));
    assert_eq!(s.mode, Mode::Playing);
}

#[test]
fn illegal_commands_are_ignored() {
    let mut s = make_state();
    assert!(!apply_command(&mut s, Command::Resume));
    assert!(!apply_command(&mut s, Command::Restart));
    assert_eq!(s.mode, Mode::Playing);

    s.mode = Mode::GameOver;
    assert!(!apply_command(&mut s, Command::Pause));
    assert!(!apply_command(&mut s, Command::TogglePause));
    assert_eq!(s.mode, Mode::GameOver);
}

#[test]
fn health_zero_explodes_then_ends_the_run() {
    let mut s = make_state();
    s.craft.health = 1;
    let t = rammer(&s);
    s.targets.push(t);
    let mut rng = ScriptedRolls::quiet();

    step(&mut s, &idle(), &mut rng);
    assert_eq!(s.craft.health, 0);
    assert!(s.craft.exploding);
    assert_eq!(s.craft.explosion_ticks, 30);
    assert_eq!(s.mode, Mode::Playing);
    assert!(s.events.contains(&GameEvent::CraftDestroyed));

    // the burning craft neither moves nor fires
    let (x, y) = (s.craft.x, s.craft.y);
    for _ in 0..29 {
        let input = TickInput::held(Intent { left: true, firing: true, ..Intent::default() });
        step(&mut s, &input, &mut rng);
        assert_eq!(s.mode, Mode::Playing);
    }
    assert_eq!((s.craft.x, s.craft.y), (x, y));
    assert!(s.bullets.is_empty());

    step(&mut s, &idle(), &mut rng);
    assert_eq!(s.mode, Mode::GameOver);
    assert!(s.events.contains(&GameEvent::ModeChanged(Mode::GameOver)));
}

#[test]
fn health_pickup_cannot_save_a_rammed_craft() {
    let mut s = make_state();
    s.craft.health = 1;
    let t = rammer(&s);
    s.targets.push(t);
    s.power_ups.push(PowerUp {
        x: s.craft.x + 20.0,
        y: s.craft.y + 10.0,
        width: 20.0,
        height: 20.0,
        speed: 0.0,
        effect: PowerUpEffect::Health,
    });

    step(&mut s, &idle(), &mut ScriptedRolls::quiet());
    assert_eq!(s.craft.health, 0);
    assert!(s.craft.exploding);
    assert_eq!(s.power_ups.len(), 1);
    assert!(s.events.contains(&GameEvent::CraftDestroyed));
    assert!(!s.events.contains(&GameEvent::PowerUpCollected(PowerUpEffect::Health)));

    for _ in 0..30 {
        step(&mut s, &idle(), &mut ScriptedRolls::quiet());
    }
    assert_eq!(s.mode, Mode::GameOver);
}

#[test]
fn instant_variant_ends_the_run_at_once() {
    let tuning = Tuning { star_count: 0, game_over_delay_ticks: 0, ..Tuning::default() };
    let mut s = init_state(tuning, &mut ScriptedRolls::quiet());
    s.craft.health = 1;
    let t = rammer(&s);
    s.targets.push(t);

    step(&mut s, &idle(), &mut ScriptedRolls::quiet());
    assert_eq!(s.mode, Mode::GameOver);
    assert!(!s.craft.exploding);
}

#[test]
fn game_over_tick_is_a_no_op() {
    let mut s = make_state();
    s.mode = Mode::GameOver;
    s.score = 70;
    s.targets.push(make_target(TargetTier::Regular, 100.0, &s.tuning, 2.0));
    let before = s.clone();
    let mut rng = ScriptedRolls::new(vec![0.0; 10]);

    let input = TickInput::held(Intent { right: true, firing: true, ..Intent::default() });
    step(&mut s, &input, &mut rng);
    assert_eq!(s.craft, before.craft);
    assert_eq!(s.targets, before.targets);
    assert_eq!(s.score, 70);
    assert_eq!(s.elapsed_ticks, before.elapsed_ticks);
    assert!(s.bullets.is_empty());
    assert_eq!(rng.draws(), 0);
}

#[test]
fn restart_resets_everything() {
    let mut s = make_state();
    s.mode = Mode::GameOver;
    s.score = 1234;
    s.level = 4;
    s.elapsed_ticks = 7000;
    s.target_spawn_rate = 0.04;
    s.target_base_speed = 3.5;
    s.craft.health = 0;
    s.craft.x = 12.0;
    s.craft.vx = 3.0;
    s.targets.push(make_target(TargetTier::Tank, 100.0, &s.tuning, 2.0));
    s.bullets.push(Bullet { x: 1.0, y: 1.0, width: 4.0, height: 10.0, speed: 7.0, style: BulletStyle::Standard });
    s.explosions.push(Particle { x: 0.0, y: 0.0, vx: 0.0, vy: 0.0, size: 1.0, life: 5, kind: ParticleKind::Fire });
    s.power_ups.push(PowerUp { x: 0.0, y: 0.0, width: 20.0, height: 20.0, speed: 2.0, effect: PowerUpEffect::Weapon });

    step(&mut s, &TickInput::command(Command::Restart), &mut ScriptedRolls::quiet());

    assert_eq!(s.mode, Mode::Playing);
    assert_eq!(s.score, 0);
    assert_eq!(s.level, 1);
    assert_eq!(s.elapsed_ticks, 0);
    assert_eq!(s.target_spawn_rate, 0.02);
    assert_eq!(s.target_base_speed, 2.0);
    assert_eq!(s.craft, Craft::new(&s.tuning));
    assert!(s.bullets.is_empty());
    assert!(s.targets.is_empty());
    assert!(s.power_ups.is_empty());
    assert!(s.explosions.is_empty());
    assert!(s.events.contains(&GameEvent::ScoreChanged(0)));
}

// ── determinism ───────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_game() {
    let run = || {
        let mut rng = StdRng::seed_from_u64(7);
        let mut s = init_state(Tuning::default(), &mut rng);
        for i in 0..3000u32 {
            let intent = Intent {
                left: i % 200 < 100,
                right: i % 200 >= 100,
                firing: true,
                ..Intent::default()
            };
            step(&mut s, &TickInput::held(intent), &mut rng);
        }
        (s.score, s.level, s.targets.len(), s.craft.health, s.mode)
    };
    assert_eq!(run(), run());
}

#[test]
fn long_seeded_run_keeps_invariants() {
    let mut rng = seeded_rng();
    let mut s = init_state(Tuning::default(), &mut rng);
    for i in 0..5000u32 {
        let intent = Intent {
            up: i % 97 < 40,
            down: i % 97 >= 60,
            left: i % 151 < 70,
            right: i % 151 >= 80,
            firing: i % 3 != 0,
        };
        step(&mut s, &TickInput::held(intent), &mut rng);
        let c = &s.craft;
        assert!(c.health <= c.max_health);
        assert!(c.x >= 0.0 && c.x <= 740.0);
        assert!(c.y >= 0.0 && c.y <= 560.0);
        assert!(c.engine_glow >= GLOW_MIN && c.engine_glow <= GLOW_MAX);
        assert!(s.bullets.iter().all(|b| b.y >= 0.0));
        assert!(s.targets.iter().all(|t| t.y <= 600.0 && t.health >= 1));
        assert!(s.explosions.iter().all(|p| p.life > 0));
        if s.mode == Mode::GameOver {
            break;
        }
    }
}

#[test]
#[should_panic(expected = "outside [0, 1)")]
fn broken_rng_fails_loudly() {
    let mut s = make_state();
    step(&mut s, &idle(), &mut ScriptedRolls::new(vec![1.5]));
}
