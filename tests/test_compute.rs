use endless_runner::compute::*;
use endless_runner::config::WorldConfig;
use endless_runner::entities::*;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Every uniform draw lands on the low end of its range: all spawn gates
/// open, obstacles are 50 tall, clouds sit at y = 50.
fn always_spawn() -> StepRng {
    StepRng::new(0, 0)
}

/// Every uniform draw lands mid-range: no spawn gate ever opens.
fn never_spawn() -> StepRng {
    StepRng::new(1 << 31, 0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn fresh() -> Session {
    init_session(WorldConfig::default())
}

fn obstacle_at(x: i32, y: i32, height: i32) -> Obstacle {
    Obstacle {
        rect: Rect::new(x, y, 30, height),
        base_speed: 6,
        speed: 6,
        max_speed: 15,
    }
}

fn cloud_at(x: i32) -> Cloud {
    Cloud {
        rect: Rect::new(x, 60, 100, 50),
        speed: 2,
    }
}

const JUMP: TickInput = TickInput { jump: true, restart: false };
const IDLE: TickInput = TickInput { jump: false, restart: false };
const RESTART: TickInput = TickInput { jump: false, restart: true };

// ── init_session ──────────────────────────────────────────────────────────────

#[test]
fn init_session_player_on_the_ground() {
    let s = fresh();
    assert_eq!(s.player.rect, Rect::new(50, 650, 50, 50));
    assert_eq!(s.player.rect.bottom(), s.ground.level());
    assert!(!s.player.is_jumping);
    assert_eq!(s.player.jump_count, 10.0);
}

#[test]
fn init_session_empty_collections() {
    let s = fresh();
    assert!(s.obstacles.is_empty());
    assert!(s.clouds.is_empty());
    assert_eq!(s.score, 0);
    assert_eq!(s.spawn_grace, 120);
    assert_eq!(s.status, GameStatus::Running);
}

// ── Jump state machine ────────────────────────────────────────────────────────

#[test]
fn first_jump_tick_rises_by_25() {
    let s = tick(&fresh(), &JUMP, &mut never_spawn());
    assert!(s.player.is_jumping);
    assert_eq!(s.player.rect.y, 625); // round(10² · 0.5 · 0.5)
    assert_eq!(s.player.jump_count, 9.5);
}

#[test]
fn every_airborne_tick_follows_the_recurrence() {
    let start = fresh().player;
    let mut p = try_jump(&start, 700);
    while p.is_jumping && p.jump_count >= -p.initial_jump_velocity {
        let direction = if p.jump_count > 0.0 { 1.0 } else { -1.0 };
        let expected_rise = (p.jump_count * p.jump_count * 0.5 * direction * p.gravity).round() as i32;
        let next = player_step(&p);
        assert_eq!(next.rect.y, p.rect.y - expected_rise);
        assert_eq!(next.jump_count, p.jump_count - p.gravity);
        p = next;
    }
}

#[test]
fn jump_reaches_apex_then_lands_where_it_started() {
    let mut p = try_jump(&fresh().player, 700);
    let mut highest = p.rect.y;
    let mut ticks = 0;
    while p.is_jumping {
        p = player_step(&p);
        highest = highest.min(p.rect.y);
        ticks += 1;
    }
    assert_eq!(ticks, 42); // 41 airborne ticks + 1 landing tick
    assert_eq!(highest, 470); // 180 units above take-off
    assert_eq!(p.rect.y, 650);
    assert_eq!(p.jump_count, p.initial_jump_velocity);
}

#[test]
fn second_jump_is_identical_to_the_first() {
    let record = |mut s: Session| {
        let mut ys = Vec::new();
        s = tick(&s, &JUMP, &mut never_spawn());
        while s.player.is_jumping {
            ys.push(s.player.rect.y);
            s = tick(&s, &IDLE, &mut never_spawn());
        }
        (ys, s)
    };
    let (first, after) = record(fresh());
    assert!(!after.player.is_jumping);
    let (second, _) = record(after);
    assert_eq!(first.len(), 41);
    assert_eq!(first, second);
}

#[test]
fn jump_input_ignored_mid_air() {
    let mut s = tick(&fresh(), &JUMP, &mut never_spawn());
    s = tick(&s, &IDLE, &mut never_spawn());
    let holding = tick(&s, &JUMP, &mut never_spawn());
    let released = tick(&s, &IDLE, &mut never_spawn());
    assert_eq!(holding.player, released.player);
}

#[test]
fn jump_needs_exact_ground_contact() {
    let mut p = fresh().player;
    p.rect.y -= 1;
    assert!(!try_jump(&p, 700).is_jumping);
    assert!(try_jump(&fresh().player, 700).is_jumping);
}

#[test]
fn grounded_step_is_a_no_op() {
    let p = fresh().player;
    assert_eq!(player_step(&p), p);
}

#[test]
fn clamp_lifts_a_sunken_player() {
    let mut p = fresh().player;
    p.rect.y = 690;
    assert_eq!(clamp_to_ground(&p, 700).rect.bottom(), 700);
    // Above the ground is left alone.
    p.rect.y = 300;
    assert_eq!(clamp_to_ground(&p, 700).rect.y, 300);
}

// ── obstacle_speed ────────────────────────────────────────────────────────────

#[test]
fn speed_starts_at_base() {
    let config = WorldConfig::default();
    let o = obstacle_at(500, 650, 50);
    assert_eq!(obstacle_speed(&o, 0, &config), 6);
    assert_eq!(obstacle_speed(&o, 1999, &config), 6);
}

#[test]
fn speed_steps_every_2000_points() {
    let config = WorldConfig::default();
    let o = obstacle_at(500, 650, 50);
    assert_eq!(obstacle_speed(&o, 2000, &config), 7);
    assert_eq!(obstacle_speed(&o, 4000, &config), 8);
}

#[test]
fn speed_caps_at_max() {
    let config = WorldConfig::default();
    let o = obstacle_at(500, 650, 50);
    assert_eq!(obstacle_speed(&o, 18_000, &config), 15);
    assert_eq!(obstacle_speed(&o, 1_000_000, &config), 15);
    assert_eq!(obstacle_speed(&o, u32::MAX, &config), 15);
}

#[test]
fn live_obstacles_use_the_current_score() {
    let mut s = fresh();
    s.score = 4000;
    s.obstacles = vec![obstacle_at(800, 0, 50)];
    let s2 = tick(&s, &IDLE, &mut never_spawn());
    assert_eq!(s2.obstacles[0].speed, 8);
    assert_eq!(s2.obstacles[0].rect.x, 792);
}

// ── Spawner ───────────────────────────────────────────────────────────────────

#[test]
fn no_obstacle_during_grace_period() {
    let mut s = fresh();
    let mut rng = always_spawn();
    for _ in 0..120 {
        s = tick(&s, &IDLE, &mut rng);
        assert!(s.obstacles.is_empty());
    }
    assert_eq!(s.spawn_grace, 0);
    s = tick(&s, &IDLE, &mut rng);
    assert_eq!(s.obstacles.len(), 1);
}

#[test]
fn spawned_obstacle_sits_on_the_ground_at_the_right_edge() {
    let config = WorldConfig::default();
    let o = spawn_obstacle(&[], &config, &mut always_spawn()).unwrap();
    assert_eq!(o.rect, Rect::new(1000, 650, 30, 50));
    assert_eq!(o.base_speed, 6);
    assert_eq!(o.max_speed, 15);
}

#[test]
fn obstacle_cap_blocks_spawning() {
    let config = WorldConfig::default();
    let live = [obstacle_at(500, 650, 50), obstacle_at(800, 650, 50)];
    assert!(spawn_obstacle(&live, &config, &mut always_spawn()).is_none());
    assert!(spawn_obstacle(&live[..1], &config, &mut always_spawn()).is_some());
}

#[test]
fn obstacle_count_never_exceeds_cap() {
    let mut s = fresh();
    let mut rng = always_spawn();
    for _ in 0..200 {
        s = tick(&s, &IDLE, &mut rng);
        assert!(s.obstacles.len() <= 2);
    }
    assert_eq!(s.obstacles.len(), 2);
    assert_eq!(s.status, GameStatus::Running);
}

#[test]
fn closed_gates_spawn_nothing() {
    let mut s = fresh();
    s.spawn_grace = 0;
    let mut rng = never_spawn();
    for _ in 0..500 {
        s = tick(&s, &IDLE, &mut rng);
    }
    assert!(s.obstacles.is_empty());
    assert!(s.clouds.is_empty());
}

#[test]
fn spawned_obstacles_stay_in_range() {
    let config = WorldConfig::default();
    let mut rng = seeded_rng();
    let mut seen = 0;
    while seen < 200 {
        if let Some(o) = spawn_obstacle(&[], &config, &mut rng) {
            assert!((50..=150).contains(&o.rect.height));
            assert_eq!(o.rect.bottom(), 700);
            assert_eq!(o.rect.x, 1000);
            assert_eq!(o.rect.width, 30);
            seen += 1;
        }
    }
}

#[test]
fn obstacle_gate_opens_about_once_per_sixty_ticks() {
    let config = WorldConfig::default();
    let mut rng = seeded_rng();
    let spawned = (0..60_000)
        .filter(|_| spawn_obstacle(&[], &config, &mut rng).is_some())
        .count();
    assert!((700..1300).contains(&spawned), "spawned {}", spawned);
}

#[test]
fn cloud_gate_opens_about_once_per_hundred_ticks() {
    let config = WorldConfig::default();
    let mut rng = seeded_rng();
    let clouds: Vec<Cloud> = (0..100_000)
        .filter_map(|_| spawn_cloud(&config, &mut rng))
        .collect();
    assert!((700..1300).contains(&clouds.len()), "spawned {}", clouds.len());
    for c in &clouds {
        assert!((50..=200).contains(&c.rect.y));
        assert_eq!(c.rect.x, 1000);
        assert_eq!(c.speed, 2);
    }
}

#[test]
fn clouds_spawn_during_grace_period() {
    let s = tick(&fresh(), &IDLE, &mut always_spawn());
    assert_eq!(s.clouds.len(), 1);
    assert_eq!(s.clouds[0].rect.x, 998); // spawned then moved on the same tick
    assert_eq!(s.clouds[0].rect.y, 50);
}

// ── Collision ─────────────────────────────────────────────────────────────────

#[test]
fn overlap_on_both_axes_ends_the_run() {
    let mut s = fresh();
    // After moving 6 left it sits at x = 99, one unit inside the player.
    s.obstacles = vec![obstacle_at(105, 650, 50)];
    let s2 = tick(&s, &IDLE, &mut never_spawn());
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.score, 0);
}

#[test]
fn touching_edges_do_not_collide() {
    let mut s = fresh();
    s.obstacles = vec![obstacle_at(106, 650, 50)];
    let s2 = tick(&s, &IDLE, &mut never_spawn());
    assert_eq!(s2.obstacles[0].rect.x, 100);
    assert_eq!(s2.status, GameStatus::Running);
}

#[test]
fn horizontal_overlap_alone_is_safe() {
    let mut s = fresh();
    s.obstacles = vec![obstacle_at(80, 100, 50)];
    let s2 = tick(&s, &IDLE, &mut never_spawn());
    assert_eq!(s2.status, GameStatus::Running);
    assert_eq!(s2.score, 1);
}

#[test]
fn first_collision_reports_spawn_order() {
    let player = Rect::new(50, 650, 50, 50);
    let obstacles = [
        obstacle_at(400, 650, 50),
        obstacle_at(60, 650, 50),
        obstacle_at(70, 650, 50),
    ];
    assert_eq!(first_collision(&player, &obstacles), Some(1));
    assert_eq!(first_collision(&player, &obstacles[..1]), None);
}

#[test]
fn jumping_clears_an_obstacle() {
    let mut s = fresh();
    s.obstacles = vec![obstacle_at(200, 650, 50)];
    s = tick(&s, &JUMP, &mut never_spawn());
    while s.player.is_jumping {
        s = tick(&s, &IDLE, &mut never_spawn());
        assert_eq!(s.status, GameStatus::Running);
    }
    // Passed underneath and scrolled out by the time the player lands.
    assert!(s.obstacles.is_empty());
    assert_eq!(s.score, 42);
}

// ── Game over & restart ───────────────────────────────────────────────────────

#[test]
fn game_over_freezes_the_session() {
    let mut s = fresh();
    s.obstacles = vec![obstacle_at(105, 650, 50)];
    let over = tick(&s, &IDLE, &mut never_spawn());
    let mut frozen = over.clone();
    for _ in 0..30 {
        frozen = tick(&frozen, &JUMP, &mut always_spawn());
    }
    assert_eq!(frozen, over);
}

#[test]
fn restart_after_collision_equals_a_fresh_session() {
    let mut s = fresh();
    let mut rng = seeded_rng();
    for _ in 0..100 {
        s = tick(&s, &IDLE, &mut rng);
    }
    s.obstacles.push(obstacle_at(105, 650, 50));
    let over = tick(&s, &IDLE, &mut rng);
    assert_eq!(over.status, GameStatus::GameOver);

    let restarted = tick(&over, &RESTART, &mut rng);
    assert_eq!(restarted, fresh());
}

#[test]
fn restart_is_ignored_while_running() {
    let s = tick(&fresh(), &RESTART, &mut never_spawn());
    assert_eq!(s.score, 1);
    assert_eq!(s.spawn_grace, 119);
}

// ── Cleanup ───────────────────────────────────────────────────────────────────

#[test]
fn prune_keeps_obstacles_just_past_the_edge() {
    let mut s = fresh();
    s.obstacles = vec![
        obstacle_at(-49, 650, 50),
        obstacle_at(-50, 650, 50),
        obstacle_at(-51, 650, 50),
    ];
    let pruned = prune_offscreen(&s);
    assert_eq!(pruned.obstacles.len(), 1);
    assert_eq!(pruned.obstacles[0].rect.x, -49);
}

#[test]
fn prune_drops_clouds_once_fully_gone() {
    let mut s = fresh();
    s.clouds = vec![cloud_at(-99), cloud_at(-100), cloud_at(20)];
    let pruned = prune_offscreen(&s);
    let xs: Vec<i32> = pruned.clouds.iter().map(|c| c.rect.x).collect();
    assert_eq!(xs, vec![-99, 20]);
}

#[test]
fn prune_runs_after_the_move() {
    let mut s = fresh();
    s.obstacles = vec![obstacle_at(-43, 0, 50), obstacle_at(-44, 0, 50)];
    let s2 = tick(&s, &IDLE, &mut never_spawn());
    // -43 → -49 survives, -44 → -50 does not.
    assert_eq!(s2.obstacles.len(), 1);
    assert_eq!(s2.obstacles[0].rect.x, -49);
}

// ── End to end ────────────────────────────────────────────────────────────────

#[test]
fn score_counts_ticks_survived() {
    let mut s = fresh();
    let mut rng = never_spawn();
    for _ in 0..1000 {
        s = tick(&s, &IDLE, &mut rng);
    }
    assert_eq!(s.score, 1000);
    assert_eq!(s.status, GameStatus::Running);
}

#[test]
fn standing_still_eventually_loses() {
    let mut s = fresh();
    let mut rng = seeded_rng();
    for _ in 0..5000 {
        s = tick(&s, &IDLE, &mut rng);
        if s.status == GameStatus::GameOver {
            break;
        }
    }
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(s.score > 120);
}

#[test]
fn tick_does_not_mutate_original() {
    let s = fresh();
    let _ = tick(&s, &JUMP, &mut always_spawn());
    assert_eq!(s, fresh());
}
