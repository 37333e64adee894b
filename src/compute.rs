//! Pure game-logic functions.
//!
//! Every public function takes an immutable view of the current state (and,
//! where needed, an RNG handle) and returns a brand-new value.  Side effects
//! are limited to the injected RNG and log output.

use log::{debug, info};
use rand::Rng;

use crate::config::WorldConfig;
use crate::entities::{
    Cloud, GameStatus, Ground, Obstacle, Player, Rect, Session, TickInput,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial state of a playthrough.
pub fn init_session(config: WorldConfig) -> Session {
    Session {
        player: Player::spawn(&config),
        obstacles: Vec::new(),
        clouds: Vec::new(),
        ground: Ground::new(&config),
        score: 0,
        spawn_grace: config.spawn_grace_ticks,
        status: GameStatus::Running,
        config,
    }
}

/// Throw the current run away and start over with the same world.
pub fn restart(session: &Session) -> Session {
    info!("restarting after final score {}", session.score);
    init_session(session.config)
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Start a jump if the player is standing exactly on the ground.
pub fn try_jump(player: &Player, ground_level: i32) -> Player {
    if player.is_jumping || !player.is_grounded(ground_level) {
        return *player;
    }
    debug!("jump from y={}", player.rect.y);
    Player {
        is_jumping: true,
        ..*player
    }
}

/// One tick of the jump state machine.
///
/// While airborne the player moves by `round(jump_count² · ½ · dir · gravity)`
/// (up while `jump_count > 0`, down after) and `jump_count` drops by
/// `gravity`.  Once it passes `-initial_jump_velocity` the jump ends and the
/// counter is restored for the next one.  The rise and fall are mirror
/// images, so the player lands exactly where it took off.
pub fn player_step(player: &Player) -> Player {
    if !player.is_jumping {
        return *player;
    }

    if player.jump_count >= -player.initial_jump_velocity {
        let direction = if player.jump_count > 0.0 { 1.0 } else { -1.0 };
        let rise = (player.jump_count * player.jump_count * 0.5 * direction * player.gravity)
            .round() as i32;
        Player {
            rect: player.rect.shifted(0, -rise),
            jump_count: player.jump_count - player.gravity,
            ..*player
        }
    } else {
        Player {
            is_jumping: false,
            jump_count: player.initial_jump_velocity,
            ..*player
        }
    }
}

/// Push the player back up if it has sunk below the ground.
pub fn clamp_to_ground(player: &Player, ground_level: i32) -> Player {
    if player.rect.bottom() > ground_level {
        Player {
            rect: player.rect.with_bottom(ground_level),
            ..*player
        }
    } else {
        *player
    }
}

// ── Obstacles ────────────────────────────────────────────────────────────────

/// `min(base_speed + score / speed_step_score, max_speed)`.
///
/// Depends only on the current score, so every live obstacle speeds up
/// together as the run goes on.
pub fn obstacle_speed(obstacle: &Obstacle, score: u32, config: &WorldConfig) -> i32 {
    let bonus = i32::try_from(score / config.speed_step_score).unwrap_or(i32::MAX);
    obstacle
        .base_speed
        .saturating_add(bonus)
        .min(obstacle.max_speed)
}

/// Index of the first obstacle (in spawn order) overlapping `player`.
pub fn first_collision(player: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles.iter().position(|o| player.intersects(&o.rect))
}

// ── Spawner ──────────────────────────────────────────────────────────────────

/// A uniform draw over `1..=one_in` that came up 1.
pub fn roll(rng: &mut impl Rng, one_in: u32) -> bool {
    rng.gen_range(1..=one_in.max(1)) == 1
}

/// Maybe create a new obstacle at the right edge of the world.
///
/// Never spawns while `max_obstacles` are already alive; existing
/// obstacles are left alone either way.
pub fn spawn_obstacle(
    obstacles: &[Obstacle],
    config: &WorldConfig,
    rng: &mut impl Rng,
) -> Option<Obstacle> {
    if obstacles.len() >= config.max_obstacles || !roll(rng, config.obstacle_spawn_one_in) {
        return None;
    }
    let height = rng.gen_range(config.obstacle_min_height..=config.obstacle_max_height);
    debug!("obstacle spawned, height {}", height);
    Some(Obstacle {
        rect: Rect::new(
            config.width,
            config.ground_level() - height,
            config.obstacle_width,
            height,
        ),
        base_speed: config.obstacle_base_speed,
        speed: config.obstacle_base_speed,
        max_speed: config.obstacle_max_speed,
    })
}

/// Maybe create a new cloud at the right edge of the sky.  No cap.
pub fn spawn_cloud(config: &WorldConfig, rng: &mut impl Rng) -> Option<Cloud> {
    if !roll(rng, config.cloud_spawn_one_in) {
        return None;
    }
    let y = rng.gen_range(config.cloud_min_y..=config.cloud_max_y());
    Some(Cloud {
        rect: Rect::new(config.width, y, config.cloud_width, config.cloud_height),
        speed: config.cloud_speed,
    })
}

// ── Cleanup ──────────────────────────────────────────────────────────────────

/// Drop obstacles at or past `obstacle_cull_x` and clouds that have fully
/// left the screen.  Obstacles linger a few units past the left edge.
pub fn prune_offscreen(session: &Session) -> Session {
    let cull_x = session.config.obstacle_cull_x;
    Session {
        obstacles: session
            .obstacles
            .iter()
            .filter(|o| o.rect.x > cull_x)
            .copied()
            .collect(),
        clouds: session
            .clouds
            .iter()
            .filter(|c| c.rect.x > -c.rect.width)
            .copied()
            .collect(),
        ..session.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// After a game over the session stays frozen until `input.restart`.
pub fn tick(session: &Session, input: &TickInput, rng: &mut impl Rng) -> Session {
    if session.status == GameStatus::GameOver {
        return if input.restart {
            restart(session)
        } else {
            session.clone()
        };
    }

    let config = &session.config;
    let ground_level = session.ground.level();

    // ── 1-2. Jump input, then the jump state machine ─────────────────────────
    let player = if input.jump {
        try_jump(&session.player, ground_level)
    } else {
        session.player
    };
    let player = player_step(&player);

    // ── 3. Obstacle spawn, after the grace period ────────────────────────────
    let mut obstacles = session.obstacles.clone();
    let spawn_grace = if session.spawn_grace > 0 {
        session.spawn_grace - 1
    } else {
        if let Some(obstacle) = spawn_obstacle(&obstacles, config, rng) {
            obstacles.push(obstacle);
        }
        0
    };

    // ── 4-5. Clouds ──────────────────────────────────────────────────────────
    let mut clouds = session.clouds.clone();
    if let Some(cloud) = spawn_cloud(config, rng) {
        clouds.push(cloud);
    }
    let clouds: Vec<Cloud> = clouds.into_iter().map(Cloud::advanced).collect();

    // ── 6. Obstacles move, then collide ──────────────────────────────────────
    let obstacles: Vec<Obstacle> = obstacles
        .into_iter()
        .map(|o| o.advanced(obstacle_speed(&o, session.score, config)))
        .collect();

    let status = match first_collision(&player.rect, &obstacles) {
        Some(index) => {
            info!(
                "game over: hit obstacle {} at score {}",
                index, session.score
            );
            GameStatus::GameOver
        }
        None => GameStatus::Running,
    };

    // ── 7. Ground clamp ──────────────────────────────────────────────────────
    let player = clamp_to_ground(&player, ground_level);

    let next = Session {
        player,
        obstacles,
        clouds,
        spawn_grace,
        status,
        ..session.clone()
    };

    // The impact frame is kept as-is for the game-over screen.
    if status == GameStatus::GameOver {
        return next;
    }

    // ── 8-9. Score, then cleanup ─────────────────────────────────────────────
    prune_offscreen(&Session {
        score: session.score + 1,
        ..next
    })
}
