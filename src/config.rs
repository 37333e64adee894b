//! World constants, fixed once at startup.
//!
//! All sizes and positions are in world units (the 1000×800 play field),
//! not terminal cells.  The display layer scales them to whatever grid the
//! terminal offers.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frame rate must be at least 1 tick per second")]
    ZeroFrameRate,
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: i32 },
    #[error("{name} range is empty ({min}..={max})")]
    EmptyRange { name: &'static str, min: i32, max: i32 },
    #[error("tallest obstacle ({height}) does not fit above the ground level ({ground_level})")]
    ObstacleTooTall { height: i32, ground_level: i32 },
    #[error("jump needs positive gravity and velocity (got {gravity}, {velocity})")]
    NonPositiveJump { gravity: f32, velocity: f32 },
    #[error("spawn chance for {name} must be at least 1-in-1")]
    ZeroSpawnChance { name: &'static str },
}

// ── Defaults ──────────────────────────────────────────────────────────────────

pub const WORLD_WIDTH: i32 = 1000;
pub const WORLD_HEIGHT: i32 = 800;
/// Distance from the bottom of the world to the top of the ground strip.
pub const GROUND_DEPTH: i32 = 100;
pub const FRAME_RATE: u32 = 60;

pub const MAX_OBSTACLES: usize = 2;
/// Ticks at the start of a session during which no obstacle may spawn.
pub const SPAWN_GRACE_TICKS: u32 = 120;
pub const OBSTACLE_SPAWN_ONE_IN: u32 = 60;
pub const CLOUD_SPAWN_ONE_IN: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    pub ground_depth: i32,
    pub frame_rate: u32,

    pub player_x: i32,
    pub player_size: i32,
    pub gravity: f32,
    pub initial_jump_velocity: f32,

    pub max_obstacles: usize,
    pub spawn_grace_ticks: u32,
    pub obstacle_spawn_one_in: u32,
    pub obstacle_width: i32,
    pub obstacle_min_height: i32,
    pub obstacle_max_height: i32,
    pub obstacle_base_speed: i32,
    pub obstacle_max_speed: i32,
    /// Score needed for each +1 step of obstacle speed.
    pub speed_step_score: u32,
    /// Obstacles are kept while `x` is greater than this.
    pub obstacle_cull_x: i32,

    pub cloud_spawn_one_in: u32,
    pub cloud_width: i32,
    pub cloud_height: i32,
    pub cloud_speed: i32,
    pub cloud_min_y: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_depth: GROUND_DEPTH,
            frame_rate: FRAME_RATE,

            player_x: 50,
            player_size: 50,
            gravity: 0.5,
            initial_jump_velocity: 10.0,

            max_obstacles: MAX_OBSTACLES,
            spawn_grace_ticks: SPAWN_GRACE_TICKS,
            obstacle_spawn_one_in: OBSTACLE_SPAWN_ONE_IN,
            obstacle_width: 30,
            obstacle_min_height: 50,
            obstacle_max_height: 150,
            obstacle_base_speed: 6,
            obstacle_max_speed: 15,
            speed_step_score: 2000,
            obstacle_cull_x: -50,

            cloud_spawn_one_in: CLOUD_SPAWN_ONE_IN,
            cloud_width: 100,
            cloud_height: 50,
            cloud_speed: 2,
            cloud_min_y: 50,
        }
    }
}

impl WorldConfig {
    /// Defaults with a different frame rate.
    pub fn with_frame_rate(frame_rate: u32) -> Self {
        Self {
            frame_rate,
            ..Self::default()
        }
    }

    /// y-coordinate of the top of the ground strip.
    pub fn ground_level(&self) -> i32 {
        self.height - self.ground_depth
    }

    /// Lowest (largest) y a cloud may spawn at: a quarter of the way down.
    pub fn cloud_max_y(&self) -> i32 {
        self.height / 4
    }

    /// Reject constant sets the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }

        let sizes = [
            ("world width", self.width),
            ("world height", self.height),
            ("ground depth", self.ground_depth),
            ("player size", self.player_size),
            ("obstacle width", self.obstacle_width),
            ("obstacle min height", self.obstacle_min_height),
            ("obstacle base speed", self.obstacle_base_speed),
            ("cloud width", self.cloud_width),
            ("cloud height", self.cloud_height),
            ("cloud speed", self.cloud_speed),
        ];
        for (name, value) in sizes {
            if value <= 0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        // A zero step would leave the player airborne forever.
        if !(self.gravity > 0.0 && self.initial_jump_velocity > 0.0) {
            return Err(ConfigError::NonPositiveJump {
                gravity: self.gravity,
                velocity: self.initial_jump_velocity,
            });
        }

        if self.ground_level() <= 0 {
            return Err(ConfigError::NonPositive {
                name: "ground level",
                value: self.ground_level(),
            });
        }
        if self.obstacle_min_height > self.obstacle_max_height {
            return Err(ConfigError::EmptyRange {
                name: "obstacle height",
                min: self.obstacle_min_height,
                max: self.obstacle_max_height,
            });
        }
        if self.obstacle_base_speed > self.obstacle_max_speed {
            return Err(ConfigError::EmptyRange {
                name: "obstacle speed",
                min: self.obstacle_base_speed,
                max: self.obstacle_max_speed,
            });
        }
        if self.obstacle_max_height >= self.ground_level() {
            return Err(ConfigError::ObstacleTooTall {
                height: self.obstacle_max_height,
                ground_level: self.ground_level(),
            });
        }
        if self.cloud_min_y > self.cloud_max_y() {
            return Err(ConfigError::EmptyRange {
                name: "cloud y",
                min: self.cloud_min_y,
                max: self.cloud_max_y(),
            });
        }
        if self.obstacle_spawn_one_in == 0 {
            return Err(ConfigError::ZeroSpawnChance { name: "obstacles" });
        }
        if self.cloud_spawn_one_in == 0 {
            return Err(ConfigError::ZeroSpawnChance { name: "clouds" });
        }
        if self.speed_step_score == 0 {
            return Err(ConfigError::NonPositive {
                name: "speed step score",
                value: 0,
            });
        }
        Ok(())
    }
}
