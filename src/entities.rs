//! All game entity types — plain data plus per-entity steps that return a
//! new value instead of mutating in place.

use crate::config::WorldConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world units.  `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "rect must have positive size");
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Same rect moved so its bottom edge sits at `bottom`.
    pub fn with_bottom(self, bottom: i32) -> Self {
        Self {
            y: bottom - self.height,
            ..self
        }
    }

    pub fn shifted(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// True when both rects share a region of positive area.
    /// Rects that only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub is_jumping: bool,
    /// Counts down by `gravity` each airborne tick, from
    /// `initial_jump_velocity` to `-initial_jump_velocity`.
    pub jump_count: f32,
    pub gravity: f32,
    pub initial_jump_velocity: f32,
}

impl Player {
    /// Fresh player standing on the ground at the configured start column.
    pub fn spawn(config: &WorldConfig) -> Self {
        let size = config.player_size;
        Player {
            rect: Rect::new(config.player_x, config.ground_level() - size, size, size),
            is_jumping: false,
            jump_count: config.initial_jump_velocity,
            gravity: config.gravity,
            initial_jump_velocity: config.initial_jump_velocity,
        }
    }

    pub fn is_grounded(&self, ground_level: i32) -> bool {
        self.rect.bottom() == ground_level
    }
}

// ── Obstacles & clouds ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Obstacle {
    pub rect: Rect,
    pub base_speed: i32,
    /// Speed used on the most recent tick.
    pub speed: i32,
    pub max_speed: i32,
}

impl Obstacle {
    /// This obstacle moved left by `speed`, which becomes its current speed.
    pub fn advanced(self, speed: i32) -> Self {
        Obstacle {
            rect: self.rect.shifted(-speed, 0),
            speed,
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cloud {
    pub rect: Rect,
    pub speed: i32,
}

impl Cloud {
    pub fn advanced(self) -> Self {
        Cloud {
            rect: self.rect.shifted(-self.speed, 0),
            ..self
        }
    }
}

/// The static ground strip.  Never changes during a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ground {
    pub rect: Rect,
}

impl Ground {
    pub fn new(config: &WorldConfig) -> Self {
        let level = config.ground_level();
        Ground {
            rect: Rect::new(0, level, config.width, config.height - level),
        }
    }

    pub fn level(&self) -> i32 {
        self.rect.y
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Intent signals gathered by the presentation layer for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key held this tick.  Only honoured while grounded.
    pub jump: bool,
    /// Restart confirmed.  Only honoured after a game over.
    pub restart: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire state of one playthrough.  Cloneable so the pure `tick`
/// can return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub player: Player,
    /// In spawn order.
    pub obstacles: Vec<Obstacle>,
    pub clouds: Vec<Cloud>,
    pub ground: Ground,
    /// Ticks survived.
    pub score: u32,
    /// Ticks left before obstacles may start spawning.
    pub spawn_grace: u32,
    pub status: GameStatus,
    pub config: WorldConfig,
}
