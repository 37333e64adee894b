//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! session.  No game logic is performed; this module only translates world
//! rectangles into terminal cells and terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use endless_runner::entities::{Cloud, GameStatus, Rect, Session};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Black;
const C_HUD_BG: Color = Color::Rgb { r: 115, g: 215, b: 255 };
const C_GROUND: Color = Color::Green;
const C_PLAYER: Color = Color::Red;
const C_OBSTACLE: Color = Color::White;
const C_CLOUD: Color = Color::Grey;
const C_HINT: Color = Color::DarkGrey;
const C_GAME_OVER: Color = Color::Red;
const C_RESTART: Color = Color::White;

const RESTART_LABEL: &str = "[ Click to Restart ]";

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Terminal grid the world is squeezed into.  Row 0 is the HUD, the last
/// row the controls hint, everything in between shows the whole world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    world_width: i32,
    world_height: i32,
}

/// A horizontal run of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSpan {
    pub col: u16,
    pub row: u16,
    pub len: u16,
}

impl CellSpan {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        row == self.row && col >= self.col && col < self.col.saturating_add(self.len)
    }
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, session: &Session) -> Self {
        Viewport {
            cols,
            rows,
            world_width: session.config.width,
            world_height: session.config.height,
        }
    }

    fn play_rows(&self) -> i64 {
        i64::from(self.rows.saturating_sub(2)).max(1)
    }

    /// Terminal column of world `x` (may be off-screen).
    fn col(&self, x: i32) -> i64 {
        i64::from(x) * i64::from(self.cols) / i64::from(self.world_width)
    }

    /// Terminal row of world `y` (may be off-screen).
    fn row(&self, y: i32) -> i64 {
        1 + i64::from(y) * self.play_rows() / i64::from(self.world_height)
    }

    /// Cells covered by `rect`, clipped to the play field.  Every visible
    /// rect covers at least one cell in each direction.
    fn cells(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col(rect.x);
        let c1 = self.col(rect.right()).max(c0 + 1);
        let r0 = self.row(rect.y);
        let r1 = self.row(rect.bottom()).max(r0 + 1);

        let c0 = c0.max(0);
        let c1 = c1.min(i64::from(self.cols));
        let r0 = r0.max(1);
        let r1 = r1.min(1 + self.play_rows());
        if c0 >= c1 || r0 >= r1 {
            return None;
        }
        Some((c0 as u16, r0 as u16, c1 as u16, r1 as u16))
    }

    /// Where the restart label is drawn on the game-over screen.
    pub fn restart_button(&self) -> CellSpan {
        let len = RESTART_LABEL.chars().count() as u16;
        CellSpan {
            col: (self.cols / 2).saturating_sub(len / 2),
            row: (self.rows / 2).saturating_add(2),
            len,
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, session: &Session, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if session.status == GameStatus::GameOver {
        draw_game_over(out, session, view)?;
    } else {
        for cloud in &session.clouds {
            draw_cloud(out, cloud, view)?;
        }
        fill_rect(out, view, &session.ground.rect, '█', C_GROUND)?;
        for obstacle in &session.obstacles {
            fill_rect(out, view, &obstacle.rect, '▓', C_OBSTACLE)?;
        }
        fill_rect(out, view, &session.player.rect, '█', C_PLAYER)?;
        draw_hud(out, session)?;
        draw_controls_hint(out, view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Shapes ────────────────────────────────────────────────────────────────────

fn fill_rect<W: Write>(
    out: &mut W,
    view: &Viewport,
    rect: &Rect,
    glyph: char,
    color: Color,
) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = view.cells(rect) else {
        return Ok(());
    };
    let line: String = std::iter::repeat(glyph).take(usize::from(c1 - c0)).collect();
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

/// Clouds are drawn as a rounded blob:  (▒▒▒▒)
fn draw_cloud<W: Write>(out: &mut W, cloud: &Cloud, view: &Viewport) -> std::io::Result<()> {
    let Some((c0, r0, c1, r1)) = view.cells(&cloud.rect) else {
        return Ok(());
    };
    let width = usize::from(c1 - c0);
    let line = if width >= 3 {
        format!("({})", "▒".repeat(width - 2))
    } else {
        "▒".repeat(width)
    };
    out.queue(style::SetForegroundColor(C_CLOUD))?;
    for row in r0..r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&line))?;
    }
    Ok(())
}

// ── HUD (row 0) & hint (last row) ─────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetBackgroundColor(C_HUD_BG))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(" Score: {} ", session.score)))?;
    out.queue(style::ResetColor)?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("SPACE / ↑ / W : Jump   Q : Quit"))?;
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    session: &Session,
    view: &Viewport,
) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let cy = view.rows / 2;

    let centered = |text: &str| cx.saturating_sub(text.chars().count() as u16 / 2);

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", C_GAME_OVER),
        ("║     GAME  OVER     ║", C_GAME_OVER),
        ("╚════════════════════╝", C_GAME_OVER),
    ];
    let start_row = cy.saturating_sub(lines.len() as u16 + 1);
    for (i, (msg, color)) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(centered(msg), start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    let score_line = format!("Final Score: {}", session.score);
    out.queue(cursor::MoveTo(centered(&score_line), cy))?;
    out.queue(style::SetForegroundColor(Color::Yellow))?;
    out.queue(Print(&score_line))?;

    let button = view.restart_button();
    out.queue(cursor::MoveTo(button.col, button.row))?;
    out.queue(style::SetForegroundColor(C_RESTART))?;
    out.queue(Print(RESTART_LABEL))?;

    let hint = "R - Restart  Q - Quit";
    out.queue(cursor::MoveTo(centered(hint), button.row.saturating_add(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;

    Ok(())
}
