mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use thiserror::Error;

use display::Viewport;
use endless_runner::compute::{init_session, tick};
use endless_runner::config::{ConfigError, WorldConfig, FRAME_RATE};
use endless_runner::entities::{GameStatus, Session, TickInput};

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms at
/// 60 FPS) is always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

const JUMP_KEYS: [KeyCode; 4] = [
    KeyCode::Char(' '),
    KeyCode::Up,
    KeyCode::Char('w'),
    KeyCode::Char('W'),
];

#[derive(Debug, Parser)]
#[command(name = "endless_runner", about = "Jump the obstacles for as long as you can")]
struct Cli {
    /// Seed for obstacle and cloud spawning (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second
    #[arg(long, default_value_t = FRAME_RATE)]
    fps: u32,

    /// Where log output goes; the terminal itself is busy with the game
    #[arg(long, default_value = "endless_runner.log")]
    log_file: PathBuf,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn init_logging(path: &Path) -> Result<(), AppError> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key, so holding Space keeps the jump intent
/// alive even on terminals that only report key presses.  Restart (R or a
/// click on the restart label) is a one-shot action taken after game over.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    rng: &mut impl Rng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let frame_budget = Duration::from_secs(1) / session.config.frame_rate;
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, session);

    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut restart = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                    KeyEventKind::Press => {
                        key_frame.insert(code, frame);
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') => restart = true,
                            _ => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if view.restart_button().contains(column, row) {
                        restart = true;
                    }
                }
                Event::Resize(cols, rows) => {
                    info!("terminal resized to {}x{}", cols, rows);
                    view = Viewport::new(cols, rows, session);
                }
                _ => {}
            }
        }

        let input = TickInput {
            jump: JUMP_KEYS.iter().any(|k| is_held(&key_frame, k, frame)),
            restart: restart && session.status == GameStatus::GameOver,
        };
        *session = tick(session, &input, rng);

        display::render(out, session, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let config = WorldConfig::with_frame_rate(cli.fps);
    config.validate()?;
    init_logging(&cli.log_file)?;

    let seed = cli.seed.unwrap_or_else(|| thread_rng().gen());
    info!(
        "starting: seed {}, world {}x{}, {} ticks/s",
        seed, config.width, config.height, config.frame_rate
    );

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("no key-release events; held keys expire after {} frames", HOLD_WINDOW);
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut session = init_session(config);
    let mut rng = StdRng::seed_from_u64(seed);
    let result = game_loop(&mut out, &mut session, &mut rng, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!("quit with score {}", session.score);
    result.map_err(AppError::from)
}
