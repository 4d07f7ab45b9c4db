mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use turret_defense::compute::{apply_controls, init_state, tick};
use turret_defense::config::{GameConfig, LogConfig, FRAMES_PER_SECOND};
use turret_defense::entities::{Controls, GameState, GameStatus, Level};
use turret_defense::error::GameError;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames (≈133 ms at 60 FPS) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser)]
#[command(name = "turret_defense")]
#[command(about = "Defend the base: shoot down jets, dodge bombs, survive the night")]
struct Cli {
    /// Start straight at this difficulty instead of showing the menu
    #[arg(long, value_enum)]
    level: Option<LevelArg>,

    /// TOML file overriding gameplay tuning and logging
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the spawn RNG (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (overrides the config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the effective configuration to this TOML file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LevelArg {
    Easy,
    Medium,
    Hard,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Easy => Level::Easy,
            LevelArg::Medium => Level::Medium,
            LevelArg::Hard => Level::Hard,
        }
    }
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log records go to a file.
/// `RUST_LOG` wins over the configured level.
fn init_logging(log: &LogConfig) -> Result<(), GameError> {
    let file = File::create(&log.file)?;
    env_logger::Builder::new()
        .parse_filters(&log.level)
        .parse_env("RUST_LOG")
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(Level),
    Quit,
}

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "▲  TURRET  DEFENSE  ▲";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(7),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy.saturating_sub(5)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select difficulty:"))?;

    let options: &[(&str, &str, Color, &str)] = &[
        ("1", "Easy  ", Color::Green, "Jets trickle in"),
        ("2", "Medium", Color::Yellow, "Steady raids"),
        ("3", "Hard  ", Color::Red, "The sky is full of them"),
    ];

    for (i, (key, label, color, desc)) in options.iter().enumerate() {
        let row = cy.saturating_sub(4) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", key)))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(format!("{:<8}", label)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" — {}", desc)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("Power-ups (catch them with the turret):"))?;

    let power_up_info: &[(&str, Color, &str)] = &[
        ("+", Color::Green, " Support  — second turret"),
        ("◆", Color::Yellow, " Shield   — blocks all damage"),
        ("‖", Color::Cyan, " DualFire — two bullets per shot"),
        ("■", Color::DarkGrey, " Blackout — the sky goes dark"),
    ];
    for (i, (sym, color, desc)) in power_up_info.iter().enumerate() {
        let row = cy + 1 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(12), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(sym))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 6))?;
    out.queue(Print("At night the turret holds fire and repairs itself."))?;
    out.queue(cursor::MoveTo(cx.saturating_sub(12), cy + 8))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let code = match rx.recv() {
            Ok(Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. })) => code,
            Ok(_) => continue,
            // Input thread is gone; nothing more can be chosen.
            Err(_) => return Ok(MenuResult::Quit),
        };
        match code {
            KeyCode::Char('1') => return Ok(MenuResult::Start(Level::Easy)),
            KeyCode::Char('2') => return Ok(MenuResult::Start(Level::Medium)),
            KeyCode::Char('3') => return Ok(MenuResult::Start(Level::Hard)),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                return Ok(MenuResult::Quit);
            }
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program, `false` → play again.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame the keys that are still
/// fresh become the `Controls` flags, so Space and an arrow key can be held
/// together. Terminals with keyboard enhancement send releases and keys are
/// dropped immediately; classic terminals let them expire after
/// `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<bool> {
    let frame_time = Duration::from_micros(1_000_000 / u64::from(FRAMES_PER_SECOND));
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if state.status == GameStatus::GameOver =>
                        {
                            return Ok(false);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        if state.status == GameStatus::Playing {
            let controls = Controls {
                left: any_held(
                    &key_frame,
                    &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                    frame,
                ),
                right: any_held(
                    &key_frame,
                    &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                    frame,
                ),
                fire: is_held(&key_frame, &KeyCode::Char(' '), frame),
            };
            *state = apply_controls(state, &controls);
            *state = tick(state, rng);
        }

        let (width, height) = terminal::size()?;
        display::render(out, state, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<GameConfig, GameError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(file) = &cli.log_file {
        config.log.file = file.clone();
    }
    Ok(config)
}

fn main() -> Result<(), GameError> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    if let Some(path) = &cli.write_config {
        config.save_to_file(path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    init_logging(&config.log)?;
    if cli.config.is_none() {
        warn!("no --config given, using built-in tuning");
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    info!("starting turret_defense, seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, &rx, &cli, &config, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("exiting with error: {e}");
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cli: &Cli,
    config: &GameConfig,
    rng: &mut StdRng,
) -> Result<(), GameError> {
    loop {
        let level = match cli.level {
            Some(level) => Level::from(level),
            None => match show_menu(out, rx)? {
                MenuResult::Quit => break,
                MenuResult::Start(level) => level,
            },
        };

        info!("new game on {level:?}");
        let mut state = init_state(level, config.tuning);
        let quit = game_loop(out, &mut state, rx, rng)?;
        info!(
            "game ended: score {}, {} frames, status {:?}",
            state.score, state.frame, state.status
        );

        if quit {
            break;
        }
    }
    Ok(())
}
