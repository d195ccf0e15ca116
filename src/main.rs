use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use arena_blaster::assets::{Assets, BuiltinAssets};
use arena_blaster::clock::FixedRateClock;
use arena_blaster::compute::init_state;
use arena_blaster::constants::{ARENA_HEIGHT, ARENA_WIDTH, TICKS_PER_SECOND};
use arena_blaster::display::{keyboard_flags, TerminalInput, TerminalSurface, HOLD_WINDOW};
use arena_blaster::game::{self, Outcome, Summary};

#[derive(Parser, Debug)]
#[command(name = "arena_blaster", about = "Terminal arena shoot-em-up")]
struct Args {
    /// Seed for enemy placement, bomb aim and colours (random if omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Log output file; the terminal itself is taken over by the game.
    #[arg(long, default_value = "arena_blaster.log")]
    log_file: PathBuf,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    // Missing sprites abort before the terminal is touched.
    let assets = Assets::load(&BuiltinAssets)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, "starting");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(keyboard_flags()))
        .is_ok();

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

    let result = play(&mut out, rx, assets, &mut rng);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let summary = result?;
    let ending = match summary.outcome {
        Outcome::Quit => "quit".to_string(),
        Outcome::GameOver(cause) => format!("game over ({cause:?})"),
    };
    println!(
        "{ending}: score {} after {} frames",
        summary.score, summary.frames
    );
    Ok(())
}

fn play<W: Write>(
    out: &mut W,
    rx: mpsc::Receiver<Event>,
    assets: Assets,
    rng: &mut StdRng,
) -> anyhow::Result<Summary> {
    let (cols, rows) = terminal::size()?;
    let arena = Vec2::new(ARENA_WIDTH, ARENA_HEIGHT);
    let mut surface = TerminalSurface::new(out, cols, rows, arena);
    let mut input = TerminalInput::new(rx, HOLD_WINDOW);
    let mut clock = FixedRateClock::new(TICKS_PER_SECOND);
    tracing::debug!(cols, rows, frame_budget = ?clock.frame(), "terminal surface ready");

    let state = init_state(assets);
    let summary = game::run(state, rng, &mut input, &mut surface, &mut clock)?;
    Ok(summary)
}
