//! LED cross Tetris runner (default binary).
//!
//! Runs the engine at a fixed frame rate, shows every frame on a terminal simulation
//! of the cross and, with `--link`, streams it to the physical cross over UDP.

use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use cross_tetris::adapter::FrameLink;
use cross_tetris::core::{Engine, EngineConfig, Font};
use cross_tetris::input::{should_quit, InputHandler};
use cross_tetris::term::{CrossView, FrameBuffer, ShadeMode, TerminalRenderer, Viewport};

#[derive(Debug, Parser)]
#[command(name = "cross-tetris", about = "Falling-block puzzle for the LED pharmacy cross")]
struct Cli {
    #[arg(long, help = "Seed of the piece generator (default: from the clock)")]
    seed: Option<u64>,

    #[arg(long, help = "Show LEDs as on/off only and run at 60 FPS")]
    two_shade: bool,

    #[arg(long, help = "Allow restarting mid-game (Enter) and forcing a game over (r)")]
    debug: bool,

    #[arg(long, help = "Hide the blinking landing preview")]
    no_preview: bool,

    #[arg(long, help = "Stream frames to the cross over UDP")]
    link: bool,

    #[arg(long, help = "Cross controller address (overrides CROSS_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Cross controller port (overrides CROSS_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "JSON bitmap font replacing the built-in one")]
    font: Option<PathBuf>,

    #[arg(long, help = "Write logs to this file")]
    log_file: Option<PathBuf>,

    #[arg(
        short = 'v',
        long,
        action = clap::ArgAction::Count,
        help = "Increase log verbosity (-v = INFO, -vv = DEBUG, -vvv = TRACE)"
    )]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let font = match &cli.font {
        Some(path) => Font::load(path)?,
        None => Font::builtin(),
    };
    let config = EngineConfig::default()
        .with_debug(cli.debug)
        .with_landing_preview(!cli.no_preview);
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let engine = Engine::with_font(config, seed, Arc::new(font));
    info!(seed, "starting game");

    let link = if cli.link { start_link(&cli)? } else { None };

    let mode = if cli.two_shade {
        ShadeMode::Two
    } else {
        ShadeMode::Eight
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine, CrossView::new(mode), link.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(cli: &Cli) -> Result<()> {
    // The terminal is taken over by the game, so logs only go to a file.
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    info!("Logging initialized at level: {}", level);
    Ok(())
}

fn start_link(cli: &Cli) -> Result<Option<FrameLink>> {
    FrameLink::start_from_env(|mut config| {
        if let Some(host) = &cli.host {
            config = config.with_host(host.clone());
        }
        if let Some(port) = cli.port {
            config = config.with_port(port);
        }
        config
    })
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    mut engine: Engine,
    view: CrossView,
    link: Option<&FrameLink>,
) -> Result<()> {
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);

    let fps = view.mode().fps();
    let frame_duration = Duration::from_secs(1) / fps;
    let mut next_frame = Instant::now();

    let mut fps_window_start = Instant::now();
    let mut fps_frames = 0u32;
    let mut measured_fps = fps as f32;

    loop {
        // Input until the next frame is due.
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    input.handle_key_event(key, Instant::now());
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let now = Instant::now();
        next_frame += frame_duration;
        if next_frame < now {
            // Fell behind (e.g. the terminal was suspended): don't try to catch up.
            next_frame = now + frame_duration;
        }

        let tick = input.take_tick_input(now);
        let quantized = engine.step(&tick, now).quantize();
        if let Some(link) = link {
            link.send(&quantized);
        }

        fps_frames += 1;
        let window = now.saturating_duration_since(fps_window_start);
        if window >= Duration::from_secs(1) {
            measured_fps = fps_frames as f32 / window.as_secs_f32();
            fps_frames = 0;
            fps_window_start = now;
        }

        // Render.
        let status = status_line(&engine, view.mode(), measured_fps, link);
        let (w, h) = crossterm::terminal::size().unwrap_or((96, 49));
        view.render_into(&quantized, &status, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}

fn status_line(engine: &Engine, mode: ShadeMode, fps: f32, link: Option<&FrameLink>) -> String {
    let link = match link {
        Some(link) => format!("link {} ({} dropped)", link.target(), link.stats().dropped()),
        None => "link off".to_string(),
    };
    let state = if engine.is_game_over() {
        "GAME OVER - Enter to restart"
    } else {
        "Esc to quit"
    };
    format!(
        "PTS {}  {}  {:.0} fps  {}  {}",
        engine.score(),
        mode.as_str(),
        fps,
        link,
        state
    )
}
