//! Focus Catcher entry point
//!
//! Headless runner: plays levels with the demo player in real time, lists
//! levels and prints the progress report.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use focus_catcher::autoplay::Autoplayer;
use focus_catcher::platform::{Clock, FramePacer, SystemClock};
use focus_catcher::renderer::FrameSnapshot;
use focus_catcher::sim::{GameEvent, GameState, SessionSummary, TickInput, tick};
use focus_catcher::{LevelCatalog, ProgressReport, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Focus Catcher attention training game", long_about = None)]
struct Args {
    /// Settings file (JSON)
    #[arg(long, default_value = "focus_settings.json")]
    settings: PathBuf,
    /// Directory holding the session and progress files
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// RNG seed for spawning and the demo player
    #[arg(long)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a level with the demo player
    Play {
        #[arg(long)]
        level: u32,
        /// Chance (0-1) that the player clicks the target it aims for
        #[arg(long, default_value_t = 0.9)]
        accuracy: f32,
        /// Delay before a visible target gets clicked (ms)
        #[arg(long, default_value_t = 450.0)]
        reaction_ms: f64,
        /// Quit after this many seconds of wall time
        #[arg(long)]
        max_seconds: Option<f64>,
        /// Play the level even if it is locked
        #[arg(long)]
        force: bool,
    },
    /// List levels with unlock state and best results
    Levels,
    /// Print overall progress
    Report,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut settings = Settings::load(&args.settings);
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);

    let store = settings.store();
    let records = store.load_or_default();
    let catalog = LevelCatalog::standard();

    match args.command {
        Command::Play {
            level,
            accuracy,
            reaction_ms,
            max_seconds,
            force,
        } => {
            catalog.get(level)?;
            if !force && !records.progress.is_unlocked(level) {
                bail!("level {level} is locked (use --force to play it anyway)");
            }
            let state = GameState::with_records(seed, catalog, records)
                .with_play_area(settings.play_width, settings.play_height);
            let Some((summary, state)) =
                play(state, &settings, level, accuracy, reaction_ms, max_seconds)?
            else {
                println!("Session abandoned; nothing recorded");
                return Ok(());
            };
            print_summary(&summary);
            if !store.save_logged(&state.records) {
                println!("Records were not saved; this run's results are kept in memory only");
            }
        }
        Command::Levels => {
            for config in catalog.iter() {
                let unlocked = records.progress.is_unlocked(config.level);
                let best = records
                    .progress
                    .get(config.level)
                    .map(|p| {
                        format!(
                            "best {}% / {}ms, played {}x",
                            p.best_accuracy as u32, p.best_reaction_time as u32, p.times_played
                        )
                    })
                    .unwrap_or_else(|| "not played".to_string());
                println!(
                    "{:>2}. {:<18} {:<8} target: {:<9} {}  [{}]",
                    config.level,
                    config.name,
                    if unlocked { "open" } else { "locked" },
                    config.target.as_str(),
                    config.description,
                    best
                );
            }
        }
        Command::Report => {
            let report = ProgressReport::build(&records, catalog.len());
            for line in report.lines() {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// Run one session in real time; `None` when it was quit before finishing
fn play(
    mut state: GameState,
    settings: &Settings,
    level: u32,
    accuracy: f32,
    reaction_ms: f64,
    max_seconds: Option<f64>,
) -> Result<Option<(SessionSummary, GameState)>> {
    let clock = SystemClock;
    state
        .start_level(level, clock.now_ms())
        .with_context(|| format!("starting level {level}"))?;
    log::info!("Playing level {level} (seed {})", state.seed);

    let mut bot = Autoplayer::new(state.seed, accuracy, reaction_ms);
    let mut pacer = FramePacer::new(settings.target_fps, settings.max_frame_dt);
    let started = Instant::now();
    let mut last_status = 0;

    loop {
        let dt = pacer.wait_next();
        let now = clock.now_ms();
        let elapsed = started.elapsed().as_secs_f64();

        let input = TickInput {
            clicks: bot.decide(&state, now).into_iter().collect(),
            quit: max_seconds.is_some_and(|limit| elapsed >= limit),
            ..Default::default()
        };

        for event in tick(&mut state, &input, dt, now) {
            match event {
                GameEvent::ObjectHit {
                    id,
                    is_target,
                    reaction_ms,
                } => {
                    log::debug!("Hit object {id} (target: {is_target}) after {reaction_ms:.0}ms");
                }
                GameEvent::EmptyClick { .. } => log::debug!("Clicked empty space"),
                GameEvent::SessionEnded(summary) => return Ok(Some((summary, state))),
                GameEvent::QuitRequested => {
                    log::info!("Stopping after {elapsed:.1}s");
                    return Ok(None);
                }
                _ => {}
            }
        }

        // Status once per second
        if elapsed as u64 > last_status {
            last_status = elapsed as u64;
            if let Some(hud) = FrameSnapshot::capture(&state).hud {
                println!("{} | {} fps", hud.status_line(), pacer.fps());
            }
        }
    }
}

fn print_summary(summary: &SessionSummary) {
    let session = &summary.session;
    let headline = if summary.outcome.is_win() {
        format!("Level {} complete!", session.level)
    } else {
        format!("Level {} over ({:?})", session.level, summary.outcome)
    };
    println!("{headline}");
    println!("  Score: {}", summary.score);
    println!("  Lives left: {}", summary.lives);
    println!(
        "  Clicks: {} correct, {} incorrect",
        session.correct_clicks, session.incorrect_clicks
    );
    println!("  Accuracy: {:.1}%", session.accuracy);
    println!("  Average reaction: {:.0}ms", session.average_reaction_time);
    if summary.level_cleared {
        println!("  Level {} cleared", session.level);
    }
}
