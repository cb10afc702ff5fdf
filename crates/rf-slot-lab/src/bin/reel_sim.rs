//! Headless reel simulator
//!
//! Runs a seeded game session frame by frame and reports what the reels do.

use anyhow::{Context, bail};
use clap::Parser;
use std::path::PathBuf;

use rf_slot_lab::{GameSession, Prediction, SessionEvent, SimConfig, Slots};
use rf_tween::{DEFAULT_FRAME_MS, FrameClock};

/// Frames allowed for one spin and its highlight
const MAX_FRAMES_PER_SPIN: u64 = 1_000_000;

#[derive(Parser, Debug)]
#[command(name = "reel-sim", about = "Run reel spins headless", version)]
struct Args {
    /// Simulator config (.yaml, .yml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of spins
    #[arg(short = 'n', long, default_value_t = 5)]
    spins: u32,

    /// RNG seed (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Frame length in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    frame_ms: f64,

    /// Print every event as a JSON line
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default)]
struct Summary {
    spins: u64,
    matches: u64,
    predicted_wins: u64,
    mispredicted: u64,
    frames: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SimConfig::default(),
    };
    let slots = Slots::from_config(&config).context("invalid reel layout")?;

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!(
        "reel-sim: {} reels, {} spins, seed {}",
        slots.reel_count(),
        args.spins,
        seed
    );

    let mut session = GameSession::seeded(slots, seed);
    let mut clock = FrameClock::fixed(args.frame_ms);
    let mut summary = Summary::default();

    for _ in 0..args.spins {
        let events = session.spin()?;
        report(&events, session.prediction(), &args, &mut summary)?;

        let mut frames = 0;
        while !session.is_armed() || session.is_highlighting() {
            frames += 1;
            if frames > MAX_FRAMES_PER_SPIN {
                bail!("spin {} did not settle", session.spins());
            }
            let events = session.update(clock.tick());
            report(&events, session.prediction(), &args, &mut summary)?;
        }
        summary.frames += frames;
    }

    if !args.json {
        println!(
            "spins: {}  matches: {}  predicted wins: {}  mispredicted: {}  frames: {}",
            summary.spins,
            summary.matches,
            summary.predicted_wins,
            summary.mispredicted,
            summary.frames
        );
    }
    Ok(())
}

fn report(
    events: &[SessionEvent],
    prediction: Option<&Prediction>,
    args: &Args,
    summary: &mut Summary,
) -> anyhow::Result<()> {
    for event in events {
        if args.json {
            println!("{}", serde_json::to_string(event)?);
        }
        match event {
            SessionEvent::SpinStarted { spin, distances } => {
                summary.spins += 1;
                if !args.json {
                    println!("spin {spin}: {distances:.2?}");
                }
            }
            SessionEvent::Predicted(prediction) if prediction.winning => {
                summary.predicted_wins += 1;
            }
            SessionEvent::Match { kind, reels } => {
                summary.matches += 1;
                if !args.json {
                    println!("  match: {kind} x{reels}");
                }
            }
            SessionEvent::Finished { spin, row } => {
                if prediction.is_some_and(|p| &p.row != row) {
                    summary.mispredicted += 1;
                    log::warn!("spin {spin}: landed row differs from prediction");
                }
                if !args.json {
                    let row: Vec<&str> = row.iter().map(|k| k.as_str()).collect();
                    println!("  spin {spin} landed: {}", row.join(" "));
                }
            }
            _ => {}
        }
    }
    Ok(())
}
