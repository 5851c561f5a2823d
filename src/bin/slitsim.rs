//! Headless double-slit runner.
//!
//! Runs the simulation at a fixed 60 Hz frame rate and prints the detection
//! screen as an ASCII histogram.
//!
//! Usage: `slitsim [frames] [--observe] [--config experiment.json]`
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::env;
use std::time::Duration;

use slitsim::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_micros(16_667);
const BAR_WIDTH: u32 = 60;

struct Args {
    frames: u32,
    observe: bool,
    config: Option<String>,
}

fn parse_args() -> Args {
    let mut args = Args {
        frames: 1200,
        observe: false,
        config: None,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--observe" => args.observe = true,
            "--config" => args.config = iter.next(),
            other => {
                if let Ok(frames) = other.parse() {
                    args.frames = frames;
                }
            }
        }
    }
    args
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = parse_args();
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_json_file(path)?,
        None => ExperimentConfig::default(),
    };
    if args.observe {
        config.observing = true;
    }

    info!(
        frames = args.frames,
        wavelength_nm = config.light.wavelength_nm,
        slit_width = config.barrier.slit_width,
        slit_separation = config.barrier.slit_separation,
        observing = config.observing,
        "configuration loaded"
    );

    let mut sim = Simulation::new(config);
    sim.start();
    for _ in 0..args.frames {
        sim.frame(FRAME);
    }
    sim.stop();

    let stats = sim.stats();
    info!(
        emitted = stats.emitted,
        blocked = stats.blocked,
        passed = stats.passed,
        left = stats.left,
        right = stats.right,
        landed = stats.landed,
        expired = stats.expired,
        live = sim.len(),
        "run complete"
    );

    let screen = sim.screen();
    let peak = screen.hits().iter().copied().max().unwrap_or(0).max(1);
    for (i, &count) in screen.hits().iter().enumerate() {
        let bar = "#".repeat((count * BAR_WIDTH / peak) as usize);
        println!("{:>7.2} | {:<5} {}", screen.bin_center(i), count, bar);
    }
    println!("contrast: {:.3}", screen.contrast());

    Ok(())
}
