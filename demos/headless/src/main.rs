//! headless: run the swarm simulation without a renderer.
//!
//! Loads an optional JSON config, world file and mission CSV, drives the tick
//! loop for a fixed number of frames, optionally writes agent snapshots and
//! tick summaries, and prints the final metrics as JSON.
//!
//! ```text
//! cargo run -p headless -- \
//!     --config demos/headless/data/config.json \
//!     --world demos/headless/data/world.json \
//!     --missions demos/headless/data/missions.csv \
//!     --frames 1800 --index grid --output ./out
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use sw_core::{SimConfig, TelemetryMode};
use sw_link::IndexKind;
use sw_mission::load_missions_csv;
use sw_motion::RandomWalk;
use sw_output::{CsvWriter, OutputWriter, SimOutputObserver};
use sw_sim::{
    FrameDriver, ManualTimeSource, MonotonicTimeSource, NoopObserver, Sim, SimBuilder, SimObserver,
    TimeSource,
};
use sw_world::load_world;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Telemetry {
    /// Random message counts, decoupled from links.
    Cosmetic,
    /// Message counts derived from formed links.
    Derived,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    /// Requires the `sqlite` feature.
    Sqlite,
    /// Requires the `parquet` feature.
    Parquet,
}

/// Headless swarm simulation run.
#[derive(Parser, Debug)]
#[command(name = "headless", version, about, long_about = None)]
struct Args {
    /// JSON config file; fields it omits keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON world file.  A random world is generated if omitted.
    #[arg(long)]
    world: Option<PathBuf>,

    /// Mission CSV.  Random missions are seeded if omitted.
    #[arg(long)]
    missions: Option<PathBuf>,

    /// Override `initial_agents`.
    #[arg(long)]
    agents: Option<usize>,

    /// Override the master seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Frames to run.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Override the speed multiplier.
    #[arg(long)]
    speed: Option<f64>,

    /// Link candidate index: brute-force, grid, or rtree.
    #[arg(long, default_value = "brute-force")]
    index: IndexKind,

    /// Override the telemetry mode.
    #[arg(long, value_enum)]
    telemetry: Option<Telemetry>,

    /// Directory for snapshot and tick-summary output.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output backend.
    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Pace frames to wall-clock time instead of running flat out.
    #[arg(long)]
    realtime: bool,

    /// Raise log verbosity (-v debug, -vv trace).  `RUST_LOG` wins if set.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => SimConfig::default(),
    };

    if let Some(n) = args.agents {
        config.initial_agents = n;
        config.max_agents = config.max_agents.max(n);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(speed) = args.speed {
        config.speed_multiplier = speed;
    }
    if let Some(mode) = args.telemetry {
        config.telemetry.mode = match mode {
            Telemetry::Cosmetic => TelemetryMode::Cosmetic,
            Telemetry::Derived  => TelemetryMode::Derived,
        };
    }
    Ok(config)
}

// ── Run ───────────────────────────────────────────────────────────────────────

type DemoSim = Sim<RandomWalk, Box<dyn sw_link::ProximityIndex>>;

fn drive<O: SimObserver>(sim: &mut DemoSim, args: &Args, observer: &mut O) -> u64 {
    fn frames<T: TimeSource, O: SimObserver>(
        time:     T,
        sim:      &mut DemoSim,
        n:        u64,
        observer: &mut O,
    ) -> u64 {
        let mut driver = FrameDriver::new(time, sim.config.target_fps);
        driver.run_frames(n, sim, observer)
    }

    if args.realtime {
        frames(MonotonicTimeSource::new(), sim, args.frames, observer)
    } else {
        frames(ManualTimeSource::new(), sim, args.frames, observer)
    }
}

fn drive_with_output<W: OutputWriter>(sim: &mut DemoSim, args: &Args, writer: W) -> Result<u64> {
    let mut observer = SimOutputObserver::new(writer);
    let ticks = drive(sim, args, &mut observer);
    observer.finish();
    if let Some(e) = observer.take_error() {
        return Err(e).context("writing simulation output");
    }
    Ok(ticks)
}

fn run_with_output(sim: &mut DemoSim, args: &Args, dir: &Path) -> Result<u64> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    match args.format {
        Format::Csv => drive_with_output(sim, args, CsvWriter::new(dir)?),
        #[cfg(feature = "sqlite")]
        Format::Sqlite => drive_with_output(sim, args, sw_output::SqliteWriter::new(dir)?),
        #[cfg(feature = "parquet")]
        Format::Parquet => drive_with_output(sim, args, sw_output::ParquetWriter::new(dir)?),
        #[allow(unreachable_patterns)]
        other => bail!("output format {other:?} was not compiled in; rebuild with its feature"),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // 1. Configuration.
    let config = load_config(&args)?;

    // 2. Optional world and mission files.
    let world = args
        .world
        .as_deref()
        .map(|path| load_world(path, &config.world).with_context(|| format!("loading {}", path.display())))
        .transpose()?;
    let missions = args
        .missions
        .as_deref()
        .map(|path| load_missions_csv(path).with_context(|| format!("loading {}", path.display())))
        .transpose()?;

    // 3. Build.
    let policy = RandomWalk::from_params(&config.motion);
    let mut builder = SimBuilder::new(config, policy, args.index.boxed());
    if let Some(world) = world {
        builder = builder.world(world);
    }
    if let Some(missions) = missions {
        builder = builder.missions(missions);
    }
    let mut sim = builder.build()?;

    // 4. Run.
    sim.set_running(true);
    let started = Instant::now();
    let ticks = match &args.output {
        Some(dir) => run_with_output(&mut sim, &args, dir)?,
        None => drive(&mut sim, &args, &mut NoopObserver),
    };
    let elapsed = started.elapsed();
    if ticks < args.frames {
        warn!(ticks, frames = args.frames, "some frames did not advance the simulation");
    }
    info!(
        ticks,
        simulated_secs = sim.clock.simulation_time,
        wall_ms = elapsed.as_millis() as u64,
        "run complete"
    );

    // 5. Final metrics.
    println!("{}", serde_json::to_string_pretty(&sim.metrics())?);
    Ok(())
}
