//! grid: runs one virus_sim epidemic on a phone-sized grid.
//!
//! The population is laid out the way a 375 pt wide screen packs 24 pt
//! cells, spread is recalculated on a timer, and a second thread plays the
//! user tapping on members.  Every committed change is logged and written
//! to `changes.csv`.
//!
//! ```text
//! cargo run -p grid -- --out output/grid --contacts 3
//! cargo run -p grid -- --config params.json --steps 20
//! ```

mod logging;

use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{LevelFilter, info, warn};

use vs_core::{MemberId, SimParams, SimRng};
use vs_output::{CsvWriter, SimOutputObserver};
use vs_sim::{ChangeCause, ContactHandle, SimBuilder, SimError, SimEvent, Simulation};
use vs_spread::GridGeometry;

// ── Defaults ──────────────────────────────────────────────────────────────────

const SCREEN_WIDTH:      f64   = 375.0;
const CELL_WIDTH:        f64   = 24.0;
const CELL_SPACING:      f64   = 10.0;
const GROUP_SIZE:        usize = 120;
const INFECTION_FACTOR:  usize = 3;
const TICK_INTERVAL_MS:  u64   = 150;
const SEED:              u64   = 42;
const CONTACT_STREAM:    u64   = 1;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "grid")]
#[command(about = "Run a grid epidemic with timed spread and manual contacts")]
struct Args {
    /// JSON file with `SimParams`; built-in defaults are used when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for `changes.csv`.
    #[arg(short, long, default_value = "output/grid")]
    out: PathBuf,

    /// Number of manual contacts injected while the timer runs.
    #[arg(long, default_value_t = 3)]
    contacts: usize,

    /// Skip the timer and run this many synchronous ticks instead.
    #[arg(long)]
    steps: Option<u64>,

    /// Log level for the engine crates.
    #[arg(short, long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn default_params() -> SimParams {
    SimParams {
        group_size:       GROUP_SIZE,
        elements_in_row:  GridGeometry::columns_for_width(SCREEN_WIDTH, CELL_WIDTH, CELL_SPACING),
        infection_factor: INFECTION_FACTOR,
        tick_interval_ms: TICK_INTERVAL_MS,
        seed:             SEED,
    }
}

fn load_params(path: Option<&PathBuf>) -> Result<SimParams> {
    let Some(path) = path else {
        return Ok(default_params());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Manual contacts ───────────────────────────────────────────────────────────

/// Members the simulated user taps on, drawn from an auxiliary stream of the
/// run's seed so a given config always taps the same members.
fn contact_targets(params: &SimParams, count: usize) -> Result<Vec<MemberId>> {
    let mut rng = SimRng::new(params.seed).child(CONTACT_STREAM);
    (0..count)
        .map(|_| Ok(MemberId::try_from(rng.gen_range(0..params.group_size))?))
        .collect()
}

fn spawn_contacts(
    contacts: ContactHandle,
    targets:  Vec<MemberId>,
    pause:    Duration,
) -> Result<thread::JoinHandle<usize>> {
    let handle = thread::Builder::new()
        .name("contacts".into())
        .spawn(move || {
            let mut applied = 0;
            for member in targets {
                match contacts.force_infect(member) {
                    Ok(true) => applied += 1,
                    Ok(false) => info!("{member} was already infected"),
                    Err(SimError::Stopped) => break,
                    Err(e) => warn!("contact with {member} rejected: {e}"),
                }
                thread::sleep(pause);
            }
            applied
        })?;
    Ok(handle)
}

// ── Runs ──────────────────────────────────────────────────────────────────────

fn log_event(event: &SimEvent) {
    let change = event.change();
    let cause = match change.cause {
        ChangeCause::Tick(tick) => format!("tick {}", tick.0),
        ChangeCause::Contact(member) => format!("contact {}", member.0),
    };
    info!(
        "#{:<4} {:<14} +{:<3} infected {:>4} / healthy {:>4}",
        change.seq,
        cause,
        change.newly_infected.len(),
        change.snapshot.infected_count(),
        change.snapshot.healthy_count(),
    );
}

fn run_timed(sim: &Simulation, contacts: usize) -> Result<()> {
    let events = sim.subscribe();
    let params = sim.params();
    let contacts = spawn_contacts(
        sim.contact_handle(),
        contact_targets(params, contacts)?,
        params.tick_interval() * 2,
    )?;
    sim.start()?;

    for event in events.iter() {
        log_event(&event);
        if event.is_finished() {
            break;
        }
    }

    match contacts.join() {
        Ok(applied) => info!("{applied} manual contacts applied"),
        Err(_) => warn!("contact thread panicked"),
    }
    Ok(())
}

fn run_steps(sim: &Simulation, steps: u64) -> Result<()> {
    // Nothing spreads from an all-healthy grid; seed the center.
    let center = MemberId::try_from(sim.params().group_size / 2)?;
    sim.force_infect(center)?;
    if sim.snapshot().is_fully_infected() {
        return Ok(());
    }

    for _ in 0..steps {
        let event = sim.step()?;
        log_event(&event);
        if event.is_finished() {
            break;
        }
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.log_level)?;

    let params = load_params(args.config.as_ref())?;
    if args.steps.is_none() && args.contacts == 0 {
        bail!("with no contacts and no --steps nothing would ever be infected");
    }
    info!(
        "{} members, {} per row, infection factor {}, tick every {} ms, seed {}",
        params.group_size,
        params.elements_in_row,
        params.infection_factor,
        params.tick_interval_ms,
        params.seed,
    );

    let sim = SimBuilder::new(params).build()?;

    fs::create_dir_all(&args.out)?;
    let writer = CsvWriter::new(&args.out)?;
    let output = sim.observe(SimOutputObserver::new(writer))?;

    let t0 = Instant::now();
    match args.steps {
        Some(steps) => run_steps(&sim, steps)?,
        None => run_timed(&sim, args.contacts)?,
    }
    let elapsed = t0.elapsed();

    let snapshot = sim.snapshot();
    // A stepped run that never filled the grid is still `Idle`; dropping the
    // simulation halts it in any phase and ends the observer's stream.
    drop(sim);
    let Some(mut output) = output.join() else {
        bail!("output observer panicked");
    };
    if let Some(e) = output.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!(
        "  infected {} / healthy {}",
        snapshot.infected_count(),
        snapshot.healthy_count()
    );
    println!(
        "  {} : {} rows",
        args.out.join("changes.csv").display(),
        output.rows_written()
    );
    Ok(())
}
